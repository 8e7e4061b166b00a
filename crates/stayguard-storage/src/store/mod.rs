use stayguard_common::id::IdGenerator;
use stayguard_common::types::{PropertyGroup, Rule};
use std::sync::Arc;

pub mod group;
pub mod rule;

pub use rule::RuleFilter;

/// Rule and property-group collections, kept in insertion order.
pub struct RuleStore {
    pub(crate) rules: Vec<Rule>,
    pub(crate) groups: Vec<PropertyGroup>,
    pub(crate) ids: Arc<dyn IdGenerator>,
}

impl RuleStore {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            rules: Vec::new(),
            groups: Vec::new(),
            ids,
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn groups(&self) -> &[PropertyGroup] {
        &self.groups
    }
}
