use chrono::{DateTime, Utc};
use stayguard_common::types::{Priority, Rule, RuleCategory, RuleDraft, RuleScope, RuleUpdate};

use crate::error::{Result, StorageError};
use crate::store::RuleStore;

/// Rule list filter; every field that is set must match.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    pub category_eq: Option<RuleCategory>,
    pub enabled_eq: Option<bool>,
    pub priority_eq: Option<Priority>,
    /// Case-insensitive substring of name or description.
    pub text_contains: Option<String>,
}

impl RuleFilter {
    pub fn matches(&self, rule: &Rule) -> bool {
        if self.category_eq.is_some_and(|c| c != rule.category) {
            return false;
        }
        if self.enabled_eq.is_some_and(|e| e != rule.enabled) {
            return false;
        }
        if self.priority_eq.is_some_and(|p| p != rule.priority) {
            return false;
        }
        match self.text_contains.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                rule.name.to_lowercase().contains(&needle)
                    || rule.description.to_lowercase().contains(&needle)
            }
        }
    }
}

fn not_found(id: &str) -> StorageError {
    StorageError::NotFound {
        entity: "rule",
        id: id.to_string(),
    }
}

impl RuleStore {
    pub fn create_rule(&mut self, draft: RuleDraft) -> Result<Rule> {
        let rule = draft.into_rule(self.ids.next_id(), Utc::now());
        self.check_rule(&rule)?;
        tracing::info!(rule_id = %rule.id, rule_name = %rule.name, "Rule created");
        self.rules.push(rule.clone());
        Ok(rule)
    }

    pub fn get_rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    pub fn list_rules(&self, filter: &RuleFilter) -> Vec<&Rule> {
        self.rules.iter().filter(|r| filter.matches(r)).collect()
    }

    pub fn count_rules(&self, filter: &RuleFilter) -> usize {
        self.rules.iter().filter(|r| filter.matches(r)).count()
    }

    pub fn enabled_rules(&self) -> Vec<&Rule> {
        self.rules.iter().filter(|r| r.enabled).collect()
    }

    /// Applies a partial update; the rule is left untouched if the result is invalid.
    pub fn update_rule(&mut self, id: &str, update: RuleUpdate) -> Result<Rule> {
        let mut candidate = self.get_rule(id).cloned().ok_or_else(|| not_found(id))?;
        update.apply_to(&mut candidate);
        self.check_rule(&candidate)?;
        candidate.updated_at = Utc::now();

        let slot = self.rule_mut(id)?;
        *slot = candidate.clone();
        Ok(candidate)
    }

    pub fn delete_rule(&mut self, id: &str) -> Result<Rule> {
        let pos = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.rules.remove(pos);
        tracing::info!(rule_id = %removed.id, "Rule deleted");
        Ok(removed)
    }

    pub fn toggle_enabled(&mut self, id: &str) -> Result<Rule> {
        let rule = self.rule_mut(id)?;
        rule.enabled = !rule.enabled;
        rule.updated_at = Utc::now();
        Ok(rule.clone())
    }

    pub fn set_priority(&mut self, id: &str, priority: Priority) -> Result<Rule> {
        let rule = self.rule_mut(id)?;
        rule.priority = priority;
        rule.updated_at = Utc::now();
        Ok(rule.clone())
    }

    /// Copies a rule under a new id with `" (copy)"` appended to its name.
    ///
    /// Counters and timestamps start fresh; the original is untouched.
    pub fn duplicate_rule(&mut self, id: &str) -> Result<Rule> {
        let original = self.get_rule(id).ok_or_else(|| not_found(id))?;
        let now = Utc::now();
        let copy = Rule {
            id: self.ids.next_id(),
            name: format!("{} (copy)", original.name),
            trigger_count: 0,
            last_triggered_at: None,
            created_at: now,
            updated_at: now,
            ..original.clone()
        };
        self.rules.push(copy.clone());
        Ok(copy)
    }

    /// Flips snooze membership of `entity_id`; returns whether it is now snoozed.
    pub fn toggle_snooze(&mut self, id: &str, entity_id: &str) -> Result<bool> {
        let rule = self.rule_mut(id)?;
        let snoozed = toggle(&mut rule.snoozed_ids, entity_id);
        rule.updated_at = Utc::now();
        Ok(snoozed)
    }

    /// Flips mute membership of `entity_id`; returns whether it is now muted.
    pub fn toggle_mute(&mut self, id: &str, entity_id: &str) -> Result<bool> {
        let rule = self.rule_mut(id)?;
        let muted = toggle(&mut rule.muted_ids, entity_id);
        rule.updated_at = Utc::now();
        Ok(muted)
    }

    /// Counts one fire of the rule.
    pub fn record_trigger(&mut self, id: &str, at: DateTime<Utc>) -> Result<Rule> {
        let rule = self.rule_mut(id)?;
        rule.trigger_count = rule.trigger_count.saturating_add(1);
        rule.last_triggered_at = Some(at);
        rule.updated_at = Utc::now();
        Ok(rule.clone())
    }

    fn rule_mut(&mut self, id: &str) -> Result<&mut Rule> {
        self.rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))
    }

    fn check_rule(&self, rule: &Rule) -> Result<()> {
        rule.validate()?;
        if let RuleScope::Group { group_id } = &rule.scope {
            if self.get_group(group_id).is_none() {
                return Err(StorageError::NotFound {
                    entity: "property_group",
                    id: group_id.clone(),
                });
            }
        }
        Ok(())
    }
}

fn toggle(set: &mut std::collections::BTreeSet<String>, entity_id: &str) -> bool {
    if set.remove(entity_id) {
        false
    } else {
        set.insert(entity_id.to_string());
        true
    }
}
