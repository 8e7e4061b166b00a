//! Shared domain types for the stayguard workspace: rules, property groups,
//! evaluation results, id allocation and localized labels.

pub mod i18n;
pub mod id;
pub mod types;
