//! In-memory storage for alert rules and property groups.
//!
//! [`RuleStore`] owns both collections so that group deletion can check
//! which rules still reference a group. Identities come from an injected
//! [`IdGenerator`](stayguard_common::id::IdGenerator).

pub mod error;
pub mod store;


pub use error::{Result, StorageError};
pub use store::{RuleFilter, RuleStore};
