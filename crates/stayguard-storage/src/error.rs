use stayguard_common::types::ValidationError;

/// Errors returned by the rule and group stores.
///
/// Every variant is recoverable: a failed operation leaves the store
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use stayguard_storage::error::StorageError;
///
/// let err = StorageError::NotFound {
///     entity: "rule",
///     id: "rule-99".to_string(),
/// };
/// assert!(err.to_string().contains("rule-99"));
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    /// No record with the given id.
    #[error("Storage: {entity} not found (id={id})")]
    NotFound { entity: &'static str, id: String },

    /// A record with the same id already exists.
    #[error("Storage: {entity} already exists (id={id})")]
    AlreadyExists { entity: &'static str, id: String },

    /// The rule configuration breaks an invariant.
    #[error("Storage: invalid rule configuration: {0}")]
    InvalidRule(#[from] ValidationError),

    #[error("Storage: invalid property group: {0}")]
    InvalidGroup(String),

    /// The group is still the scope of at least one rule.
    #[error("Storage: property group {id} is referenced by rules {rule_ids:?}")]
    GroupInUse { id: String, rule_ids: Vec<String> },
}

/// Convenience `Result` alias for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
