use snowflake::SnowflakeIdBucket;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Allocates identities for rules, groups and alert events.
///
/// Stores and engines receive an implementation at construction time
/// instead of deriving ids from timestamps.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Snowflake-backed generator producing numeric string ids.
///
/// `machine_id` and `node_id` must each be in `0..=31`.
pub struct SnowflakeIdGenerator {
    bucket: Mutex<SnowflakeIdBucket>,
}

impl SnowflakeIdGenerator {
    pub fn new(machine_id: i32, node_id: i32) -> Self {
        Self {
            bucket: Mutex::new(SnowflakeIdBucket::new(machine_id, node_id)),
        }
    }
}

impl Default for SnowflakeIdGenerator {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl IdGenerator for SnowflakeIdGenerator {
    fn next_id(&self) -> String {
        let mut bucket = self
            .bucket
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        bucket.get_id().to_string()
    }
}

/// Monotonic `<prefix>-<n>` ids, starting at 1.
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
