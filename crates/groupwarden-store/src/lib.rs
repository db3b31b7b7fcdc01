//! groupwarden store - warning counters and rule text
//!
//! Two resources, both keyed by group: warning counts per (group, user) and
//! one rules text per group. Each backend offers the same per-key atomic
//! operations; callers never hold a store lock between calls.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use groupwarden_core::{GroupId, Result, UserId};

/// Counts on either side of one atomic increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Increment {
    pub previous: u32,
    pub current: u32,
}

impl Increment {
    /// Whether this increment moved the count from below `threshold` to at or above it.
    pub fn crosses(&self, threshold: u32) -> bool {
        self.previous < threshold && self.current >= threshold
    }
}

/// Warning counters keyed by (group, user). A count of zero is never stored.
pub trait WarningStore: Send + Sync {
    /// Add one warning and return the counts before and after, as a single atomic step.
    fn increment(&self, group_id: GroupId, user_id: UserId) -> Result<Increment>;

    /// Take back one warning as a single atomic step and return the new count.
    /// The record is deleted when the count reaches zero; an absent record stays absent.
    fn decrement(&self, group_id: GroupId, user_id: UserId) -> Result<u32>;

    /// Current count; `0` when no record exists.
    fn count(&self, group_id: GroupId, user_id: UserId) -> Result<u32>;

    /// Delete the record. Returns whether one existed.
    fn delete(&self, group_id: GroupId, user_id: UserId) -> Result<bool>;

    /// Number of (group, user) records currently held.
    fn warning_records(&self) -> Result<u64>;
}

/// Rules text keyed by group. Last write wins.
pub trait RuleStore: Send + Sync {
    fn upsert_rules(&self, group_id: GroupId, text: &str) -> Result<()>;

    fn rules(&self, group_id: GroupId) -> Result<Option<String>>;

    /// Number of groups with rules set.
    fn rule_records(&self) -> Result<u64>;
}
