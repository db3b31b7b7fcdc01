//! In-process store backed by `DashMap`.
//!
//! The entry API holds the shard write lock for the duration of the
//! read-modify-write, which makes `increment` atomic per key.

use crate::{Increment, RuleStore, WarningStore};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use groupwarden_core::{GroupId, Result, UserId};

#[derive(Default)]
pub struct MemoryStore {
    warnings: DashMap<(GroupId, UserId), u32>,
    rules: DashMap<GroupId, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WarningStore for MemoryStore {
    fn increment(&self, group_id: GroupId, user_id: UserId) -> Result<Increment> {
        let mut count = self.warnings.entry((group_id, user_id)).or_insert(0);
        let previous = *count;
        *count = previous.saturating_add(1);
        Ok(Increment {
            previous,
            current: *count,
        })
    }

    fn decrement(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        Ok(match self.warnings.entry((group_id, user_id)) {
            Entry::Occupied(mut entry) if *entry.get() > 1 => {
                *entry.get_mut() -= 1;
                *entry.get()
            }
            Entry::Occupied(entry) => {
                entry.remove();
                0
            }
            Entry::Vacant(_) => 0,
        })
    }

    fn count(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        Ok(self
            .warnings
            .get(&(group_id, user_id))
            .map(|c| *c.value())
            .unwrap_or(0))
    }

    fn delete(&self, group_id: GroupId, user_id: UserId) -> Result<bool> {
        Ok(self.warnings.remove(&(group_id, user_id)).is_some())
    }

    fn warning_records(&self) -> Result<u64> {
        Ok(self.warnings.len() as u64)
    }
}

impl RuleStore for MemoryStore {
    fn upsert_rules(&self, group_id: GroupId, text: &str) -> Result<()> {
        self.rules.insert(group_id, text.to_string());
        Ok(())
    }

    fn rules(&self, group_id: GroupId) -> Result<Option<String>> {
        Ok(self.rules.get(&group_id).map(|t| t.value().clone()))
    }

    fn rule_records(&self) -> Result<u64> {
        Ok(self.rules.len() as u64)
    }
}
