//! Per-group rules text

use groupwarden_core::{GroupId, Invalid, Result};
use groupwarden_store::RuleStore;
use std::sync::Arc;
use tracing::info;

pub struct RuleBook {
    store: Arc<dyn RuleStore>,
}

impl RuleBook {
    pub fn new(store: Arc<dyn RuleStore>) -> Self {
        Self { store }
    }

    /// Replace the group's rules. Whitespace-only text is rejected before any write.
    pub fn set(&self, group_id: GroupId, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Invalid::EmptyRules.into());
        }
        self.store.upsert_rules(group_id, text)?;
        info!(%group_id, len = text.len(), "rules updated");
        Ok(())
    }

    pub fn get(&self, group_id: GroupId) -> Result<Option<String>> {
        self.store.rules(group_id)
    }
}
