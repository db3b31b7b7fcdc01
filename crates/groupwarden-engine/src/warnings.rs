//! Warning counters and threshold escalation
//!
//! Per (group, user):
//!
//! ```text
//! Clear ──warn──▶ Active(n) ──warn, n+1 == threshold──▶ Escalated
//!   ▲                 │                                    │
//!   └─────reset───────┴───────────────reset────────────────┘
//! ```
//!
//! The escalation decision is taken from the counts returned by the
//! store's atomic increment, so exactly one caller sees each crossing.

use groupwarden_core::{EscalationIntent, GroupId, Result, UserId, WarnOutcome};
use groupwarden_store::WarningStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WarnState {
    Clear,
    Active(u32),
    Escalated(u32),
}

pub struct WarningEngine {
    store: Arc<dyn WarningStore>,
    threshold: u32,
}

impl WarningEngine {
    pub fn new(store: Arc<dyn WarningStore>, threshold: u32) -> Self {
        Self { store, threshold }
    }

    /// Record one warning. The returned outcome carries an intent only when
    /// this call performed the threshold crossing.
    pub fn warn(&self, group_id: GroupId, user_id: UserId) -> Result<WarnOutcome> {
        let inc = self.store.increment(group_id, user_id)?;
        let intent = inc
            .crosses(self.threshold)
            .then(|| EscalationIntent::new(group_id, user_id, inc.current, self.threshold));

        match &intent {
            Some(intent) => info!(
                %group_id, %user_id, count = inc.current, threshold = self.threshold,
                intent = %intent.id, "warning threshold reached, escalating"
            ),
            None => debug!(
                %group_id, %user_id, count = inc.current, threshold = self.threshold,
                "warning recorded"
            ),
        }

        Ok(WarnOutcome {
            count: inc.current,
            threshold: self.threshold,
            intent,
        })
    }

    /// Take back a warning recorded by `warn` whose escalation could not be
    /// carried out. A later warn from the restored count crosses again.
    pub fn retract(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        let count = self.store.decrement(group_id, user_id)?;
        warn!(%group_id, %user_id, count, "warning retracted");
        Ok(count)
    }

    pub fn query(&self, group_id: GroupId, user_id: UserId) -> Result<u32> {
        self.store.count(group_id, user_id)
    }

    /// Clear all warnings. Resetting a user with none is a no-op.
    pub fn reset(&self, group_id: GroupId, user_id: UserId) -> Result<()> {
        if self.store.delete(group_id, user_id)? {
            info!(%group_id, %user_id, "warnings reset");
        }
        Ok(())
    }

    pub fn state(&self, group_id: GroupId, user_id: UserId) -> Result<WarnState> {
        Ok(match self.query(group_id, user_id)? {
            0 => WarnState::Clear,
            n if n < self.threshold => WarnState::Active(n),
            n => WarnState::Escalated(n),
        })
    }
}
