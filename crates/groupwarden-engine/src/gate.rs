//! Permission gate
//!
//! Every privileged call re-authorizes. Admin status comes from the
//! membership collaborator on each call and is never cached.

use async_trait::async_trait;
use groupwarden_core::{
    Denial, Error, GroupId, MemberStatus, Result, Role, RosterEntry, UserId, WardenConfig,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("membership service unavailable: {0}")]
    Unavailable(String),

    #[error("membership lookup rejected: {0}")]
    Rejected(String),
}

/// Resolves a user's status in a group. Implemented by the platform adapter.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    async fn status_of(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> std::result::Result<MemberStatus, LookupError>;
}

pub struct PermissionGate {
    owner_id: Option<UserId>,
    membership: Arc<dyn MembershipLookup>,
}

impl PermissionGate {
    pub fn new(config: &WardenConfig, membership: Arc<dyn MembershipLookup>) -> Self {
        Self {
            owner_id: config.has_owner().then_some(config.owner_id),
            membership,
        }
    }

    /// Check that `caller` holds `required` in `group_id`.
    pub async fn authorize(
        &self,
        caller: UserId,
        group_id: GroupId,
        required: Role,
    ) -> Result<()> {
        match required {
            Role::Member => Ok(()),
            Role::Owner => {
                if self.owner_id == Some(caller) {
                    Ok(())
                } else {
                    warn!(%caller, %group_id, "owner command refused");
                    Err(Denial::NotOwner.into())
                }
            }
            Role::Admin => {
                let status = self
                    .membership
                    .status_of(group_id, caller)
                    .await
                    .map_err(|e| {
                        warn!(%caller, %group_id, error = %e, "role lookup failed");
                        Error::lookup_failed(e.to_string())
                    })?;
                if status.is_admin() {
                    debug!(%caller, %group_id, ?status, "admin authorized");
                    Ok(())
                } else {
                    warn!(%caller, %group_id, ?status, "admin command refused");
                    Err(Denial::NotAdmin.into())
                }
            }
        }
    }
}

/// Fixed membership table, usually loaded from the `[[roster]]` config section.
/// Users not listed are plain members.
#[derive(Debug, Default, Clone)]
pub struct StaticRoster {
    statuses: HashMap<(GroupId, UserId), MemberStatus>,
}

impl StaticRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[RosterEntry]) -> Self {
        let mut roster = Self::new();
        for entry in entries {
            roster.insert(entry.group_id, entry.user_id, entry.status);
        }
        roster
    }

    pub fn insert(&mut self, group_id: GroupId, user_id: UserId, status: MemberStatus) {
        self.statuses.insert((group_id, user_id), status);
    }

    pub fn with(mut self, group_id: GroupId, user_id: UserId, status: MemberStatus) -> Self {
        self.insert(group_id, user_id, status);
        self
    }
}

#[async_trait]
impl MembershipLookup for StaticRoster {
    async fn status_of(
        &self,
        group_id: GroupId,
        user_id: UserId,
    ) -> std::result::Result<MemberStatus, LookupError> {
        Ok(self
            .statuses
            .get(&(group_id, user_id))
            .copied()
            .unwrap_or_default())
    }
}
