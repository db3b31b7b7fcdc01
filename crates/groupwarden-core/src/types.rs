//! Core types for groupwarden

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! chat_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

chat_id!(
    /// Platform identifier of a group chat. Negative for supergroups on some platforms.
    GroupId
);

chat_id!(
    /// Platform identifier of a user.
    UserId
);

/// Role a caller needs for an operation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => f.write_str("owner"),
            Role::Admin => f.write_str("admin"),
            Role::Member => f.write_str("member"),
        }
    }
}

/// Membership status of a user in a group, as reported by the platform.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Creator,
    Administrator,
    #[default]
    Member,
    Restricted,
    Left,
    Banned,
}

impl MemberStatus {
    /// Creators and administrators may run admin commands.
    pub fn is_admin(&self) -> bool {
        matches!(self, MemberStatus::Creator | MemberStatus::Administrator)
    }
}

/// A platform action against a member.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sanction {
    Ban,
    Mute,
    Unmute,
}

impl std::fmt::Display for Sanction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sanction::Ban => f.write_str("ban"),
            Sanction::Mute => f.write_str("mute"),
            Sanction::Unmute => f.write_str("unmute"),
        }
    }
}

/// One-shot signal that a member crossed the warning threshold and must be excluded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EscalationIntent {
    pub id: Uuid,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub count: u32,
    pub threshold: u32,
}

impl EscalationIntent {
    pub fn new(group_id: GroupId, user_id: UserId, count: u32, threshold: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            user_id,
            count,
            threshold,
        }
    }
}

/// Where a sanction came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SanctionOrigin {
    /// An admin issued it directly.
    Manual,
    /// The warning threshold was reached.
    Escalation,
}

/// A sanction the caller layer must hand to the dispatcher.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SanctionIntent {
    pub id: Uuid,
    pub group_id: GroupId,
    pub user_id: UserId,
    pub sanction: Sanction,
    pub origin: SanctionOrigin,
}

impl SanctionIntent {
    pub fn manual(group_id: GroupId, user_id: UserId, sanction: Sanction) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            user_id,
            sanction,
            origin: SanctionOrigin::Manual,
        }
    }
}

impl From<EscalationIntent> for SanctionIntent {
    fn from(intent: EscalationIntent) -> Self {
        Self {
            id: intent.id,
            group_id: intent.group_id,
            user_id: intent.user_id,
            sanction: Sanction::Ban,
            origin: SanctionOrigin::Escalation,
        }
    }
}

/// Result of a single `warn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WarnOutcome {
    /// Count after this warning was applied.
    pub count: u32,
    pub threshold: u32,
    /// Present only on the warning that performed the threshold crossing.
    pub intent: Option<EscalationIntent>,
}

impl WarnOutcome {
    pub fn escalate(&self) -> bool {
        self.intent.is_some()
    }
}
