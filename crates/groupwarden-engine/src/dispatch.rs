//! Dispatcher trait for platform side effects.
//!
//! The engine never calls a dispatcher while it holds store state; callers
//! receive an intent first and dispatch it afterwards.

use async_trait::async_trait;
use groupwarden_core::{GroupId, Sanction, SanctionIntent, UserId};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("dispatcher unavailable: {0}")]
    Unavailable(String),

    #[error("rejected by platform: {0}")]
    Rejected(String),
}

pub type DispatchResult = std::result::Result<(), DispatchError>;

/// Performs member sanctions on the chat platform.
#[async_trait]
pub trait ExclusionDispatcher: Send + Sync {
    /// Remove the member from the group (ban).
    async fn exclude(&self, group_id: GroupId, user_id: UserId) -> DispatchResult;

    /// Take away the member's right to send messages.
    async fn restrict(&self, group_id: GroupId, user_id: UserId) -> DispatchResult;

    /// Give back the right to send messages.
    async fn unrestrict(&self, group_id: GroupId, user_id: UserId) -> DispatchResult;

    /// Route an intent to the matching action. Override to see the whole intent.
    async fn apply(&self, intent: &SanctionIntent) -> DispatchResult {
        match intent.sanction {
            Sanction::Ban => self.exclude(intent.group_id, intent.user_id).await,
            Sanction::Mute => self.restrict(intent.group_id, intent.user_id).await,
            Sanction::Unmute => self.unrestrict(intent.group_id, intent.user_id).await,
        }
    }
}
