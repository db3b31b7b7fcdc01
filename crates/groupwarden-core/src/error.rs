//! Error types for groupwarden

use crate::types::{GroupId, UserId};
use thiserror::Error;

/// Why an authorization check refused the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("caller is not the bot owner")]
    NotOwner,

    #[error("caller is not an administrator of the group")]
    NotAdmin,

    #[error("role lookup failed: {reason}")]
    LookupFailed { reason: String },
}

/// Why an input was rejected before any state changed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Invalid {
    #[error("rules text is empty")]
    EmptyRules,

    #[error("unknown diagnostic {name:?} (expected version, config or stats)")]
    UnknownDiagnostic { name: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("unauthorized: {0}")]
    Unauthorized(Denial),

    #[error("invalid input: {0}")]
    InvalidInput(Invalid),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("exclusion failed for user {user_id} in group {group_id}: {reason}")]
    ExclusionFailed {
        group_id: GroupId,
        user_id: UserId,
        reason: String,
    },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        Self::Unauthorized(denial)
    }
}

impl From<Invalid> for Error {
    fn from(invalid: Invalid) -> Self {
        Self::InvalidInput(invalid)
    }
}

impl Error {
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::StoreUnavailable(message.into())
    }

    pub fn exclusion_failed(group_id: GroupId, user_id: UserId, reason: impl Into<String>) -> Self {
        Self::ExclusionFailed {
            group_id,
            user_id,
            reason: reason.into(),
        }
    }

    pub fn lookup_failed(reason: impl Into<String>) -> Self {
        Self::Unauthorized(Denial::LookupFailed {
            reason: reason.into(),
        })
    }

    /// The denial behind an `Unauthorized` error, if any.
    pub fn denial(&self) -> Option<&Denial> {
        match self {
            Self::Unauthorized(denial) => Some(denial),
            _ => None,
        }
    }
}
