//! groupwarden engine - permission gate, warning escalation, rules, and the moderator facade

pub mod diagnostics;
pub mod dispatch;
pub mod gate;
pub mod moderator;
pub mod notice;
pub mod rules;
pub mod warnings;

pub use diagnostics::{Diagnostic, DiagnosticReport};
pub use dispatch::{DispatchError, DispatchResult, ExclusionDispatcher};
pub use gate::{LookupError, MembershipLookup, PermissionGate, StaticRoster};
pub use moderator::Moderator;
pub use rules::RuleBook;
pub use warnings::{WarnState, WarningEngine};
