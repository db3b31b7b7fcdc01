//! groupwarden - command runner and outbox shared by the binary and its tests

pub mod commands;
pub mod outbox;

pub use commands::{execute, Command};
pub use outbox::{Outbox, OutboxEntry};
