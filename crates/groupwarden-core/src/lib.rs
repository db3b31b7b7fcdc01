//! groupwarden core - types, configuration, and error handling

pub mod config;
pub mod error;
pub mod types;

pub use config::{RosterEntry, WardenConfig};
pub use error::{Denial, Error, Invalid, Result};
pub use types::*;
