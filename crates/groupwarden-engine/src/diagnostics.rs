//! Owner diagnostics. A closed set; nothing here evaluates caller input.

use groupwarden_core::{Error, Invalid, UserId};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    Version,
    Config,
    Stats,
}

impl std::str::FromStr for Diagnostic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "version" => Ok(Diagnostic::Version),
            "config" => Ok(Diagnostic::Config),
            "stats" => Ok(Diagnostic::Stats),
            other => Err(Invalid::UnknownDiagnostic {
                name: other.to_string(),
            }
            .into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticReport {
    Version(&'static str),
    Config { owner_id: UserId, max_warnings: u32 },
    Stats { warning_records: u64, rule_records: u64 },
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticReport::Version(v) => write!(f, "groupwarden v{v}"),
            DiagnosticReport::Config {
                owner_id,
                max_warnings,
            } => write!(f, "owner: {owner_id}\nmax warnings: {max_warnings}"),
            DiagnosticReport::Stats {
                warning_records,
                rule_records,
            } => write!(
                f,
                "warned members: {warning_records}\ngroups with rules: {rule_records}"
            ),
        }
    }
}
