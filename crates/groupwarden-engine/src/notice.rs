//! Reply text for chat users.

use groupwarden_core::{Denial, Error, Invalid, Sanction, SanctionIntent, UserId, WarnOutcome};

pub fn warned(user: UserId, outcome: &WarnOutcome) -> String {
    let mut text = format!(
        "User {user} has been warned ({}/{}).",
        outcome.count, outcome.threshold
    );
    if outcome.escalate() {
        text.push('\n');
        text.push_str(&escalated(user, outcome.threshold));
    }
    text
}

pub fn escalated(user: UserId, threshold: u32) -> String {
    format!("User {user} was auto-banned for reaching {threshold} warnings.")
}

pub fn warning_count(user: UserId, count: u32) -> String {
    format!("User {user} has {count} warning(s).")
}

pub fn warnings_reset(user: UserId) -> String {
    format!("✅ Reset warnings for user {user}.")
}

pub fn rules(text: Option<&str>) -> String {
    match text {
        Some(text) => format!("📜 Group Rules:\n{text}"),
        None => "📜 No rules set yet. Use /setrules to define group rules.".to_string(),
    }
}

pub fn rules_updated() -> &'static str {
    "✅ Group rules updated!"
}

pub fn sanctioned(intent: &SanctionIntent) -> String {
    let verb = match intent.sanction {
        Sanction::Ban => "Banned",
        Sanction::Mute => "Muted",
        Sanction::Unmute => "Unmuted",
    };
    format!("{verb} user {}.", intent.user_id)
}

pub fn denied(denial: &Denial) -> &'static str {
    match denial {
        Denial::NotOwner => "🚫 Access Denied. Only the bot owner can use this command.",
        Denial::NotAdmin => "❌ You must be admin to use this command.",
        Denial::LookupFailed { .. } => {
            "⚠️ Could not verify your permissions right now. Please try again."
        }
    }
}

/// Reply for a failed operation.
pub fn failure(err: &Error) -> String {
    match err {
        Error::Unauthorized(denial) => denied(denial).to_string(),
        Error::InvalidInput(Invalid::EmptyRules) => "⚠️ Please provide rules text.".to_string(),
        Error::InvalidInput(invalid) => format!("⚠️ {invalid}"),
        Error::StoreUnavailable(_) => {
            "⚠️ Moderation records are unavailable right now. Please try again.".to_string()
        }
        Error::ExclusionFailed { user_id, reason, .. } => {
            format!("⚠️ Could not apply the action to user {user_id}: {reason}")
        }
        other => format!("⚠️ {other}"),
    }
}
