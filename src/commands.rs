//! Moderation commands and their replies.

use clap::Subcommand;
use groupwarden_core::{GroupId, Result, Sanction, UserId, WardenConfig};
use groupwarden_engine::{notice, Diagnostic, ExclusionDispatcher, Moderator};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Warn a member; reaching the limit bans them
    Warn {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Show a member's warning count
    Warns {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Clear a member's warnings
    ResetWarn {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Show the group rules
    Rules {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
    },
    /// Replace the group rules
    SetRules {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        /// Rules text (words are joined with spaces)
        #[arg(trailing_var_arg = true, num_args = 0..)]
        text: Vec<String>,
    },
    /// Ban a member
    Ban {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Mute a member
    Mute {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Unmute a member
    Unmute {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
        #[arg(short, long)]
        user: i64,
    },
    /// Owner diagnostics: version, config or stats
    Diag {
        #[arg(short, long, allow_negative_numbers = true, default_value_t = 0)]
        group: i64,
        name: String,
    },
    /// Show the caller and group ids
    Id {
        #[arg(short, long, allow_negative_numbers = true)]
        group: i64,
    },
    /// Print a starter config file (redirect into groupwarden.toml)
    DefaultConfig,
    /// Show version
    Version,
}

/// Run one command on behalf of `caller` and return the reply text.
pub async fn execute(
    moderator: &Moderator,
    dispatcher: &dyn ExclusionDispatcher,
    caller: UserId,
    command: Command,
) -> Result<String> {
    match command {
        Command::Warn { group, user } => {
            let user = UserId::new(user);
            let outcome = moderator
                .warn_and_enforce(caller, GroupId::new(group), user, dispatcher)
                .await?;
            Ok(notice::warned(user, &outcome))
        }
        Command::Warns { group, user } => {
            let user = UserId::new(user);
            let count = moderator.query_warn(GroupId::new(group), user)?;
            Ok(notice::warning_count(user, count))
        }
        Command::ResetWarn { group, user } => {
            let user = UserId::new(user);
            moderator.reset_warn(caller, GroupId::new(group), user).await?;
            Ok(notice::warnings_reset(user))
        }
        Command::Rules { group } => {
            let rules = moderator.get_rules(GroupId::new(group))?;
            Ok(notice::rules(rules.as_deref()))
        }
        Command::SetRules { group, text } => {
            moderator
                .set_rules(caller, GroupId::new(group), &text.join(" "))
                .await?;
            Ok(notice::rules_updated().to_string())
        }
        Command::Ban { group, user } => {
            sanction(moderator, dispatcher, caller, group, user, Sanction::Ban).await
        }
        Command::Mute { group, user } => {
            sanction(moderator, dispatcher, caller, group, user, Sanction::Mute).await
        }
        Command::Unmute { group, user } => {
            sanction(moderator, dispatcher, caller, group, user, Sanction::Unmute).await
        }
        Command::Diag { group, name } => {
            let diagnostic: Diagnostic = name.parse()?;
            let report = moderator
                .diagnose(caller, GroupId::new(group), diagnostic)
                .await?;
            Ok(report.to_string())
        }
        Command::Id { group } => Ok(format!("User ID: {caller}\nChat ID: {group}")),
        Command::DefaultConfig => WardenConfig::default().to_toml(),
        Command::Version => Ok(format!("groupwarden v{}", env!("CARGO_PKG_VERSION"))),
    }
}

async fn sanction(
    moderator: &Moderator,
    dispatcher: &dyn ExclusionDispatcher,
    caller: UserId,
    group: i64,
    user: i64,
    sanction: Sanction,
) -> Result<String> {
    let intent = moderator
        .sanction(caller, GroupId::new(group), UserId::new(user), sanction)
        .await?;
    moderator.dispatch(dispatcher, &intent).await?;
    Ok(notice::sanctioned(&intent))
}
