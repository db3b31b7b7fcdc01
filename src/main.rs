//! groupwarden: moderation policy engine for group chats
//!
//! Usage:
//!   groupwarden --caller 1 warn --group 100 --user 5     → add a warning
//!   groupwarden warns --group 100 --user 5               → show the count
//!   groupwarden --caller 1 set-rules --group 100 Be kind → replace rules
//!   groupwarden --caller <owner> diag stats              → owner diagnostics
//!
//! Sanctions (bans, mutes, auto-bans) are appended to the outbox file for
//! the platform adapter. Replies go to stdout; failure notices go to stderr
//! and the exit status is non-zero.

use anyhow::Context;
use clap::Parser;
use groupwarden::{execute, Command, Outbox};
use groupwarden_core::{UserId, WardenConfig};
use groupwarden_engine::{notice, Moderator, StaticRoster};
use groupwarden_store::SqliteStore;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "groupwarden",
    about = "Group chat moderation with warnings, auto-bans and rules",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Acting user id (checked against the owner id and group roster)
    #[arg(long, global = true, default_value_t = 0)]
    caller: i64,

    /// Path to config file (TOML). Default: $GROUPWARDEN_CONFIG or ./groupwarden.toml
    #[arg(long, global = true)]
    config: Option<String>,

    /// SQLite database (overrides `database` in the config)
    #[arg(long, global = true)]
    db: Option<String>,

    /// File that receives sanction intents as JSON lines
    #[arg(long, global = true, default_value = "outbox.jsonl")]
    outbox: String,

    /// Write logs to a file (in addition to stderr)
    #[arg(long, global = true)]
    log_file: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref().map(expand_tilde))?;

    let config_path = cli
        .config
        .as_deref()
        .map(expand_tilde)
        .or_else(|| std::env::var("GROUPWARDEN_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("groupwarden.toml"));
    let mut config = WardenConfig::load(&config_path)?.with_env_overrides()?;
    if let Some(db) = cli.db.as_deref() {
        config.database = expand_tilde(db);
    }
    let config = Arc::new(config);

    let store = Arc::new(
        SqliteStore::open(&config.database)
            .with_context(|| format!("opening {}", config.database.display()))?,
    );
    let roster = Arc::new(StaticRoster::from_entries(&config.roster));
    let moderator = Moderator::new(config.clone(), roster, store.clone(), store);
    let outbox = Outbox::new(expand_tilde(&cli.outbox));

    match execute(&moderator, &outbox, UserId::new(cli.caller), cli.command).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!("command failed: {}", e);
            eprintln!("{}", notice::failure(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(
    log_file: Option<PathBuf>,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let registry = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupwarden=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let Some(path) = log_file else {
        registry.init();
        return Ok(None);
    };
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = path
        .file_name()
        .with_context(|| format!("invalid log file path: {}", path.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
    registry
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Ok(Some(guard))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    PathBuf::from(path)
}
