//! Command runner end to end: replies, authorization, and the outbox

use groupwarden::{execute, Command, Outbox};
use groupwarden_core::*;
use groupwarden_engine::{notice, Moderator, StaticRoster};
use groupwarden_store::SqliteStore;
use std::sync::Arc;

const ADMIN: UserId = UserId::new(1);
const MEMBER: UserId = UserId::new(3);
const OWNER: UserId = UserId::new(42);

struct Harness {
    moderator: Moderator,
    outbox: Outbox,
    _dir: tempfile::TempDir,
}

impl Harness {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = WardenConfig::from_toml(
            r#"
            owner_id = 42
            max_warnings = 3

            [[roster]]
            group_id = -100
            user_id = 1
            status = "administrator"
            "#,
        )
        .unwrap();
        let store = Arc::new(SqliteStore::open(dir.path().join("warden.db")).unwrap());
        let roster = Arc::new(StaticRoster::from_entries(&config.roster));
        let moderator = Moderator::new(Arc::new(config), roster, store.clone(), store);
        let outbox = Outbox::new(dir.path().join("outbox.jsonl"));
        Self {
            moderator,
            outbox,
            _dir: dir,
        }
    }

    async fn run(&self, caller: UserId, command: Command) -> Result<String> {
        execute(&self.moderator, &self.outbox, caller, command).await
    }
}

fn warn() -> Command {
    Command::Warn { group: -100, user: 5 }
}

#[tokio::test]
async fn warnings_count_up_and_auto_ban_once() {
    let h = Harness::new();
    assert_eq!(h.run(ADMIN, warn()).await.unwrap(), "User 5 has been warned (1/3).");
    assert_eq!(h.run(ADMIN, warn()).await.unwrap(), "User 5 has been warned (2/3).");
    let third = h.run(ADMIN, warn()).await.unwrap();
    assert!(third.contains("auto-banned for reaching 3 warnings"));
    h.run(ADMIN, warn()).await.unwrap();

    let entries = h.outbox.entries().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].intent.sanction, Sanction::Ban);
    assert_eq!(entries[0].intent.origin, SanctionOrigin::Escalation);
    assert_eq!(entries[0].intent.group_id, GroupId::new(-100));

    let count = h
        .run(MEMBER, Command::Warns { group: -100, user: 5 })
        .await
        .unwrap();
    assert_eq!(count, "User 5 has 4 warning(s).");
}

#[tokio::test]
async fn member_warn_is_refused_with_admin_notice() {
    let h = Harness::new();
    let err = h.run(MEMBER, warn()).await.unwrap_err();
    assert_eq!(notice::failure(&err), "❌ You must be admin to use this command.");
    let count = h
        .run(MEMBER, Command::Warns { group: -100, user: 5 })
        .await
        .unwrap();
    assert_eq!(count, "User 5 has 0 warning(s).");
}

#[tokio::test]
async fn reset_warn_clears() {
    let h = Harness::new();
    h.run(ADMIN, warn()).await.unwrap();
    let reply = h
        .run(ADMIN, Command::ResetWarn { group: -100, user: 5 })
        .await
        .unwrap();
    assert_eq!(reply, "✅ Reset warnings for user 5.");
    assert_eq!(h.moderator.query_warn(GroupId::new(-100), UserId::new(5)).unwrap(), 0);
}

#[tokio::test]
async fn rules_roundtrip_through_commands() {
    let h = Harness::new();
    let none = h.run(MEMBER, Command::Rules { group: -100 }).await.unwrap();
    assert!(none.starts_with("📜 No rules set yet"));

    let text = vec!["No".to_string(), "spam.".to_string()];
    let reply = h
        .run(ADMIN, Command::SetRules { group: -100, text })
        .await
        .unwrap();
    assert_eq!(reply, "✅ Group rules updated!");
    let rules = h.run(MEMBER, Command::Rules { group: -100 }).await.unwrap();
    assert_eq!(rules, "📜 Group Rules:\nNo spam.");
}

#[tokio::test]
async fn set_rules_without_text_asks_for_text() {
    let h = Harness::new();
    let err = h
        .run(ADMIN, Command::SetRules { group: -100, text: vec![] })
        .await
        .unwrap_err();
    assert_eq!(notice::failure(&err), "⚠️ Please provide rules text.");
}

#[tokio::test]
async fn manual_sanctions_reach_the_outbox() {
    let h = Harness::new();
    assert_eq!(
        h.run(ADMIN, Command::Mute { group: -100, user: 9 }).await.unwrap(),
        "Muted user 9."
    );
    assert_eq!(
        h.run(ADMIN, Command::Unmute { group: -100, user: 9 }).await.unwrap(),
        "Unmuted user 9."
    );
    assert_eq!(
        h.run(ADMIN, Command::Ban { group: -100, user: 9 }).await.unwrap(),
        "Banned user 9."
    );
    let kinds: Vec<Sanction> = h
        .outbox
        .entries()
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.intent.sanction)
        .collect();
    assert_eq!(kinds, vec![Sanction::Mute, Sanction::Unmute, Sanction::Ban]);
}

#[tokio::test]
async fn member_ban_writes_nothing() {
    let h = Harness::new();
    assert!(h.run(MEMBER, Command::Ban { group: -100, user: 9 }).await.is_err());
    assert!(h.outbox.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn diagnostics_are_owner_only() {
    let h = Harness::new();
    let stats = Command::Diag { group: -100, name: "stats".into() };
    let err = h.run(ADMIN, stats.clone()).await.unwrap_err();
    assert_eq!(
        notice::failure(&err),
        "🚫 Access Denied. Only the bot owner can use this command."
    );
    let report = h.run(OWNER, stats).await.unwrap();
    assert_eq!(report, "warned members: 0\ngroups with rules: 0");
}

#[tokio::test]
async fn unknown_diagnostic_is_invalid_input() {
    let h = Harness::new();
    let err = h
        .run(OWNER, Command::Diag { group: 0, name: "eval".into() })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(Invalid::UnknownDiagnostic { .. })));
}

#[tokio::test]
async fn id_echoes_caller_and_group() {
    let h = Harness::new();
    let reply = h.run(MEMBER, Command::Id { group: -100 }).await.unwrap();
    assert_eq!(reply, "User ID: 3\nChat ID: -100");
}

#[tokio::test]
async fn default_config_loads_back() {
    let h = Harness::new();
    let text = h.run(MEMBER, Command::DefaultConfig).await.unwrap();
    let config = WardenConfig::from_toml(&text).unwrap();
    assert_eq!(config.max_warnings, 3);
    assert!(!config.has_owner());
}
