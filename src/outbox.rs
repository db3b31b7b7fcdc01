//! JSONL outbox for sanction intents.
//!
//! One line per intent; a platform adapter tails the file and performs the
//! ban/mute. Appends are serialized so lines never interleave.

use async_trait::async_trait;
use chrono::Utc;
use groupwarden_core::{GroupId, Sanction, SanctionIntent, UserId};
use groupwarden_engine::{DispatchError, DispatchResult, ExclusionDispatcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Serialize, Deserialize)]
pub struct OutboxEntry {
    pub ts: String,
    #[serde(flatten)]
    pub intent: SanctionIntent,
}

pub struct Outbox {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl Outbox {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn append(&self, intent: &SanctionIntent) -> std::io::Result<()> {
        let entry = OutboxEntry {
            ts: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            intent: intent.clone(),
        };
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }

    /// Read back every entry, oldest first.
    pub async fn entries(&self) -> std::io::Result<Vec<OutboxEntry>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).map_err(std::io::Error::from))
            .collect()
    }
}

#[async_trait]
impl ExclusionDispatcher for Outbox {
    async fn exclude(&self, group_id: GroupId, user_id: UserId) -> DispatchResult {
        self.apply(&SanctionIntent::manual(group_id, user_id, Sanction::Ban))
            .await
    }

    async fn restrict(&self, group_id: GroupId, user_id: UserId) -> DispatchResult {
        self.apply(&SanctionIntent::manual(group_id, user_id, Sanction::Mute))
            .await
    }

    async fn unrestrict(&self, group_id: GroupId, user_id: UserId) -> DispatchResult {
        self.apply(&SanctionIntent::manual(group_id, user_id, Sanction::Unmute))
            .await
    }

    async fn apply(&self, intent: &SanctionIntent) -> DispatchResult {
        self.append(intent).await.map_err(|e| {
            DispatchError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        tracing::info!(
            id = %intent.id, sanction = %intent.sanction, user_id = %intent.user_id,
            "sanction queued in outbox"
        );
        Ok(())
    }
}
