//! Append-only decision and comps log

use crate::advisor::{DecisionRequest, DecisionResponse};
use crate::comps::{CardIdentity, CompsSnapshot};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

const DECISIONS_FILE: &str = "decision_log.jsonl";
const COMPS_FILE: &str = "comps_cache.jsonl";

/// One logged decision request/response pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: Uuid,
    pub created_at_utc: DateTime<Utc>,
    pub request: DecisionRequest,
    pub response: DecisionResponse,
}

/// One cached comps fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompsCacheEntry {
    pub card_key: String,
    pub fetched_at_utc: DateTime<Utc>,
    pub snapshot: CompsSnapshot,
}

/// Logging statistics
#[derive(Debug, Default, Clone)]
pub struct LogStats {
    pub decisions_written: u64,
    pub comps_written: u64,
    pub last_write: Option<DateTime<Utc>>,
}

/// JSON-lines log of decisions and fetched comps
///
/// Writes are serialized through a single lock so concurrent requests never
/// interleave lines.
pub struct DecisionLog {
    output_dir: PathBuf,
    stats: Mutex<LogStats>,
}

impl DecisionLog {
    /// Open (creating if needed) a log under `output_dir`
    pub async fn open(output_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let output_dir = output_dir.into();
        tokio::fs::create_dir_all(&output_dir)
            .await
            .with_context(|| format!("creating log dir {}", output_dir.display()))?;
        Ok(Self {
            output_dir,
            stats: Mutex::new(LogStats::default()),
        })
    }

    pub fn decisions_path(&self) -> PathBuf {
        self.output_dir.join(DECISIONS_FILE)
    }

    pub fn comps_path(&self) -> PathBuf {
        self.output_dir.join(COMPS_FILE)
    }

    /// Append a decision record
    pub async fn record_decision(
        &self,
        request: &DecisionRequest,
        response: &DecisionResponse,
    ) -> anyhow::Result<DecisionRecord> {
        let record = DecisionRecord {
            id: Uuid::new_v4(),
            created_at_utc: Utc::now(),
            request: request.clone(),
            response: response.clone(),
        };
        let line = serde_json::to_string(&record)?;

        let mut stats = self.stats.lock().await;
        append_line(&self.decisions_path(), &line).await?;
        stats.decisions_written += 1;
        stats.last_write = Some(record.created_at_utc);

        tracing::debug!(id = %record.id, decision = %response.decision, "Logged decision");
        Ok(record)
    }

    /// Append the latest comps for a card
    pub async fn cache_comps(
        &self,
        identity: &CardIdentity,
        snapshot: &CompsSnapshot,
    ) -> anyhow::Result<()> {
        let entry = CompsCacheEntry {
            card_key: identity.card_key.clone(),
            fetched_at_utc: Utc::now(),
            snapshot: snapshot.clone(),
        };
        let line = serde_json::to_string(&entry)?;

        let mut stats = self.stats.lock().await;
        append_line(&self.comps_path(), &line).await?;
        stats.comps_written += 1;
        stats.last_write = Some(entry.fetched_at_utc);

        tracing::debug!(card_key = %identity.card_key, "Cached comps");
        Ok(())
    }

    /// Read back every logged decision, oldest first
    pub async fn read_decisions(&self) -> anyhow::Result<Vec<DecisionRecord>> {
        read_lines(&self.decisions_path()).await
    }

    /// Most recent cached comps for a card, if any
    pub async fn cached_comps(&self, card_key: &str) -> anyhow::Result<Option<CompsCacheEntry>> {
        let entries: Vec<CompsCacheEntry> = read_lines(&self.comps_path()).await?;
        Ok(entries.into_iter().rev().find(|e| e.card_key == card_key))
    }

    pub async fn stats(&self) -> LogStats {
        self.stats.lock().await.clone()
    }
}

async fn append_line(path: &Path, line: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .with_context(|| format!("opening {}", path.display()))?;
    file.write_all(line.as_bytes()).await?;
    file.write_all(b"\n").await?;
    file.flush().await?;
    Ok(())
}

async fn read_lines<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
        Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
    };
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).map_err(anyhow::Error::from))
        .collect()
}
