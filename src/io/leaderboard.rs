//! Leaderboard store - rep counts keyed by username
//!
//! Thin abstraction over the remote document store: upsert with merge
//! semantics plus a live top-N subscription. The session side is
//! fire-and-forget through a bounded channel; retries and conflict
//! resolution belong to the store implementation, not the core.

use crate::domain::error::CoreResult;
use crate::domain::types::WorkoutUpdate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tracing::{error, info, warn};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub reps: u32,
    pub updated_at: DateTime<Utc>,
}

/// Document store keyed by username.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Insert or update the row for `username`, recording the update time.
    async fn upsert(&self, username: &str, reps: u32) -> CoreResult<()>;

    /// Top `n` entries ordered by reps descending, username ascending as
    /// tie-break for deterministic ordering.
    async fn top(&self, n: usize) -> CoreResult<Vec<LeaderboardEntry>>;
}

/// In-process store with a live top-N watch channel.
pub struct MemoryLeaderboard {
    entries: Mutex<HashMap<String, LeaderboardEntry>>,
    top_n: usize,
    watch_tx: watch::Sender<Vec<LeaderboardEntry>>,
}

impl MemoryLeaderboard {
    pub fn new(top_n: usize) -> Self {
        let (watch_tx, _) = watch::channel(Vec::new());
        Self { entries: Mutex::new(HashMap::new()), top_n, watch_tx }
    }

    /// Subscribe to live top-N snapshots; a new snapshot is published on
    /// every upsert.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LeaderboardEntry>> {
        self.watch_tx.subscribe()
    }

    fn ranked(entries: &HashMap<String, LeaderboardEntry>, n: usize) -> Vec<LeaderboardEntry> {
        let mut rows: Vec<LeaderboardEntry> = entries.values().cloned().collect();
        rows.sort_by(|a, b| b.reps.cmp(&a.reps).then_with(|| a.username.cmp(&b.username)));
        rows.truncate(n);
        rows
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboard {
    async fn upsert(&self, username: &str, reps: u32) -> CoreResult<()> {
        let mut entries = self.entries.lock().await;
        let entry = LeaderboardEntry {
            username: username.to_string(),
            reps,
            updated_at: Utc::now(),
        };
        entries.insert(username.to_string(), entry);

        let snapshot = Self::ranked(&entries, self.top_n);
        drop(entries);

        // Subscribers may come and go; a send with no receivers is fine
        let _ = self.watch_tx.send(snapshot);
        info!(username = %username, reps = %reps, "leaderboard_upsert");
        Ok(())
    }

    async fn top(&self, n: usize) -> CoreResult<Vec<LeaderboardEntry>> {
        let entries = self.entries.lock().await;
        Ok(Self::ranked(&entries, n))
    }
}

/// Sender handle for workout updates.
///
/// Clone this to share across producers. Non-blocking - if the channel is
/// full the update is dropped (the next count advance supersedes it).
#[derive(Clone)]
pub struct UpdateSender {
    tx: mpsc::Sender<WorkoutUpdate>,
}

impl UpdateSender {
    pub fn send(&self, update: WorkoutUpdate) {
        if let Err(e) = self.tx.try_send(update) {
            warn!(error = %e, "leaderboard_update_dropped");
        }
    }
}

/// Create a new update channel pair.
///
/// Returns (sender, receiver); buffer size determines how many updates can
/// be queued before drops.
pub fn create_update_channel(
    buffer_size: usize,
) -> (UpdateSender, mpsc::Receiver<WorkoutUpdate>) {
    let (tx, rx) = mpsc::channel(buffer_size);
    (UpdateSender { tx }, rx)
}

/// Drain workout updates into a store until the channel closes.
pub async fn run_publisher(
    store: Arc<dyn LeaderboardStore>,
    mut rx: mpsc::Receiver<WorkoutUpdate>,
) {
    while let Some(update) = rx.recv().await {
        if let Err(e) = store.upsert(&update.username, update.reps).await {
            error!(username = %update.username, error = %e, "leaderboard_upsert_failed");
        }
    }
}
