//! Transient user-facing notices.
//!
//! [`NoticeBoard`] collects [`ScheduleEvent::Notice`] events from the bus
//! and removes each one again after a fixed dismiss delay. The delay runs on
//! the tokio timer, so nothing is removed while the runtime is busy with
//! other work.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use equipsched_core::notify::{NoticeKind, ScheduleEvent};
use equipsched_core::types::{new_id, NoticeId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tokio_util::sync::CancellationToken;

/// Default time a notice stays visible.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: Timestamp,
}

pub struct NoticeBoard {
    notices: RwLock<Vec<Notice>>,
    dismiss_after: Duration,
}

impl NoticeBoard {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            notices: RwLock::new(Vec::new()),
            dismiss_after,
        }
    }

    /// Show a notice and schedule its removal.
    pub async fn push(self: &Arc<Self>, kind: NoticeKind, message: impl Into<String>) -> NoticeId {
        let notice = Notice {
            id: new_id(),
            kind,
            message: message.into(),
            created_at: Utc::now(),
        };
        let id = notice.id;

        tracing::info!(notice_id = %id, kind = kind.as_str(), message = %notice.message, "Notice shown");
        self.notices.write().await.push(notice);

        let board = Arc::clone(self);
        let delay = self.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            board.dismiss(id).await;
        });

        id
    }

    /// Remove a notice. Returns `false` if it was already gone.
    pub async fn dismiss(&self, id: NoticeId) -> bool {
        let mut notices = self.notices.write().await;
        let before = notices.len();
        notices.retain(|n| n.id != id);
        let removed = notices.len() != before;
        if removed {
            tracing::debug!(notice_id = %id, "Notice dismissed");
        }
        removed
    }

    /// Currently visible notices, oldest first.
    pub async fn active(&self) -> Vec<Notice> {
        self.notices.read().await.clone()
    }

    /// Consume notice events from the bus until cancelled or the bus closes.
    pub async fn run(
        self: Arc<Self>,
        mut receiver: broadcast::Receiver<ScheduleEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Notice board cancelled");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(ScheduleEvent::Notice { kind, message }) => {
                        self.push(kind, message).await;
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Notice board lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, notice board shutting down");
                        break;
                    }
                }
            }
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
