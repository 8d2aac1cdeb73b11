//! Simulated email delivery for reservations.
//!
//! [`EmailSimulator`] stands in for a real mail channel. A confirmation is
//! "sent" (logged and kept in an in-memory outbox) as soon as a reservation
//! is created, and a reminder follows after [`EmailConfig::reminder_delay`].
//!
//! Pending reminders are keyed by reservation id. Cancelling a reservation
//! cancels its reminder. Moving a reservation keeps the reminder on its
//! original schedule but sends it with the moved date.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use equipsched_core::model::Reservation;
use equipsched_core::notify::{NoticeKind, ScheduleEvent, MSG_REMINDER_SENT};
use equipsched_core::types::{ReservationId, Timestamp};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::bus::EventBus;

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

/// Default delay between confirmation and reminder.
pub const DEFAULT_REMINDER_DELAY: Duration = Duration::from_secs(3);

/// Default sender address.
const DEFAULT_FROM_ADDRESS: &str = "noreply@equipsched.local";

#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// RFC 5322 "From" address shown in the log lines.
    pub from_address: String,
    /// How long after creation the reminder is sent.
    pub reminder_delay: Duration,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from_address: DEFAULT_FROM_ADDRESS.to_string(),
            reminder_delay: DEFAULT_REMINDER_DELAY,
        }
    }
}

// ---------------------------------------------------------------------------
// Outbox records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailKind {
    Confirmation,
    Reminder,
}

impl EmailKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmation => "confirmation",
            Self::Reminder => "reminder",
        }
    }
}

/// An email the simulator has "sent".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentEmail {
    pub kind: EmailKind,
    pub from_address: String,
    pub reservation: Reservation,
    pub sent_at: Timestamp,
}

// ---------------------------------------------------------------------------
// EmailSimulator
// ---------------------------------------------------------------------------

/// A reminder waiting for its delay to elapse.
struct PendingReminder {
    token: CancellationToken,
    /// Latest known state of the reservation; sent when the reminder fires.
    reservation: Reservation,
}

pub struct EmailSimulator {
    config: EmailConfig,
    bus: Arc<EventBus>,
    pending: Mutex<HashMap<ReservationId, PendingReminder>>,
    outbox: RwLock<Vec<SentEmail>>,
}

impl EmailSimulator {
    /// Create a simulator. Reminder notices are published on `bus`.
    pub fn new(config: EmailConfig, bus: Arc<EventBus>) -> Self {
        Self {
            config,
            bus,
            pending: Mutex::new(HashMap::new()),
            outbox: RwLock::new(Vec::new()),
        }
    }

    /// Record and log a confirmation email.
    pub async fn send_confirmation(&self, reservation: &Reservation) {
        self.deliver(EmailKind::Confirmation, reservation).await;
    }

    /// Schedule the reminder for `reservation`, replacing any pending one.
    pub async fn schedule_reminder(self: &Arc<Self>, reservation: Reservation) {
        let token = CancellationToken::new();
        let entry = PendingReminder {
            token: token.clone(),
            reservation: reservation.clone(),
        };
        if let Some(previous) = self.pending.lock().await.insert(reservation.id, entry) {
            previous.token.cancel();
        }

        tracing::debug!(
            reservation_id = %reservation.id,
            delay_secs = self.config.reminder_delay.as_secs(),
            "Reminder scheduled"
        );

        let simulator = Arc::clone(self);
        let delay = self.config.reminder_delay;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(reservation_id = %reservation.id, "Reminder cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let current = {
                        let mut pending = simulator.pending.lock().await;
                        if token.is_cancelled() {
                            return;
                        }
                        pending.remove(&reservation.id).map(|p| p.reservation)
                    };
                    let current = current.unwrap_or(reservation);
                    simulator.deliver(EmailKind::Reminder, &current).await;
                    simulator
                        .bus
                        .publish(ScheduleEvent::notice(NoticeKind::Info, MSG_REMINDER_SENT));
                }
            }
        });
    }

    /// Cancel the pending reminder for a reservation. Returns `false` when
    /// none was pending.
    pub async fn cancel_reminder(&self, reservation_id: ReservationId) -> bool {
        match self.pending.lock().await.remove(&reservation_id) {
            Some(pending) => {
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Replace the payload of a pending reminder without rescheduling it.
    /// Returns `false` when none was pending.
    pub async fn update_reminder(&self, reservation: &Reservation) -> bool {
        match self.pending.lock().await.get_mut(&reservation.id) {
            Some(pending) => {
                pending.reservation = reservation.clone();
                tracing::debug!(
                    reservation_id = %reservation.id,
                    date = %reservation.date,
                    "Reminder payload updated"
                );
                true
            }
            None => false,
        }
    }

    pub async fn pending_reminders(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Everything sent so far, in send order.
    pub async fn outbox(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }

    /// React to a single bus event.
    pub async fn handle(self: &Arc<Self>, event: ScheduleEvent) {
        match event {
            ScheduleEvent::ReservationCreated { reservation } => {
                self.send_confirmation(&reservation).await;
                self.schedule_reminder(reservation).await;
            }
            ScheduleEvent::ReservationCanceled { reservation_id, .. } => {
                self.cancel_reminder(reservation_id).await;
            }
            ScheduleEvent::ReservationMoved { reservation, .. } => {
                self.update_reminder(&reservation).await;
            }
            ScheduleEvent::Notice { .. } => {}
        }
    }

    /// Consume reservation events from the bus until cancelled or the bus
    /// closes. Pending reminders are cancelled on the way out.
    pub async fn run(
        self: Arc<Self>,
        mut receiver: broadcast::Receiver<ScheduleEvent>,
        cancel: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Email simulator cancelled");
                    break;
                }
                received = receiver.recv() => match received {
                    Ok(event) => self.handle(event).await,
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "Email simulator lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        tracing::info!("Event bus closed, email simulator shutting down");
                        break;
                    }
                }
            }
        }

        for (_, pending) in self.pending.lock().await.drain() {
            pending.token.cancel();
        }
    }

    async fn deliver(&self, kind: EmailKind, reservation: &Reservation) {
        match serde_json::to_string(reservation) {
            Ok(details) => tracing::info!(
                kind = kind.as_str(),
                from = %self.config.from_address,
                reservation_id = %reservation.id,
                details = %details,
                "Reservation email sent"
            ),
            Err(e) => tracing::warn!(
                kind = kind.as_str(),
                from = %self.config.from_address,
                reservation_id = %reservation.id,
                error = %e,
                "Reservation email sent without details"
            ),
        }
        self.outbox.write().await.push(SentEmail {
            kind,
            from_address: self.config.from_address.clone(),
            reservation: reservation.clone(),
            sent_at: Utc::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
