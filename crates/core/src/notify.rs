//! Side effects emitted by the reservation rules.
//!
//! The rules never display or deliver anything themselves. They emit
//! [`ScheduleEvent`]s into an [`EventSink`]; the `equipsched-events` crate
//! turns those into transient notices and simulated emails.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::model::Reservation;
use crate::types::{Day, ReservationId};

// ---------------------------------------------------------------------------
// User-facing messages
// ---------------------------------------------------------------------------

pub const MSG_RESERVATION_CREATED: &str = "Reservation created. Confirmation email sent.";
pub const MSG_MOVE_CONFLICT: &str =
    "Cannot move: date conflicts with existing reservation or maintenance.";
pub const MSG_RESERVATION_CANCELED: &str = "Reservation canceled. Notification sent.";
pub const MSG_REMINDER_SENT: &str = "Reminder email sent for upcoming reservation.";

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// Something the rules want the outside world to know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleEvent {
    /// A message for the notification area.
    Notice { kind: NoticeKind, message: String },

    /// A reservation was stored. Triggers the confirmation email and the
    /// deferred reminder.
    ReservationCreated { reservation: Reservation },

    /// A reservation's date was changed in place.
    ReservationMoved {
        reservation: Reservation,
        previous_date: Day,
    },

    /// A cancellation was requested. `reservation` is `None` when the id
    /// was not present.
    ReservationCanceled {
        reservation_id: ReservationId,
        reservation: Option<Reservation>,
    },
}

impl ScheduleEvent {
    pub fn notice(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self::Notice {
            kind,
            message: message.into(),
        }
    }

    /// Dot-separated event name, used as a log field.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Notice { .. } => "notice",
            Self::ReservationCreated { .. } => "reservation.created",
            Self::ReservationMoved { .. } => "reservation.moved",
            Self::ReservationCanceled { .. } => "reservation.canceled",
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Receiver of [`ScheduleEvent`]s. Must not block.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ScheduleEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: ScheduleEvent) {}
}

/// Keeps every event in memory. Handy for tests and for replaying a session.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ScheduleEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn events(&self) -> Vec<ScheduleEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Only the notices, as `(kind, message)` pairs.
    pub fn notices(&self) -> Vec<(NoticeKind, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ScheduleEvent::Notice { kind, message } => Some((kind, message)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ScheduleEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
