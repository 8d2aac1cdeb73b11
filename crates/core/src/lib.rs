//! Equipment scheduling domain logic.
//!
//! This crate has zero internal deps so it can be driven by the event
//! plumbing in `equipsched-events`, the demo binary, or any future frontend.
//!
//! - [`dates`]: Monday-anchored week arithmetic and ISO-day formatting.
//! - [`model`] / [`state`]: equipment, projects, sites, reservations and the
//!   single container that owns them.
//! - [`rules`]: conflict detection and create/move/cancel.
//! - [`utilization`]: per-equipment and overall utilization for a window.
//! - [`calendar`]: per-cell status grid for the visible week.
//! - [`session`]: role, filters and visible week wrapped around the rules.

pub mod calendar;
pub mod catalog;
pub mod dates;
pub mod error;
pub mod filters;
pub mod model;
pub mod notify;
pub mod roles;
pub mod rules;
pub mod session;
pub mod state;
pub mod types;
pub mod utilization;

pub use error::{ConflictKind, CoreError};
pub use model::{Equipment, NewReservation, Project, Reservation, ReservationStatus, Site};
pub use notify::{EventSink, NoticeKind, ScheduleEvent};
pub use session::Session;
pub use state::ScheduleState;
