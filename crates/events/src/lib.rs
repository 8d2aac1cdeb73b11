//! Event bus and notification plumbing for the equipment scheduler.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`. Implements the core [`EventSink`] so the
//!   reservation rules can publish into it directly.
//! - [`NoticeBoard`]: transient user-facing notices that dismiss
//!   themselves after a fixed delay.
//! - [`delivery`]: simulated email delivery: confirmation on creation and a
//!   deferred, cancellable reminder.
//!
//! [`EventSink`]: equipsched_core::EventSink

pub mod bus;
pub mod delivery;
pub mod notices;

pub use bus::EventBus;
pub use delivery::email::{EmailConfig, EmailKind, EmailSimulator, SentEmail};
pub use notices::{Notice, NoticeBoard};
