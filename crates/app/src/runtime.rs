//! Wiring of a scheduling session to its notification subscribers.
//!
//! [`SchedulerRuntime`] owns the [`Session`] and shares an [`EventBus`] with
//! the [`NoticeBoard`] and [`EmailSimulator`] tasks. It must be started from
//! inside a tokio runtime; a current-thread runtime is enough.

use std::sync::Arc;

use equipsched_core::catalog::{default_state, seeded_state};
use equipsched_core::types::Day;
use equipsched_core::Session;
use equipsched_events::{EmailSimulator, EventBus, NoticeBoard};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

pub struct SchedulerRuntime {
    pub session: Session,
    pub bus: Arc<EventBus>,
    pub notices: Arc<NoticeBoard>,
    pub email: Arc<EmailSimulator>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerRuntime {
    /// Build the catalog, subscribe the notice board and email simulator,
    /// and open a session on the week containing `today`.
    pub fn start(config: &AppConfig, today: Day) -> Self {
        let bus = Arc::new(EventBus::default());
        let notices = Arc::new(NoticeBoard::new(config.notice_dismiss));
        let email = Arc::new(EmailSimulator::new(config.email.clone(), Arc::clone(&bus)));
        let cancel = CancellationToken::new();

        let tasks = vec![
            tokio::spawn(Arc::clone(&notices).run(bus.subscribe(), cancel.clone())),
            tokio::spawn(Arc::clone(&email).run(bus.subscribe(), cancel.clone())),
        ];

        let state = if config.seed_demo_data {
            seeded_state(today)
        } else {
            default_state(today)
        };
        let session = Session::new(state, bus.clone(), today).with_role(config.default_role);

        tracing::info!(
            role = %config.default_role,
            week = %session.week_label(),
            reservations = session.state().reservations().len(),
            "Scheduler session started"
        );

        Self {
            session,
            bus,
            notices,
            email,
            cancel,
            tasks,
        }
    }

    /// Stop the subscriber tasks and wait for them to finish. Pending
    /// reminders are dropped.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Subscriber task failed");
            }
        }
        tracing::info!("Scheduler runtime stopped");
    }
}
