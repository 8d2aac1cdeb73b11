//! `equipsched-app` -- headless equipment scheduling session.
//!
//! Builds the demo catalog, wires the notice board and simulated email onto
//! the event bus, plays a scripted scheduling walkthrough and waits for the
//! deferred reminders before shutting down.
//!
//! Configuration is read from the environment (and `.env`); see
//! [`AppConfig::from_env`] for the variables.

use std::time::Duration;

use equipsched_app::config::AppConfig;
use equipsched_app::demo;
use equipsched_app::runtime::SchedulerRuntime;
use equipsched_core::dates::today_utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "equipsched_app=info,equipsched_events=info,equipsched_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        notice_dismiss_secs = config.notice_dismiss.as_secs(),
        reminder_delay_secs = config.email.reminder_delay.as_secs(),
        role = %config.default_role,
        seed = config.seed_demo_data,
        "Loaded scheduler configuration"
    );

    let today = today_utc();
    let mut rt = SchedulerRuntime::start(&config, today);

    let outcome = demo::run_walkthrough(&mut rt, today).await;
    match &outcome {
        Ok(summary) => {
            tracing::info!(?summary, "Walkthrough finished");

            // Let pending reminders fire before tearing down.
            tokio::time::sleep(config.email.reminder_delay + Duration::from_millis(250)).await;
            tracing::info!(
                emails = rt.email.outbox().await.len(),
                notices = rt.notices.active().await.len(),
                "Delivery summary"
            );
        }
        Err(e) => tracing::error!(error = ?e, "Walkthrough failed"),
    }

    rt.shutdown().await;
    outcome.map(|_| ())
}
