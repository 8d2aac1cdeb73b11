//! Scripted walkthrough of a scheduling session.
//!
//! Plays the intents a scheduler would issue from the calendar screen:
//! book, hit a maintenance conflict, move, filter, switch role, cancel. Each
//! step is logged together with the resulting grid and report.
//!
//! Edits are played as a scheduler whatever role the session was started
//! with; the configured role is restored afterwards, also on error.

use std::time::Duration;

use anyhow::Context;
use equipsched_core::dates::add_days;
use equipsched_core::filters::TypeFilter;
use equipsched_core::roles::Role;
use equipsched_core::types::Day;
use equipsched_core::{CoreError, NewReservation};

use crate::runtime::SchedulerRuntime;

/// What the walkthrough observed, for callers and tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkthroughSummary {
    pub created: usize,
    pub rejected: usize,
    pub forbidden: usize,
    pub canceled: usize,
}

pub async fn run_walkthrough(
    rt: &mut SchedulerRuntime,
    today: Day,
) -> anyhow::Result<WalkthroughSummary> {
    let configured = rt.session.role();
    if !configured.can_edit() {
        tracing::info!(role = %configured, "Walkthrough edits run as scheduler");
    }
    rt.session.set_role(Role::Scheduler);

    let mut summary = WalkthroughSummary::default();
    let outcome = play(rt, today, &mut summary).await;

    rt.session.set_role(configured);
    outcome.map(|()| summary)
}

async fn play(
    rt: &mut SchedulerRuntime,
    today: Day,
    summary: &mut WalkthroughSummary,
) -> anyhow::Result<()> {
    log_views(rt, "Initial week");

    // Book the crane for today.
    let booking = rt
        .session
        .create_reservation(NewReservation::new("eq1", today, "p1", "s1", "Alex R."))
        .context("booking the crane for today")?;
    summary.created += 1;
    settle().await;

    // The excavator is in service tomorrow.
    match rt
        .session
        .create_reservation(NewReservation::new("eq2", add_days(today, 1), "p3", "s3", "Jo P."))
    {
        Err(CoreError::Conflict(kind)) => {
            tracing::info!(conflict = %kind, "Excavator booking rejected as expected");
            summary.rejected += 1;
        }
        other => anyhow::bail!("expected a maintenance conflict, got {other:?}"),
    }
    settle().await;

    // Moving the crane onto its own service day fails, two days out works.
    if rt
        .session
        .move_reservation(booking.id, add_days(today, 3))
        .is_err()
    {
        summary.rejected += 1;
    }
    rt.session
        .move_reservation(booking.id, add_days(today, 2))
        .context("moving the crane booking")?;
    settle().await;

    rt.session.set_type_filter(TypeFilter::parse("Crane"));
    log_views(rt, "Cranes only");
    rt.session.set_type_filter(TypeFilter::All);

    // Operators can look but not touch.
    rt.session.set_role(Role::Operator);
    if let Err(CoreError::Forbidden(reason)) = rt.session.cancel_reservation(booking.id) {
        tracing::info!(%reason, "Operator cancel refused");
        summary.forbidden += 1;
    }
    rt.session.set_role(Role::Scheduler);

    if rt.session.cancel_reservation(booking.id)?.is_some() {
        summary.canceled += 1;
    }
    settle().await;

    log_views(rt, "After cancellation");

    for notice in rt.notices.active().await {
        tracing::info!(kind = notice.kind.as_str(), message = %notice.message, "Visible notice");
    }

    Ok(())
}

fn log_views(rt: &SchedulerRuntime, title: &str) {
    let grid = rt.session.grid();
    let report = rt.session.report();
    tracing::info!(
        title,
        week = %rt.session.week_label(),
        "\n{}",
        grid.render_text()
    );
    match serde_json::to_string(&report) {
        Ok(json) => tracing::info!(title, overall = report.overall, report = %json, "Utilization"),
        Err(e) => tracing::warn!(error = %e, "Failed to serialize utilization report"),
    }
}

/// Give the subscriber tasks a chance to drain the bus.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}
