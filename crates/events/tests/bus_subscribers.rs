//! Integration tests for the bus subscribers.
//!
//! Drives the real reservation rules with the [`EventBus`] as their sink and
//! checks what the notice board and email simulator observe. Time is paused
//! so the dismiss and reminder timers run deterministically.

use std::sync::Arc;
use std::time::Duration;

use equipsched_core::catalog::default_state;
use equipsched_core::notify::{NoticeKind, MSG_REMINDER_SENT, MSG_RESERVATION_CREATED};
use equipsched_core::rules::{cancel_reservation, create_reservation};
use equipsched_core::types::Day;
use equipsched_core::NewReservation;
use equipsched_events::{EmailConfig, EmailKind, EmailSimulator, EventBus, NoticeBoard};
use tokio_util::sync::CancellationToken;

fn today() -> Day {
    Day::from_ymd_opt(2026, 10, 16).unwrap()
}

struct Harness {
    bus: Arc<EventBus>,
    board: Arc<NoticeBoard>,
    email: Arc<EmailSimulator>,
    cancel: CancellationToken,
}

fn start() -> Harness {
    let bus = Arc::new(EventBus::default());
    let board = Arc::new(NoticeBoard::new(Duration::from_secs(5)));
    let email = Arc::new(EmailSimulator::new(
        EmailConfig {
            reminder_delay: Duration::from_secs(3),
            ..Default::default()
        },
        Arc::clone(&bus),
    ));
    let cancel = CancellationToken::new();

    tokio::spawn(Arc::clone(&board).run(bus.subscribe(), cancel.clone()));
    tokio::spawn(Arc::clone(&email).run(bus.subscribe(), cancel.clone()));

    Harness {
        bus,
        board,
        email,
        cancel,
    }
}

/// Let spawned subscribers drain the channel without crossing any timer.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

// ---------------------------------------------------------------------------
// Test: creation shows a success notice and sends both emails
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn creation_flows_through_board_and_email() {
    let h = start();
    let mut state = default_state(today());

    create_reservation(
        &mut state,
        NewReservation::new("eq3", today(), "p1", "s1", "Sam O."),
        h.bus.as_ref(),
    )
    .unwrap();
    settle().await;

    let notices = h.board.active().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Success);
    assert_eq!(notices[0].message, MSG_RESERVATION_CREATED);
    assert_eq!(h.email.outbox().await.len(), 1);

    // Reminder fires at 3s and posts its own notice.
    tokio::time::sleep(Duration::from_secs(3)).await;
    let outbox = h.email.outbox().await;
    assert_eq!(outbox.len(), 2);
    assert_eq!(outbox[1].kind, EmailKind::Reminder);
    assert!(h
        .board
        .active()
        .await
        .iter()
        .any(|n| n.message == MSG_REMINDER_SENT));

    // Everything is dismissed once the last notice has aged out.
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(h.board.active().await.is_empty());

    h.cancel.cancel();
}

// ---------------------------------------------------------------------------
// Test: cancelling before the delay suppresses the reminder
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn cancellation_suppresses_reminder() {
    let h = start();
    let mut state = default_state(today());

    let res = create_reservation(
        &mut state,
        NewReservation::new("eq3", today(), "p1", "s1", "Sam O."),
        h.bus.as_ref(),
    )
    .unwrap();
    settle().await;
    assert_eq!(h.email.pending_reminders().await, 1);

    cancel_reservation(&mut state, res.id, h.bus.as_ref());
    settle().await;
    assert_eq!(h.email.pending_reminders().await, 0);

    tokio::time::sleep(Duration::from_secs(5)).await;
    let outbox = h.email.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].kind, EmailKind::Confirmation);

    h.cancel.cancel();
}

// ---------------------------------------------------------------------------
// Test: a conflict produces exactly one error notice and no email
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn conflict_produces_error_notice_only() {
    let h = start();
    let mut state = default_state(today());

    let tomorrow = today().succ_opt().unwrap();
    let result = create_reservation(
        &mut state,
        NewReservation::new("eq2", tomorrow, "p1", "s1", "Sam O."),
        h.bus.as_ref(),
    );
    assert!(result.is_err());
    settle().await;

    let notices = h.board.active().await;
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::Error);
    assert_eq!(
        notices[0].message,
        "Cannot reserve: Maintenance scheduled on 2026-10-17."
    );
    assert!(h.email.outbox().await.is_empty());

    h.cancel.cancel();
}
