//! Reservation rules: conflict detection plus create, move and cancel.
//!
//! Every mutation of the reservation set goes through this module. A slot
//! (equipment, day) holds at most one reservation and never one on a
//! maintenance day. Both invariants are checked before each create or move;
//! a rejected call leaves the state untouched.

use chrono::Utc;

use crate::dates::iso_date;
use crate::error::{ConflictKind, CoreError};
use crate::model::{NewReservation, Reservation, ReservationStatus};
use crate::notify::{
    EventSink, NoticeKind, ScheduleEvent, MSG_MOVE_CONFLICT, MSG_RESERVATION_CANCELED,
    MSG_RESERVATION_CREATED,
};
use crate::state::ScheduleState;
use crate::types::{new_id, Day, ReservationId};

/// Maximum length of a free-text operator name.
pub const MAX_OPERATOR_NAME_LEN: usize = 120;

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

/// Check whether `equipment_id` can be reserved on `date`.
///
/// Maintenance is checked before existing reservations. An unknown equipment
/// id is a caller bug and is reported as [`CoreError::NotFound`].
pub fn detect_conflict(
    state: &ScheduleState,
    equipment_id: &str,
    date: Day,
) -> Result<Option<ConflictKind>, CoreError> {
    let equipment = state.find_equipment(equipment_id).ok_or_else(|| {
        tracing::warn!(equipment_id, "Conflict check for unknown equipment");
        CoreError::NotFound {
            entity: "equipment",
            id: equipment_id.to_string(),
        }
    })?;

    if equipment.is_under_maintenance(date) {
        return Ok(Some(ConflictKind::Maintenance));
    }
    if state.reservation_at(equipment_id, date).is_some() {
        return Ok(Some(ConflictKind::Reserved));
    }
    Ok(None)
}

/// Human-readable message for a rejected create.
pub fn create_conflict_message(kind: ConflictKind, date: Day) -> String {
    format!("Cannot reserve: {} on {}.", kind.describe(), iso_date(date))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the operator name length. Empty names are accepted.
pub fn validate_operator_name(name: &str) -> Result<(), CoreError> {
    if name.chars().count() > MAX_OPERATOR_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Operator name exceeds maximum length of {MAX_OPERATOR_NAME_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_references(state: &ScheduleState, request: &NewReservation) -> Result<(), CoreError> {
    if state.find_project(&request.project_id).is_none() {
        return Err(CoreError::NotFound {
            entity: "project",
            id: request.project_id.clone(),
        });
    }
    if state.find_site(&request.site_id).is_none() {
        return Err(CoreError::NotFound {
            entity: "site",
            id: request.site_id.clone(),
        });
    }
    validate_operator_name(&request.operator_name)
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Create a confirmed reservation for a free slot.
///
/// On conflict an error notice is emitted and the conflict returned. On
/// success a success notice and [`ScheduleEvent::ReservationCreated`] are
/// emitted; the latter drives the confirmation email and deferred reminder.
pub fn create_reservation(
    state: &mut ScheduleState,
    request: NewReservation,
    sink: &dyn EventSink,
) -> Result<Reservation, CoreError> {
    if let Err(e) = validate_references(state, &request) {
        tracing::warn!(error = %e, equipment_id = %request.equipment_id, "Rejected reservation request");
        return Err(e);
    }

    if let Some(kind) = detect_conflict(state, &request.equipment_id, request.date)? {
        tracing::info!(
            equipment_id = %request.equipment_id,
            date = %request.date,
            conflict = %kind,
            "Reservation rejected"
        );
        sink.emit(ScheduleEvent::notice(
            NoticeKind::Error,
            create_conflict_message(kind, request.date),
        ));
        return Err(CoreError::Conflict(kind));
    }

    let reservation = Reservation {
        id: new_id(),
        equipment_id: request.equipment_id,
        date: request.date,
        project_id: request.project_id,
        site_id: request.site_id,
        operator_name: request.operator_name,
        status: ReservationStatus::Confirmed,
        created_at: Utc::now(),
    };
    state.push_reservation(reservation.clone());

    tracing::info!(
        reservation_id = %reservation.id,
        equipment_id = %reservation.equipment_id,
        date = %reservation.date,
        "Reservation created"
    );
    sink.emit(ScheduleEvent::notice(NoticeKind::Success, MSG_RESERVATION_CREATED));
    sink.emit(ScheduleEvent::ReservationCreated {
        reservation: reservation.clone(),
    });

    Ok(reservation)
}

/// Move a reservation to `new_date`.
///
/// Returns `Ok(None)` when the id is unknown (nothing happens). Moving onto
/// a conflicting slot, including the slot the reservation already holds,
/// fails and leaves the reservation where it was.
pub fn update_reservation_date(
    state: &mut ScheduleState,
    reservation_id: ReservationId,
    new_date: Day,
    sink: &dyn EventSink,
) -> Result<Option<Reservation>, CoreError> {
    let Some(equipment_id) = state
        .find_reservation(reservation_id)
        .map(|r| r.equipment_id.clone())
    else {
        tracing::debug!(%reservation_id, "Move requested for unknown reservation");
        return Ok(None);
    };

    if let Some(kind) = detect_conflict(state, &equipment_id, new_date)? {
        tracing::info!(%reservation_id, date = %new_date, conflict = %kind, "Move rejected");
        sink.emit(ScheduleEvent::notice(NoticeKind::Error, MSG_MOVE_CONFLICT));
        return Err(CoreError::Conflict(kind));
    }

    let Some(reservation) = state.reservation_mut(reservation_id) else {
        return Ok(None);
    };
    let previous_date = reservation.date;
    reservation.date = new_date;
    let moved = reservation.clone();

    tracing::info!(%reservation_id, from = %previous_date, to = %new_date, "Reservation moved");
    sink.emit(ScheduleEvent::ReservationMoved {
        reservation: moved.clone(),
        previous_date,
    });

    Ok(Some(moved))
}

/// Remove a reservation if present. The cancellation notice is always sent.
pub fn cancel_reservation(
    state: &mut ScheduleState,
    reservation_id: ReservationId,
    sink: &dyn EventSink,
) -> Option<Reservation> {
    let removed = state.remove_reservation(reservation_id);

    tracing::info!(%reservation_id, found = removed.is_some(), "Reservation canceled");
    sink.emit(ScheduleEvent::ReservationCanceled {
        reservation_id,
        reservation: removed.clone(),
    });
    sink.emit(ScheduleEvent::notice(NoticeKind::Info, MSG_RESERVATION_CANCELED));

    removed
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

/// Insert a reservation without emitting events, for demo seed data.
///
/// The usual conflict rules still apply.
pub fn seed_reservation(
    state: &mut ScheduleState,
    request: NewReservation,
) -> Result<Reservation, CoreError> {
    create_reservation(state, request, &crate::notify::NullSink)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
