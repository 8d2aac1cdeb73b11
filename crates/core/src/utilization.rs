//! Utilization reporting for a window of days (normally the visible week).
//!
//! Each equipment's utilization is the share of window days on which it has
//! at least one reservation, as a rounded percentage. The overall figure is
//! the rounded mean of the already-rounded per-equipment values, not a
//! single rounding of the exact mean.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::Reservation;
use crate::state::ScheduleState;
use crate::types::{Day, EntityId};

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

/// One row of the utilization report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentUtilization {
    pub equipment_id: EntityId,
    pub name: String,
    /// Whole percent, `0..=100`.
    pub utilization: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub rows: Vec<EquipmentUtilization>,
    /// Rounded mean of `rows[*].utilization`, 0 when there are no rows.
    pub overall: u32,
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Round half up to a whole number. Inputs are non-negative percentages.
pub fn round_half_up(value: f64) -> u32 {
    (value + 0.5).floor().max(0.0) as u32
}

/// Distinct days within `days` on which `equipment_id` is reserved.
pub fn reserved_days<'a>(
    reservations: &'a [Reservation],
    equipment_id: &str,
    days: &[Day],
) -> BTreeSet<&'a Day> {
    reservations
        .iter()
        .filter(|r| r.equipment_id == equipment_id && days.contains(&r.date))
        .map(|r| &r.date)
        .collect()
}

/// Utilization percentage of one equipment over `days`.
///
/// An empty window yields 0.
pub fn equipment_utilization(reservations: &[Reservation], equipment_id: &str, days: &[Day]) -> u32 {
    if days.is_empty() {
        return 0;
    }
    let reserved = reserved_days(reservations, equipment_id, days).len();
    round_half_up(reserved as f64 / days.len() as f64 * 100.0)
}

/// Rounded mean of per-equipment values; 0 for an empty slice.
pub fn overall_utilization(values: &[u32]) -> u32 {
    let sum: u32 = values.iter().sum();
    round_half_up(f64::from(sum) / values.len().max(1) as f64)
}

/// Build the report for every equipment in `state` over `days`.
pub fn utilization_report(state: &ScheduleState, days: &[Day]) -> UtilizationReport {
    let rows: Vec<EquipmentUtilization> = state
        .equipment()
        .iter()
        .map(|e| EquipmentUtilization {
            equipment_id: e.id.clone(),
            name: e.name.clone(),
            utilization: equipment_utilization(state.reservations(), &e.id, days),
        })
        .collect();

    let values: Vec<u32> = rows.iter().map(|r| r.utilization).collect();
    let overall = overall_utilization(&values);

    UtilizationReport { rows, overall }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::{add_days, week_days, DAYS_PER_WEEK};
    use crate::model::{Equipment, NewReservation, Project, Site};
    use crate::rules::seed_reservation;

    fn monday() -> Day {
        Day::from_ymd_opt(2026, 10, 12).unwrap()
    }

    fn state_with(equipment: Vec<Equipment>) -> ScheduleState {
        ScheduleState::new(
            equipment,
            vec![Project::new("p1", "Tower")],
            vec![Site::new("s1", "North", "120 North Ave")],
        )
    }

    fn book(state: &mut ScheduleState, equipment_id: &str, date: Day) {
        seed_reservation(state, NewReservation::new(equipment_id, date, "p1", "s1", "")).unwrap();
    }

    // -- rounding ------------------------------------------------------------

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_half_up(12.5), 13);
        assert_eq!(round_half_up(28.571), 29);
        assert_eq!(round_half_up(14.49), 14);
        assert_eq!(round_half_up(0.0), 0);
    }

    // -- per equipment -------------------------------------------------------

    #[test]
    fn no_reservations_is_zero() {
        let state = state_with(vec![Equipment::new("eq1", "Crane", "Crane")]);
        let days = week_days(monday(), DAYS_PER_WEEK);
        assert_eq!(equipment_utilization(state.reservations(), "eq1", &days), 0);
    }

    #[test]
    fn every_day_reserved_is_hundred() {
        let mut state = state_with(vec![Equipment::new("eq1", "Crane", "Crane")]);
        let days = week_days(monday(), DAYS_PER_WEEK);
        for d in &days {
            book(&mut state, "eq1", *d);
        }
        assert_eq!(equipment_utilization(state.reservations(), "eq1", &days), 100);
    }

    #[test]
    fn two_of_seven_days_is_29_percent() {
        let mut state = state_with(vec![Equipment::new("eq1", "Crane", "Crane")]);
        book(&mut state, "eq1", monday());
        book(&mut state, "eq1", add_days(monday(), 4));
        let days = week_days(monday(), DAYS_PER_WEEK);
        assert_eq!(equipment_utilization(state.reservations(), "eq1", &days), 29);
    }

    #[test]
    fn reservations_outside_window_are_ignored() {
        let mut state = state_with(vec![Equipment::new("eq1", "Crane", "Crane")]);
        book(&mut state, "eq1", add_days(monday(), -1));
        book(&mut state, "eq1", add_days(monday(), 7));
        let days = week_days(monday(), DAYS_PER_WEEK);
        assert_eq!(equipment_utilization(state.reservations(), "eq1", &days), 0);
    }

    #[test]
    fn empty_window_is_zero() {
        let mut state = state_with(vec![Equipment::new("eq1", "Crane", "Crane")]);
        book(&mut state, "eq1", monday());
        assert_eq!(equipment_utilization(state.reservations(), "eq1", &[]), 0);
    }

    // -- report --------------------------------------------------------------

    #[test]
    fn overall_is_mean_of_rounded_rows() {
        let mut state = state_with(vec![
            Equipment::new("eq1", "Crane", "Crane"),
            Equipment::new("eq2", "Excavator", "Excavator"),
        ]);
        // eq1: 1/7 -> 14, eq2: 2/7 -> 29; mean 21.5 -> 22
        book(&mut state, "eq1", monday());
        book(&mut state, "eq2", monday());
        book(&mut state, "eq2", add_days(monday(), 1));

        let report = utilization_report(&state, &week_days(monday(), DAYS_PER_WEEK));

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].utilization, 14);
        assert_eq!(report.rows[1].utilization, 29);
        assert_eq!(report.overall, 22);
    }

    #[test]
    fn empty_equipment_list_overall_is_zero() {
        let state = state_with(vec![]);
        let report = utilization_report(&state, &week_days(monday(), DAYS_PER_WEEK));
        assert!(report.rows.is_empty());
        assert_eq!(report.overall, 0);
    }
}
