//! One user's scheduling session.
//!
//! A [`Session`] owns the [`ScheduleState`] together with everything a
//! frontend would otherwise keep on the side: the selected role, the
//! equipment filters and the visible week. Every mutating intent is gated on
//! the role and then handed to [`crate::rules`].

use std::sync::Arc;

use crate::calendar::{build_week_grid, WeekGrid};
use crate::dates::{self, DAYS_PER_WEEK};
use crate::error::CoreError;
use crate::filters::{EquipmentFilter, TypeFilter};
use crate::model::{Equipment, NewReservation, Reservation};
use crate::notify::EventSink;
use crate::roles::Role;
use crate::rules;
use crate::state::ScheduleState;
use crate::types::{Day, ReservationId};
use crate::utilization::{utilization_report, UtilizationReport};

pub struct Session {
    state: ScheduleState,
    sink: Arc<dyn EventSink>,
    role: Role,
    filter: EquipmentFilter,
    week_start: Day,
}

impl Session {
    /// Start a session showing the week that contains `today`.
    pub fn new(state: ScheduleState, sink: Arc<dyn EventSink>, today: Day) -> Self {
        Self {
            state,
            sink,
            role: Role::default(),
            filter: EquipmentFilter::default(),
            week_start: dates::start_of_week(today),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn state(&self) -> &ScheduleState {
        &self.state
    }

    // -- role -----------------------------------------------------------------

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        tracing::debug!(role = %role, "Role changed");
        self.role = role;
    }

    pub fn can_edit(&self) -> bool {
        self.role.can_edit()
    }

    fn require_edit(&self, action: &str) -> Result<(), CoreError> {
        if self.can_edit() {
            Ok(())
        } else {
            tracing::warn!(role = %self.role, action, "Edit attempted without permission");
            Err(CoreError::Forbidden(format!(
                "Role '{}' cannot {action} reservations",
                self.role
            )))
        }
    }

    // -- filters --------------------------------------------------------------

    pub fn filter(&self) -> &EquipmentFilter {
        &self.filter
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    pub fn set_type_filter(&mut self, equipment_type: TypeFilter) {
        self.filter.equipment_type = equipment_type;
    }

    /// Equipment passing the current filters.
    pub fn visible_equipment(&self) -> Vec<&Equipment> {
        self.filter.apply(self.state.equipment())
    }

    // -- week navigation ------------------------------------------------------

    pub fn week_start(&self) -> Day {
        self.week_start
    }

    pub fn visible_days(&self) -> Vec<Day> {
        dates::week_days(self.week_start, DAYS_PER_WEEK)
    }

    /// Step forward one week. Returns `false`, leaving the visible week
    /// unchanged, at the end of the calendar.
    pub fn next_week(&mut self) -> bool {
        self.step_week(dates::next_week(self.week_start))
    }

    /// Step back one week. Returns `false` at the start of the calendar.
    pub fn previous_week(&mut self) -> bool {
        self.step_week(dates::previous_week(self.week_start))
    }

    fn step_week(&mut self, target: Option<Day>) -> bool {
        match target {
            Some(week_start) => {
                self.week_start = week_start;
                true
            }
            None => {
                tracing::debug!(week_start = %self.week_start, "Week navigation out of range");
                false
            }
        }
    }

    /// Jump back to the week containing `today`.
    pub fn go_to_week_of(&mut self, today: Day) {
        self.week_start = dates::start_of_week(today);
    }

    pub fn week_label(&self) -> String {
        dates::format_week_range(self.week_start)
    }

    // -- views ----------------------------------------------------------------

    /// Grid for the filtered equipment over the visible week.
    pub fn grid(&self) -> WeekGrid {
        build_week_grid(&self.state, &self.visible_equipment(), &self.visible_days())
    }

    /// Utilization over the visible week. Covers all equipment regardless of
    /// filters.
    pub fn report(&self) -> UtilizationReport {
        utilization_report(&self.state, &self.visible_days())
    }

    // -- intents --------------------------------------------------------------

    pub fn create_reservation(&mut self, request: NewReservation) -> Result<Reservation, CoreError> {
        self.require_edit("create")?;
        rules::create_reservation(&mut self.state, request, self.sink.as_ref())
    }

    pub fn move_reservation(
        &mut self,
        reservation_id: ReservationId,
        new_date: Day,
    ) -> Result<Option<Reservation>, CoreError> {
        self.require_edit("move")?;
        rules::update_reservation_date(&mut self.state, reservation_id, new_date, self.sink.as_ref())
    }

    pub fn cancel_reservation(
        &mut self,
        reservation_id: ReservationId,
    ) -> Result<Option<Reservation>, CoreError> {
        self.require_edit("cancel")?;
        Ok(rules::cancel_reservation(
            &mut self.state,
            reservation_id,
            self.sink.as_ref(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Datelike, Weekday};

    use super::*;
    use crate::catalog::seeded_state;
    use crate::dates::add_days;
    use crate::notify::RecordingSink;

    fn today() -> Day {
        Day::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn session() -> (Session, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let session = Session::new(seeded_state(today()), sink.clone(), today());
        (session, sink)
    }

    #[test]
    fn starts_on_monday_of_current_week() {
        let (s, _) = session();
        assert_eq!(s.week_start(), Day::from_ymd_opt(2026, 10, 12).unwrap());
        assert_eq!(s.visible_days().len(), 7);
        assert_eq!(s.week_label(), "Oct 12 - Oct 18, 2026");
    }

    #[test]
    fn week_navigation_lands_on_mondays() {
        let (mut s, _) = session();
        assert!(s.next_week());
        assert_eq!(s.week_start().weekday(), Weekday::Mon);
        assert_eq!(s.week_start(), Day::from_ymd_opt(2026, 10, 19).unwrap());
        assert!(s.previous_week());
        assert!(s.previous_week());
        assert_eq!(s.week_start(), Day::from_ymd_opt(2026, 10, 5).unwrap());
        s.go_to_week_of(today());
        assert_eq!(s.week_start(), Day::from_ymd_opt(2026, 10, 12).unwrap());
    }

    #[test]
    fn week_navigation_stops_at_end_of_calendar() {
        let sink = Arc::new(RecordingSink::new());
        let mut s = Session::new(seeded_state(today()), sink, Day::MAX);
        let last_week = s.week_start();

        assert!(!s.next_week());
        assert_eq!(s.week_start(), last_week);
        assert!(!s.week_label().is_empty());
        assert!(!s.visible_days().is_empty());

        assert!(s.previous_week());
        assert!(s.next_week());
        assert_eq!(s.week_start(), last_week);
    }

    #[test]
    fn operator_cannot_mutate() {
        let (mut s, sink) = session();
        s.set_role(Role::Operator);
        let existing = s.state().reservations()[0].id;

        let req = NewReservation::new("eq3", today(), "p1", "s1", "Ana");
        assert_matches!(s.create_reservation(req), Err(CoreError::Forbidden(_)));
        assert_matches!(
            s.move_reservation(existing, add_days(today(), 2)),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(s.cancel_reservation(existing), Err(CoreError::Forbidden(_)));

        assert_eq!(s.state().reservations().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn admin_can_create_and_cancel() {
        let (s, _) = session();
        let mut s = s.with_role(Role::Admin);
        let created = s
            .create_reservation(NewReservation::new("eq3", today(), "p1", "s1", "Ana"))
            .unwrap();
        assert_eq!(s.state().reservations().len(), 2);

        let removed = s.cancel_reservation(created.id).unwrap();
        assert_eq!(removed.map(|r| r.id), Some(created.id));
        assert_eq!(s.state().reservations().len(), 1);
    }

    #[test]
    fn grid_follows_filters_but_report_does_not() {
        let (mut s, _) = session();
        s.set_type_filter(TypeFilter::parse("Excavator"));

        let grid = s.grid();
        assert_eq!(grid.rows.len(), 1);
        assert_eq!(grid.rows[0].equipment_id, "eq2");

        let report = s.report();
        assert_eq!(report.rows.len(), 4);
        // eq2 reserved 1 of 7 days -> 14; others 0 -> overall round(14/4) = 4
        assert_eq!(report.rows[1].utilization, 14);
        assert_eq!(report.overall, 4);
    }

    #[test]
    fn search_narrows_visible_equipment() {
        let (mut s, _) = session();
        s.set_search("mixer");
        let ids: Vec<&str> = s.visible_equipment().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["eq4"]);
    }
}
