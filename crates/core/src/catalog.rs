//! Built-in demo catalog: equipment, projects, sites and one sample booking.
//!
//! Maintenance days are placed relative to `today` so the demo always shows
//! conflicts in the current and following weeks.

use crate::dates::add_days;
use crate::model::{Equipment, NewReservation, Project, Site};
use crate::rules::seed_reservation;
use crate::state::ScheduleState;
use crate::types::Day;

pub fn default_projects() -> Vec<Project> {
    vec![
        Project::new("p1", "Downtown Tower"),
        Project::new("p2", "Riverside Bridge"),
        Project::new("p3", "Logistics Hub"),
    ]
}

pub fn default_sites() -> Vec<Site> {
    vec![
        Site::new("s1", "Site A - North District", "120 North Ave"),
        Site::new("s2", "Site B - Riverside", "780 River Rd"),
        Site::new("s3", "Site C - Industrial Park", "42 Workline St"),
    ]
}

pub fn default_equipment(today: Day) -> Vec<Equipment> {
    vec![
        Equipment::new("eq1", "Crawler Crane CC-3000", "Crane")
            .with_image("https://images.unsplash.com/photo-1483721310020-03333e577078?q=80&w=1280&auto=format&fit=crop")
            .with_spec("capacity", "300t")
            .with_spec("boomLength", "60m")
            .with_spec("fuel", "Diesel")
            .with_maintenance(add_days(today, 3))
            .with_maintenance(add_days(today, 20)),
        Equipment::new("eq2", "Excavator EX-90", "Excavator")
            .with_image("https://images.unsplash.com/photo-1558981285-6f0c94958bb6?q=80&w=1280&auto=format&fit=crop")
            .with_spec("bucket", "1.2 m³")
            .with_spec("reach", "9.5m")
            .with_spec("fuel", "Diesel")
            .with_maintenance(add_days(today, 1)),
        Equipment::new("eq3", "Telehandler TH-12", "Telehandler")
            .with_image("https://images.unsplash.com/photo-1707054665055-387625df43b1?w=1600&auto=format&fit=crop&q=80")
            .with_spec("liftHeight", "12m")
            .with_spec("capacity", "3.5t")
            .with_spec("fuel", "Hybrid"),
        Equipment::new("eq4", "Concrete Mixer MX-500", "Mixer")
            .with_image("https://images.unsplash.com/photo-1563974876412-77c51386dcad?w=1600&auto=format&fit=crop&q=80")
            .with_spec("drum", "9 m³")
            .with_spec("power", "250 HP")
            .with_spec("fuel", "Diesel")
            .with_maintenance(add_days(today, 5)),
    ]
}

/// Reference data only, no reservations.
pub fn default_state(today: Day) -> ScheduleState {
    ScheduleState::new(default_equipment(today), default_projects(), default_sites())
}

/// Reference data plus the sample reservation: the excavator booked today
/// for Riverside Bridge.
pub fn seeded_state(today: Day) -> ScheduleState {
    let mut state = default_state(today);
    let sample = NewReservation::new("eq2", today, "p2", "s2", "Sam O.");
    if let Err(e) = seed_reservation(&mut state, sample) {
        tracing::warn!(error = %e, "Failed to seed sample reservation");
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::detect_conflict;
    use crate::ConflictKind;

    fn today() -> Day {
        Day::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn catalog_sizes() {
        let state = default_state(today());
        assert_eq!(state.equipment().len(), 4);
        assert_eq!(state.projects().len(), 3);
        assert_eq!(state.sites().len(), 3);
        assert!(state.reservations().is_empty());
        assert!(state.equipment().iter().all(|e| e.image.is_some()));
    }

    #[test]
    fn excavator_is_in_service_tomorrow() {
        let state = default_state(today());
        assert_eq!(
            detect_conflict(&state, "eq2", add_days(today(), 1)).unwrap(),
            Some(ConflictKind::Maintenance)
        );
    }

    #[test]
    fn seeded_state_books_excavator_today() {
        let state = seeded_state(today());
        let res = state.reservation_at("eq2", today()).unwrap();
        assert_eq!(res.project_id, "p2");
        assert_eq!(res.site_id, "s2");
        assert_eq!(res.operator_name, "Sam O.");
    }
}
