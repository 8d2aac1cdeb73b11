//! The single owned container for all scheduling data.
//!
//! Equipment, projects and sites are fixed at construction. Reservations are
//! only mutated through [`crate::rules`], which is why the mutable accessors
//! are crate-private.

use serde::Serialize;

use crate::model::{Equipment, Project, Reservation, Site};
use crate::types::{Day, ReservationId};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleState {
    equipment: Vec<Equipment>,
    projects: Vec<Project>,
    sites: Vec<Site>,
    reservations: Vec<Reservation>,
}

impl ScheduleState {
    /// Create a state with the given reference data and no reservations.
    pub fn new(equipment: Vec<Equipment>, projects: Vec<Project>, sites: Vec<Site>) -> Self {
        Self {
            equipment,
            projects,
            sites,
            reservations: Vec::new(),
        }
    }

    // -- reference data -------------------------------------------------------

    pub fn equipment(&self) -> &[Equipment] {
        &self.equipment
    }

    pub fn find_equipment(&self, id: &str) -> Option<&Equipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn find_project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn find_site(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    /// Distinct equipment types in first-seen order, for the type filter.
    pub fn equipment_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for eq in &self.equipment {
            if !types.contains(&eq.equipment_type.as_str()) {
                types.push(&eq.equipment_type);
            }
        }
        types
    }

    // -- reservations ---------------------------------------------------------

    /// All reservations in creation order.
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn find_reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// The reservation holding the (equipment, day) slot, if any.
    pub fn reservation_at(&self, equipment_id: &str, day: Day) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.occupies(equipment_id, day))
    }

    pub(crate) fn push_reservation(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    pub(crate) fn reservation_mut(&mut self, id: ReservationId) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.id == id)
    }

    pub(crate) fn remove_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        let index = self.reservations.iter().position(|r| r.id == id)?;
        Some(self.reservations.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_by_id() {
        let state = ScheduleState::new(
            vec![Equipment::new("eq1", "Crane", "Crane")],
            vec![Project::new("p1", "Tower")],
            vec![Site::new("s1", "North", "120 North Ave")],
        );
        assert_eq!(state.find_equipment("eq1").map(|e| e.name.as_str()), Some("Crane"));
        assert!(state.find_equipment("eq2").is_none());
        assert!(state.find_project("p1").is_some());
        assert!(state.find_site("s1").is_some());
        assert!(state.reservations().is_empty());
    }

    #[test]
    fn equipment_types_are_distinct_in_order() {
        let state = ScheduleState::new(
            vec![
                Equipment::new("a", "A", "Crane"),
                Equipment::new("b", "B", "Mixer"),
                Equipment::new("c", "C", "Crane"),
            ],
            vec![],
            vec![],
        );
        assert_eq!(state.equipment_types(), vec!["Crane", "Mixer"]);
    }
}
