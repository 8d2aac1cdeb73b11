//! Domain records: equipment, projects, sites and reservations.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::types::{Day, EntityId, ReservationId, Timestamp};

// ---------------------------------------------------------------------------
// Equipment
// ---------------------------------------------------------------------------

/// A piece of reservable equipment together with its service calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EntityId,
    pub name: String,
    /// Category shown in the type filter, e.g. `"Crane"`.
    #[serde(rename = "type")]
    pub equipment_type: String,
    /// Photo URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Named technical fields, e.g. `capacity -> "300t"`.
    pub specs: BTreeMap<String, String>,
    /// Days on which the equipment is out for planned service.
    pub maintenance: BTreeSet<Day>,
}

impl Equipment {
    /// Create equipment with no specs and an empty maintenance calendar.
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        equipment_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            equipment_type: equipment_type.into(),
            image: None,
            specs: BTreeMap::new(),
            maintenance: BTreeSet::new(),
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Add a technical spec field.
    pub fn with_spec(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.specs.insert(field.into(), value.into());
        self
    }

    /// Add a maintenance day.
    pub fn with_maintenance(mut self, day: Day) -> Self {
        self.maintenance.insert(day);
        self
    }

    /// Whether `day` is on the maintenance calendar.
    pub fn is_under_maintenance(&self, day: Day) -> bool {
        self.maintenance.contains(&day)
    }
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
}

impl Project {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A job site equipment is delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub id: EntityId,
    pub name: String,
    pub address: String,
}

impl Site {
    pub fn new(
        id: impl Into<EntityId>,
        name: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

/// Reservation lifecycle status. Every stored reservation is confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Confirmed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
        }
    }
}

/// One equipment booked for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub equipment_id: EntityId,
    pub date: Day,
    pub project_id: EntityId,
    pub site_id: EntityId,
    pub operator_name: String,
    pub status: ReservationStatus,
    pub created_at: Timestamp,
}

impl Reservation {
    /// Whether this reservation occupies the (equipment, day) slot.
    pub fn occupies(&self, equipment_id: &str, day: Day) -> bool {
        self.equipment_id == equipment_id && self.date == day
    }
}

/// Input for creating a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub equipment_id: EntityId,
    pub date: Day,
    pub project_id: EntityId,
    pub site_id: EntityId,
    pub operator_name: String,
}

impl NewReservation {
    pub fn new(
        equipment_id: impl Into<EntityId>,
        date: Day,
        project_id: impl Into<EntityId>,
        site_id: impl Into<EntityId>,
        operator_name: impl Into<String>,
    ) -> Self {
        Self {
            equipment_id: equipment_id.into(),
            date,
            project_id: project_id.into(),
            site_id: site_id.into(),
            operator_name: operator_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn maintenance_lookup() {
        let eq = Equipment::new("eq1", "Crane", "Crane").with_maintenance(day(15));
        assert!(eq.is_under_maintenance(day(15)));
        assert!(!eq.is_under_maintenance(day(16)));
    }

    #[test]
    fn equipment_serializes_type_field() {
        let eq = Equipment::new("eq3", "Telehandler TH-12", "Telehandler")
            .with_spec("liftHeight", "12m")
            .with_maintenance(day(20));
        let json = serde_json::to_value(&eq).unwrap();
        assert_eq!(json["type"], "Telehandler");
        assert_eq!(json["specs"]["liftHeight"], "12m");
        assert_eq!(json["maintenance"][0], "2026-10-20");
    }

    #[test]
    fn image_is_optional_on_the_wire() {
        let bare = Equipment::new("eq1", "Crane", "Crane");
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("image").is_none());

        let with_photo = bare.clone().with_image("https://img.example/crane.jpg");
        let json = serde_json::to_value(&with_photo).unwrap();
        assert_eq!(json["image"], "https://img.example/crane.jpg");

        let parsed: Equipment = serde_json::from_value(serde_json::json!({
            "id": "eq1",
            "name": "Crane",
            "type": "Crane",
            "specs": {},
            "maintenance": []
        }))
        .unwrap();
        assert_eq!(parsed, bare);
    }

    #[test]
    fn status_defaults_to_confirmed() {
        assert_eq!(ReservationStatus::default().as_str(), "confirmed");
    }
}
