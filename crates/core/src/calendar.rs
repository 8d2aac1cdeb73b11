//! Week grid: one row per equipment, one cell per visible day.

use serde::{Deserialize, Serialize};

use crate::dates::iso_date;
use crate::model::Equipment;
use crate::state::ScheduleState;
use crate::types::{Day, EntityId, ReservationId};

/// What a grid cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    Available,
    Reserved,
    Maintenance,
}

impl CellStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Reserved => "Reserved",
            Self::Maintenance => "Maintenance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub date: Day,
    pub status: CellStatus,
    /// The reservation holding this slot, if any.
    pub reservation_id: Option<ReservationId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRow {
    pub equipment_id: EntityId,
    pub name: String,
    pub equipment_type: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekGrid {
    pub days: Vec<Day>,
    pub rows: Vec<GridRow>,
}

/// Status of one slot. Maintenance wins over a reservation.
pub fn cell_status(state: &ScheduleState, equipment: &Equipment, day: Day) -> CellStatus {
    if equipment.is_under_maintenance(day) {
        CellStatus::Maintenance
    } else if state.reservation_at(&equipment.id, day).is_some() {
        CellStatus::Reserved
    } else {
        CellStatus::Available
    }
}

/// Build the grid for `equipment` (already filtered) over `days`.
pub fn build_week_grid(state: &ScheduleState, equipment: &[&Equipment], days: &[Day]) -> WeekGrid {
    let rows = equipment
        .iter()
        .map(|eq| GridRow {
            equipment_id: eq.id.clone(),
            name: eq.name.clone(),
            equipment_type: eq.equipment_type.clone(),
            cells: days
                .iter()
                .map(|&date| GridCell {
                    date,
                    status: cell_status(state, eq, date),
                    reservation_id: state.reservation_at(&eq.id, date).map(|r| r.id),
                })
                .collect(),
        })
        .collect();

    WeekGrid {
        days: days.to_vec(),
        rows,
    }
}

impl WeekGrid {
    /// Plain-text rendering, one line per equipment, for logs and the demo.
    pub fn render_text(&self) -> String {
        let mut out = format!("{:<24}", "Equipment");
        for d in &self.days {
            out.push_str(&format!(" {:<11}", iso_date(*d)));
        }
        for row in &self.rows {
            out.push('\n');
            out.push_str(&format!("{:<24}", truncate(&row.name, 24)));
            for cell in &row.cells {
                out.push_str(&format!(" {:<11}", cell.status.label()));
            }
        }
        out
    }
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
