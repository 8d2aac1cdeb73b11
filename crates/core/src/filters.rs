//! Equipment list filtering: free-text search plus an exact type filter.

use serde::{Deserialize, Serialize};

use crate::model::Equipment;

/// Type filter value meaning "no type restriction".
pub const TYPE_ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    /// Parse a dropdown value; `"all"` clears the filter.
    pub fn parse(value: &str) -> Self {
        if value == TYPE_ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    fn matches(&self, equipment_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(t) => t == equipment_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentFilter {
    pub search: String,
    pub equipment_type: TypeFilter,
}

impl EquipmentFilter {
    /// Whether `equipment` passes both filters.
    ///
    /// The search is trimmed and matched case-insensitively as a substring of
    /// the name or the type. An empty search matches everything.
    pub fn matches(&self, equipment: &Equipment) -> bool {
        let query = self.search.trim().to_lowercase();
        let matches_query = query.is_empty()
            || equipment.name.to_lowercase().contains(&query)
            || equipment.equipment_type.to_lowercase().contains(&query);
        matches_query && self.equipment_type.matches(&equipment.equipment_type)
    }

    /// Keep the equipment that passes, in the original order.
    pub fn apply<'a>(&self, equipment: &'a [Equipment]) -> Vec<&'a Equipment> {
        equipment.iter().filter(|e| self.matches(e)).collect()
    }
}
