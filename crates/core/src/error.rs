use std::fmt;

use serde::{Deserialize, Serialize};

/// Reason a slot cannot be reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// Equipment is out for planned service on that day.
    Maintenance,
    /// Another reservation already holds the slot.
    Reserved,
}

impl ConflictKind {
    /// Return the wire string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Reserved => "reserved",
        }
    }

    /// Short human-readable reason, used in user-facing notices.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Maintenance => "Maintenance scheduled",
            Self::Reserved => "Already reserved",
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Scheduling conflict: {0}")]
    Conflict(ConflictKind),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// The conflict kind, if this error is a scheduling conflict.
    pub fn conflict(&self) -> Option<ConflictKind> {
        match self {
            Self::Conflict(kind) => Some(*kind),
            _ => None,
        }
    }
}
