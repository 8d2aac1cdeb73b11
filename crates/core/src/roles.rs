//! Well-known role names and the edit permission they carry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_SCHEDULER: &str = "scheduler";
pub const ROLE_OPERATOR: &str = "operator";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_SCHEDULER, ROLE_OPERATOR];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    #[default]
    Scheduler,
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Scheduler => ROLE_SCHEDULER,
            Self::Operator => ROLE_OPERATOR,
        }
    }

    /// Admins and schedulers may create, move and cancel reservations.
    /// Operators only view.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Admin | Self::Scheduler)
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_SCHEDULER => Ok(Self::Scheduler),
            ROLE_OPERATOR => Ok(Self::Operator),
            other => Err(CoreError::Validation(format!(
                "Unknown role: '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
