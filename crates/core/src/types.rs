/// Caller-assigned identifier for equipment, projects and sites (e.g. `eq1`).
pub type EntityId = String;

/// Generated identifier for reservations.
pub type ReservationId = uuid::Uuid;

/// Generated identifier for transient notices.
pub type NoticeId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A calendar day, the unit of scheduling.
pub type Day = chrono::NaiveDate;

/// Generate a new time-ordered unique identifier.
pub fn new_id() -> uuid::Uuid {
    uuid::Uuid::now_v7()
}
