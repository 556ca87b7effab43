/// Tag primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Notes are keyed by a UUID string assigned by storage at creation time.
pub type NoteUuid = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
