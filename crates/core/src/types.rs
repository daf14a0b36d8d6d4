/// A raffle number. Stored as PostgreSQL INTEGER.
pub type SlotNumber = i32;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
