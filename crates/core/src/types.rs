/// All entity ids are opaque UUID strings.
///
/// The sync protocol compares `screenId` values as strings, so ids stay
/// strings from the database row to the wire.
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
