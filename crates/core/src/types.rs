/// All database primary keys are SQLite `INTEGER PRIMARY KEY` rowids.
pub type DbId = i64;

/// Record timestamps keep the UTC offset they were taken in.
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
