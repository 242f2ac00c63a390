/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (contract periods, invoice due dates).
pub type Date = chrono::NaiveDate;

/// Monetary amounts are whole yen.
pub type Yen = i64;
