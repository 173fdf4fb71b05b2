//! Persistent incident storage.

mod sqlite;

pub use sqlite::{SqliteIncidentStore, SqliteIncidentStoreError, timestamp_now};
