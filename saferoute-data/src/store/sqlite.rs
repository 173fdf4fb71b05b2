//! SQLite-backed incident store.
#![forbid(unsafe_code)]

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use chrono::{SecondsFormat, Utc};
use log::debug;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, Error as SqliteError, OpenFlags};
use saferoute_core::{
    IncidentRecord, IncidentSink, IncidentStore, IncidentStoreError, NewIncident,
};
use serde_json::Value as JsonValue;
use thiserror::Error;

/// Errors raised by [`SqliteIncidentStore`].
#[derive(Debug, Error)]
pub enum SqliteIncidentStoreError {
    /// Failed to create the parent directory for the database file.
    #[error("failed to create parent directory {path:?}")]
    CreateDirectory {
        /// Path of the directory that could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the `crimes` table failed.
    #[error("failed to create crimes table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A statement failed.
    #[error("failed to {operation}")]
    Query {
        /// What the statement was doing.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Incident store persisting reports to the `crimes` table of a SQLite file.
///
/// Each operation opens its own connection, so the store can be shared freely
/// across tasks. Async trait methods run the blocking work on Tokio's
/// blocking pool.
///
/// # Examples
///
/// ```
/// use camino::Utf8PathBuf;
/// use saferoute_core::NewIncident;
/// use saferoute_data::SqliteIncidentStore;
///
/// let dir = tempfile::tempdir().expect("temp dir");
/// let path = Utf8PathBuf::from_path_buf(dir.path().join("crimes.sqlite")).expect("utf-8 path");
/// let store = SqliteIncidentStore::open(&path).expect("open store");
///
/// let id = store
///     .insert(
///         &NewIncident { latitude: 51.5, longitude: -0.12, category: "theft".into() },
///         "2024-05-01T12:00:00.000Z",
///     )
///     .expect("insert");
/// let all = store.read_all().expect("read");
/// assert_eq!(all.len(), 1);
/// assert_eq!(all[0].id, id);
/// assert_eq!(all[0].category, "theft");
/// ```
#[derive(Debug, Clone)]
pub struct SqliteIncidentStore {
    path: Utf8PathBuf,
}

impl SqliteIncidentStore {
    /// Open the database at `path`, creating the file, its parent directory
    /// and the `crimes` table when missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory, file or schema cannot be created.
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteIncidentStoreError> {
        ensure_parent_dir(path)?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| SqliteIncidentStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        create_schema(&connection)?;
        debug!("incident store ready at {path}");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, SqliteIncidentStoreError> {
        Connection::open_with_flags(
            self.path.as_std_path(),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| SqliteIncidentStoreError::Open {
            path: self.path.clone(),
            source,
        })
    }

    /// Read every stored row, ordered by identifier.
    ///
    /// Columns are returned as stored. The table does not enforce column
    /// types, so coordinates may be `NULL` or text; callers decide which rows
    /// they can place.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or queried.
    pub fn read_all(&self) -> Result<Vec<IncidentRecord>, SqliteIncidentStoreError> {
        let connection = self.connect()?;
        let mut statement = connection
            .prepare("SELECT id, latitude, longitude, category, date FROM crimes ORDER BY id")
            .map_err(|source| SqliteIncidentStoreError::Query {
                operation: "prepare incident query",
                source,
            })?;

        let rows = statement
            .query_map([], |row| {
                Ok(IncidentRecord {
                    id: row.get(0)?,
                    latitude: json_value(row.get(1)?),
                    longitude: json_value(row.get(2)?),
                    category: json_value(row.get(3)?),
                    recorded_at: json_value(row.get(4)?),
                })
            })
            .map_err(|source| SqliteIncidentStoreError::Query {
                operation: "query incidents",
                source,
            })?;

        let records = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SqliteIncidentStoreError::Query {
                operation: "decode incident row",
                source,
            })?;
        debug!("read {} incident rows from {}", records.len(), self.path);
        Ok(records)
    }

    /// Insert `incident` stamped with `recorded_at` and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened or written.
    pub fn insert(
        &self,
        incident: &NewIncident,
        recorded_at: &str,
    ) -> Result<i64, SqliteIncidentStoreError> {
        let connection = self.connect()?;
        connection
            .execute(
                "INSERT INTO crimes (latitude, longitude, category, date) VALUES (?1, ?2, ?3, ?4)",
                (
                    incident.latitude,
                    incident.longitude,
                    incident.category.as_str(),
                    recorded_at,
                ),
            )
            .map_err(|source| SqliteIncidentStoreError::Query {
                operation: "insert incident",
                source,
            })?;
        Ok(connection.last_insert_rowid())
    }
}

/// Current UTC time in the RFC 3339 form stored in the `date` column.
#[must_use]
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn json_value(value: SqlValue) -> JsonValue {
    match value {
        SqlValue::Null | SqlValue::Blob(_) => JsonValue::Null,
        SqlValue::Integer(number) => JsonValue::from(number),
        SqlValue::Real(number) => JsonValue::from(number),
        SqlValue::Text(text) => JsonValue::String(text),
    }
}

#[async_trait]
impl IncidentStore for SqliteIncidentStore {
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, IncidentStoreError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.read_all())
            .await
            .map_err(|err| IncidentStoreError::Read {
                message: err.to_string(),
            })?
            .map_err(|err| IncidentStoreError::Read {
                message: error_chain(&err),
            })
    }
}

#[async_trait]
impl IncidentSink for SqliteIncidentStore {
    async fn record(&self, incident: NewIncident) -> Result<i64, IncidentStoreError> {
        let store = self.clone();
        let recorded_at = timestamp_now();
        tokio::task::spawn_blocking(move || store.insert(&incident, &recorded_at))
            .await
            .map_err(|err| IncidentStoreError::Write {
                message: err.to_string(),
            })?
            .map_err(|err| IncidentStoreError::Write {
                message: error_chain(&err),
            })
    }
}

fn error_chain(err: &SqliteIncidentStoreError) -> String {
    match std::error::Error::source(err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    }
}

fn ensure_parent_dir(path: &Utf8Path) -> Result<(), SqliteIncidentStoreError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Utf8Path::new("/") {
        return Ok(());
    }

    let (base_dir, relative) = base_dir_and_relative(parent)?;
    base_dir
        .create_dir_all(&relative)
        .map_err(|source| SqliteIncidentStoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })
}

fn base_dir_and_relative(
    parent: &Utf8Path,
) -> Result<(fs_utf8::Dir, Utf8PathBuf), SqliteIncidentStoreError> {
    let (base, relative) = if parent.is_absolute() {
        ("/", parent.strip_prefix("/").unwrap_or(parent))
    } else {
        (".", parent)
    };

    let dir = fs_utf8::Dir::open_ambient_dir(base, ambient_authority()).map_err(|source| {
        SqliteIncidentStoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        }
    })?;

    Ok((dir, relative.to_path_buf()))
}

fn create_schema(connection: &Connection) -> Result<(), SqliteIncidentStoreError> {
    connection
        .execute(
            "CREATE TABLE IF NOT EXISTS crimes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                latitude REAL,
                longitude REAL,
                category TEXT,
                date TEXT
            )",
            [],
        )
        .map(|_| ())
        .map_err(|source| SqliteIncidentStoreError::CreateSchema { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use saferoute_core::Coordinate;
    use saferoute_core::test_support::block_on;
    use serde_json::json;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn db_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf-8 path")
    }

    fn theft() -> NewIncident {
        NewIncident {
            latitude: 51.5,
            longitude: -0.12,
            category: "theft".to_owned(),
        }
    }

    #[rstest]
    fn creates_parent_directory_and_schema(temp_dir: TempDir) {
        let path = db_path(&temp_dir, "nested/data/database.sqlite");

        let store = SqliteIncidentStore::open(&path).expect("open store");

        assert!(path.exists(), "database file should exist");
        assert_eq!(store.path(), path.as_path());
        assert!(store.read_all().expect("read").is_empty());
    }

    #[rstest]
    fn open_is_idempotent(temp_dir: TempDir) {
        let path = db_path(&temp_dir, "crimes.sqlite");
        let first = SqliteIncidentStore::open(&path).expect("first open");
        first.insert(&theft(), "2024-01-01T00:00:00.000Z").expect("insert");

        let second = SqliteIncidentStore::open(&path).expect("second open");

        assert_eq!(second.read_all().expect("read").len(), 1);
    }

    #[rstest]
    fn inserts_assign_increasing_ids(temp_dir: TempDir) {
        let store = SqliteIncidentStore::open(&db_path(&temp_dir, "crimes.sqlite")).expect("open");

        let first = store.insert(&theft(), "2024-01-01T00:00:00.000Z").expect("insert");
        let second = store.insert(&theft(), "2024-01-02T00:00:00.000Z").expect("insert");

        assert!(second > first);
        let records = store.read_all().expect("read");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first);
        assert_eq!(records[1].recorded_at, json!("2024-01-02T00:00:00.000Z"));
        assert_eq!(records[1].category, json!("theft"));
        assert_eq!(records[1].latitude, json!(51.5));
    }

    fn insert_raw(path: &Utf8Path, values: &str) {
        let conn = Connection::open(path.as_std_path()).expect("open raw connection");
        conn.execute(
            &format!("INSERT INTO crimes (latitude, longitude, category, date) VALUES ({values})"),
            [],
        )
        .expect("insert raw row");
    }

    #[fixture]
    fn mixed_rows(temp_dir: TempDir) -> (TempDir, SqliteIncidentStore) {
        let path = db_path(&temp_dir, "crimes.sqlite");
        let store = SqliteIncidentStore::open(&path).expect("open");
        insert_raw(&path, "NULL, 1.0, 'x', NULL");
        insert_raw(&path, "'abc', 1.0, 'y', NULL");
        insert_raw(&path, "2.0, 3.0, NULL, NULL");
        insert_raw(&path, "'4.5', 6, 'z', '2024-01-01T00:00:00.000Z'");
        (temp_dir, store)
    }

    #[rstest]
    fn listing_keeps_rows_without_position(mixed_rows: (TempDir, SqliteIncidentStore)) {
        let (_dir, store) = mixed_rows;

        let records = block_on(store.list_all()).expect("list");

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].latitude, JsonValue::Null);
        assert_eq!(records[1].latitude, json!("abc"));
        assert_eq!(records[2].category, JsonValue::Null);
        // REAL affinity stores numeric text and integers as reals.
        assert_eq!(records[3].latitude, json!(4.5));
        assert_eq!(records[3].longitude, json!(6.0));
    }

    #[rstest]
    fn scoring_view_holds_only_placeable_rows(mixed_rows: (TempDir, SqliteIncidentStore)) {
        let (_dir, store) = mixed_rows;

        let reports = block_on(store.fetch_all()).expect("fetch");

        let ids: Vec<i64> = reports.iter().map(|report| report.id).collect();
        assert_eq!(ids, vec![3, 4]);
        assert_eq!(reports[0].location(), Coordinate::new(2.0, 3.0));
        assert_eq!(reports[0].category, "");
        assert_eq!(reports[0].recorded_at, "");
        assert_eq!(reports[1].location(), Coordinate::new(4.5, 6.0));
    }

    #[rstest]
    fn timestamps_are_rfc3339_utc() {
        let stamp = timestamp_now();
        assert!(stamp.ends_with('Z'), "expected UTC suffix in {stamp}");
        assert!(chrono::DateTime::parse_from_rfc3339(&stamp).is_ok());
    }

    #[rstest]
    fn missing_database_reads_as_store_error(temp_dir: TempDir) {
        let path = db_path(&temp_dir, "crimes.sqlite");
        let store = SqliteIncidentStore::open(&path).expect("open");
        std::fs::remove_file(path.as_std_path()).expect("remove database");

        let err = store.read_all().expect_err("database removed");

        assert!(matches!(err, SqliteIncidentStoreError::Open { .. }));
    }
}
