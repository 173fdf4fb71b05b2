//! Access to persisted incident reports.
//!
//! [`IncidentStore`] exposes the read-only snapshot used while scoring, and
//! [`IncidentSink`] accepts new reports. Keeping the two apart lets the
//! safe-route pipeline depend on reads alone.

use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use crate::{IncidentRecord, IncidentReport, NewIncident};

/// Errors raised by incident persistence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IncidentStoreError {
    /// Reading the incident snapshot failed.
    #[error("failed to read incidents: {message}")]
    Read {
        /// Description of the underlying failure.
        message: String,
    },
    /// Recording a new incident failed.
    #[error("failed to record incident: {message}")]
    Write {
        /// Description of the underlying failure.
        message: String,
    },
}

/// Read every stored incident report.
///
/// The returned collection is a point-in-time snapshot. Its order carries no
/// meaning. Implementors supply [`IncidentStore::list_all`]; the scoring view
/// in [`IncidentStore::fetch_all`] is derived from it.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use saferoute_core::{IncidentRecord, IncidentStore, IncidentStoreError};
///
/// struct EmptyStore;
///
/// #[async_trait]
/// impl IncidentStore for EmptyStore {
///     async fn list_all(&self) -> Result<Vec<IncidentRecord>, IncidentStoreError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Return every stored row as held, including rows without a usable
    /// position.
    async fn list_all(&self) -> Result<Vec<IncidentRecord>, IncidentStoreError>;

    /// Return the reports that can be placed on the map.
    ///
    /// Rows whose coordinates are missing or non-numeric are left out.
    async fn fetch_all(&self) -> Result<Vec<IncidentReport>, IncidentStoreError> {
        let records = self.list_all().await?;
        let total = records.len();
        let reports: Vec<IncidentReport> =
            records.iter().filter_map(IncidentRecord::to_report).collect();
        if reports.len() < total {
            debug!(
                "skipped {} incident rows without a usable position",
                total - reports.len()
            );
        }
        Ok(reports)
    }
}

/// Persist new incident reports.
#[async_trait]
pub trait IncidentSink: Send + Sync {
    /// Store `incident` and return its assigned identifier.
    async fn record(&self, incident: NewIncident) -> Result<i64, IncidentStoreError>;
}
