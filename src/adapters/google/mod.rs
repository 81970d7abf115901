//! Google Drive and Sheets integration
//!
//! The pipeline talks to two traits: [`ReportStore`] files the PDF and
//! [`SubmissionLog`] records a tracking row. [`GoogleServices::from_config`]
//! builds the REST-backed implementations; tests substitute their own.

pub mod drive;
pub mod http;
pub mod models;
pub mod sheets;

use crate::config::GoogleConfig;
use crate::domain::{HospitalInfo, Result};
use async_trait::async_trait;
use std::sync::Arc;

pub use drive::GoogleDriveClient;
pub use models::StoredReport;
pub use sheets::{sheet_row, GoogleSheetsClient, SHEET_COLUMNS};

/// Stores rendered reports, one folder per hospital
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Files `pdf` as `file_name` in the hospital's folder
    async fn store_report(
        &self,
        hospital: &HospitalInfo,
        file_name: &str,
        pdf: &[u8],
    ) -> Result<StoredReport>;
}

/// Append-only log of submissions
#[async_trait]
pub trait SubmissionLog: Send + Sync {
    async fn append_row(&self, row: Vec<String>) -> Result<()>;
}

/// The collaborators enabled by configuration
#[derive(Clone)]
pub struct GoogleServices {
    pub store: Arc<dyn ReportStore>,
    pub log: Option<Arc<dyn SubmissionLog>>,
}

impl GoogleServices {
    /// Builds Drive and Sheets clients, or `None` when Google is disabled
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a client cannot be built.
    pub fn from_config(config: &GoogleConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let store: Arc<dyn ReportStore> = Arc::new(GoogleDriveClient::new(config)?);
        let log = GoogleSheetsClient::from_config(config)?
            .map(|client| Arc::new(client) as Arc<dyn SubmissionLog>);

        tracing::debug!(
            root_folder = %config.drive_root_folder_id,
            sheets_enabled = log.is_some(),
            "Google services configured"
        );

        Ok(Some(Self { store, log }))
    }
}
