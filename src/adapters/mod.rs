//! External system integrations for medroi.
//!
//! - [`pdf`] - PDF report rendering with printpdf
//! - [`google`] - Google Drive upload and Google Sheets tracking over REST
//!
//! # Design Pattern
//!
//! The Google adapters sit behind the [`google::ReportStore`] and
//! [`google::SubmissionLog`] traits so the report pipeline can be tested with
//! in-memory implementations.
//!
//! ```rust,no_run
//! use medroi::adapters::google::GoogleServices;
//! use medroi::config::{secret_string, GoogleConfig};
//!
//! # fn example() -> medroi::domain::Result<()> {
//! let config = GoogleConfig {
//!     enabled: true,
//!     access_token: Some(secret_string("ya29.token".to_string())),
//!     drive_root_folder_id: "root-folder-id".to_string(),
//!     spreadsheet_id: Some("spreadsheet-id".to_string()),
//!     ..GoogleConfig::default()
//! };
//!
//! let services = GoogleServices::from_config(&config)?;
//! assert!(services.is_some());
//! # Ok(())
//! # }
//! ```

pub mod google;
pub mod pdf;
