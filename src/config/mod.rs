//! Configuration management for medroi.
//!
//! `medroi.toml` is read, `${VAR_NAME}` placeholders are substituted from
//! the environment, `MEDROI_*` variables override individual keys, and the
//! result is validated.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medroi::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medroi.toml")?;
//! println!("Reports go to {}", config.report.output_dir);
//! if config.google.enabled {
//!     println!("Uploading under {}", config.google.drive_root_folder_id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level and dry run
//! - [`ReportConfig`] - output directory, time zone, currency, title
//! - [`GoogleConfig`] - Drive upload and Sheets tracking, with [`RetryConfig`]
//! - [`LoggingConfig`] - optional rolling JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [report]
//! output_dir = "reports"
//! timezone_offset_hours = 7
//!
//! [google]
//! enabled = true
//! access_token = "${GOOGLE_ACCESS_TOKEN}"
//! drive_root_folder_id = "1AbCdEfGhIjKlMn"
//! spreadsheet_id = "1XyZ..."
//! sheet_name = "Sheet1"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_str};
pub use schema::{
    ApplicationConfig, GoogleConfig, LoggingConfig, MedRoiConfig, ReportConfig, RetryConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
