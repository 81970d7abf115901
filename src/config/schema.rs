//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid local-only
//! configuration. The Google section is validated only when enabled.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration, mapped from `medroi.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedRoiConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Report rendering settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Google Drive and Sheets integration
    #[serde(default)]
    pub google: GoogleConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MedRoiConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.report.validate()?;
        self.google.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (compute and render, but never call Google)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Report rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory the PDF is written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Whole-hour UTC offset for timestamps and file name dates (WIB = 7)
    #[serde(default = "default_timezone_offset_hours")]
    pub timezone_offset_hours: i32,

    /// Currency symbol placed before amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Report title; the hospital name is appended
    #[serde(default = "default_title")]
    pub title: String,

    /// Organization named in the footer
    #[serde(default = "default_organization")]
    pub organization: String,
}

impl ReportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.output_dir.trim().is_empty() {
            return Err("report.output_dir cannot be empty".to_string());
        }

        if !(-12..=14).contains(&self.timezone_offset_hours) {
            return Err(format!(
                "report.timezone_offset_hours must be between -12 and 14, got {}",
                self.timezone_offset_hours
            ));
        }

        if self.title.trim().is_empty() {
            return Err("report.title cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            timezone_offset_hours: default_timezone_offset_hours(),
            currency_symbol: default_currency_symbol(),
            title: default_title(),
            organization: default_organization(),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "google.retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(
                "google.retry.initial_delay_ms cannot exceed google.retry.max_delay_ms"
                    .to_string(),
            );
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Google Drive and Sheets configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// Upload reports and append tracking rows
    #[serde(default)]
    pub enabled: bool,

    /// OAuth2 bearer token with Drive and Sheets scopes
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// Base URL for Drive v3 calls
    #[serde(default = "default_drive_api_base_url")]
    pub drive_api_base_url: String,

    /// Base URL for Sheets v4 calls
    #[serde(default = "default_sheets_api_base_url")]
    pub sheets_api_base_url: String,

    /// Folder that holds one subfolder per hospital
    #[serde(default)]
    pub drive_root_folder_id: String,

    /// Tracking spreadsheet; rows are not appended when unset
    #[serde(default)]
    pub spreadsheet_id: Option<String>,

    /// Worksheet inside the tracking spreadsheet
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl GoogleConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if !self.enabled {
            return Ok(());
        }

        if self
            .access_token
            .as_ref()
            .map(|t| t.expose_secret().is_empty())
            .unwrap_or(true)
        {
            return Err("google.access_token cannot be empty when google.enabled = true".to_string());
        }

        if self.drive_root_folder_id.trim().is_empty() {
            return Err(
                "google.drive_root_folder_id cannot be empty when google.enabled = true"
                    .to_string(),
            );
        }

        for (name, url) in [
            ("google.drive_api_base_url", &self.drive_api_base_url),
            ("google.sheets_api_base_url", &self.sheets_api_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{name} must start with http:// or https://"));
            }
        }

        if self.spreadsheet_id.is_some() && self.sheet_name.trim().is_empty() {
            return Err("google.sheet_name cannot be empty when spreadsheet_id is set".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("google.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            access_token: None,
            drive_api_base_url: default_drive_api_base_url(),
            sheets_api_base_url: default_sheets_api_base_url(),
            drive_root_folder_id: String::new(),
            spreadsheet_id: None,
            sheet_name: default_sheet_name(),
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    "reports".to_string()
}

fn default_timezone_offset_hours() -> i32 {
    crate::core::format::WIB_OFFSET_HOURS
}

fn default_currency_symbol() -> String {
    "Rp".to_string()
}

fn default_title() -> String {
    "AI Voice ROI Analysis Report".to_string()
}

fn default_organization() -> String {
    "Medical AI Solutions".to_string()
}

fn default_drive_api_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_sheets_api_base_url() -> String {
    "https://sheets.googleapis.com".to_string()
}

fn default_sheet_name() -> String {
    "Sheet1".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
