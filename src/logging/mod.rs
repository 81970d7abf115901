//! Logging and observability
//!
//! Structured logging through `tracing`, with console output and optional
//! JSON log files rotated by `tracing-appender`. The macros below keep the
//! field names of recurring events consistent.
//!
//! # Example
//!
//! ```no_run
//! use medroi::config::LoggingConfig;
//! use medroi::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(hospital = "RS Sehat", "Calculation requested");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard, LOG_FILE_NAME};

/// Log a finished projection
///
/// # Example
///
/// ```no_run
/// use medroi::log_calculation_complete;
/// use std::time::Duration;
///
/// log_calculation_complete!("RS Sehat", "year 3", "100.0%", Duration::from_millis(2));
/// ```
#[macro_export]
macro_rules! log_calculation_complete {
    ($hospital:expr, $break_even:expr, $roi:expr, $duration:expr) => {
        tracing::info!(
            hospital = %$hospital,
            break_even = %$break_even,
            total_roi = %$roi,
            duration_ms = $duration.as_millis() as u64,
            "Calculation completed"
        );
    };
}

/// Log a report upload
///
/// # Example
///
/// ```no_run
/// use medroi::log_upload_complete;
///
/// log_upload_complete!("240305 RS Sehat Jakarta Budi.pdf", "file-id", 18_432usize);
/// ```
#[macro_export]
macro_rules! log_upload_complete {
    ($file_name:expr, $file_id:expr, $size:expr) => {
        tracing::info!(
            file_name = %$file_name,
            file_id = %$file_id,
            size_bytes = $size,
            "Report uploaded"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use medroi::domain::MedRoiError;
/// use medroi::log_error_with_context;
///
/// let error = MedRoiError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use medroi::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
