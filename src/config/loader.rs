//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::MedRoiConfig;
use super::secret::secret_string;
use crate::domain::errors::MedRoiError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedRoiConfig
/// 4. Applies environment variable overrides (MEDROI_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`MedRoiError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, the TOML is malformed, or
/// validation fails.
///
/// # Examples
///
/// ```no_run
/// use medroi::config::loader::load_config;
///
/// let config = load_config("medroi.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedRoiConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedRoiError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedRoiError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Same as [`load_config`], from an in-memory TOML document
pub fn load_config_str(contents: &str) -> Result<MedRoiConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MedRoiConfig = toml::from_str(&contents)
        .map_err(|e| MedRoiError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        MedRoiError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MedRoiError::Other(format!("Invalid placeholder pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(MedRoiError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the MEDROI_* prefix
///
/// Variables follow the pattern MEDROI_<SECTION>_<KEY>, for example
/// MEDROI_GOOGLE_ACCESS_TOKEN or MEDROI_REPORT_OUTPUT_DIR. Values that do
/// not parse are ignored.
fn apply_env_overrides(config: &mut MedRoiConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("MEDROI_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDROI_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Report overrides
    if let Ok(val) = std::env::var("MEDROI_REPORT_OUTPUT_DIR") {
        config.report.output_dir = val;
    }
    if let Ok(val) = std::env::var("MEDROI_REPORT_TIMEZONE_OFFSET_HOURS") {
        if let Ok(hours) = val.parse() {
            config.report.timezone_offset_hours = hours;
        }
    }
    if let Ok(val) = std::env::var("MEDROI_REPORT_CURRENCY_SYMBOL") {
        config.report.currency_symbol = val;
    }

    // Google overrides
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_ENABLED") {
        config.google.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_ACCESS_TOKEN") {
        config.google.access_token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_DRIVE_API_BASE_URL") {
        config.google.drive_api_base_url = val;
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_SHEETS_API_BASE_URL") {
        config.google.sheets_api_base_url = val;
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_DRIVE_ROOT_FOLDER_ID") {
        config.google.drive_root_folder_id = val;
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_SPREADSHEET_ID") {
        config.google.spreadsheet_id = Some(val);
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_SHEET_NAME") {
        config.google.sheet_name = val;
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_TIMEOUT_SECONDS") {
        if let Ok(seconds) = val.parse() {
            config.google.timeout_seconds = seconds;
        }
    }
    if let Ok(val) = std::env::var("MEDROI_GOOGLE_RETRY_MAX_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.google.retry.max_retries = retries;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDROI_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("MEDROI_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDROI_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("MEDROI_LOADER_TEST_VAR", "test_value");
        let input = "access_token = \"${MEDROI_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result.trim_end(), "access_token = \"test_value\"");
        std::env::remove_var("MEDROI_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("MEDROI_LOADER_MISSING_VAR");
        let input = "access_token = \"${MEDROI_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("MEDROI_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("MEDROI_LOADER_COMMENTED_VAR");
        let input = "# access_token = \"${MEDROI_LOADER_COMMENTED_VAR}\"\n[report]";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${MEDROI_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(MedRoiError::Configuration(_))));
    }

    #[test]
    fn test_load_config_empty_uses_defaults() {
        let config = load_config_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.report.output_dir, "reports");
        assert!(!config.google.enabled);
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[report]
output_dir = "out"
currency_symbol = "IDR"

[google]
enabled = true
access_token = "ya29.test"
drive_root_folder_id = "1AbCdEf"
spreadsheet_id = "sheet-123"
sheet_name = "Leads"

[google.retry]
max_retries = 5
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.report.output_dir, "out");
        assert_eq!(config.report.currency_symbol, "IDR");
        assert_eq!(
            config.google.access_token.as_ref().unwrap().expose_secret(),
            "ya29.test"
        );
        assert_eq!(config.google.spreadsheet_id.as_deref(), Some("sheet-123"));
        assert_eq!(config.google.retry.max_retries, 5);
        assert_eq!(config.google.retry.initial_delay_ms, 1000);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let err = load_config_str("[google]\nenabled = true\n").unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }
}
