//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file and, optionally, a sample submission.

use super::{EXIT_FATAL, EXIT_INVALID, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "medroi.toml")]
    pub output: String,

    /// Also write a sample submission to this path
    #[arg(long, value_name = "PATH")]
    pub submission: Option<String>,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing medroi configuration");
        println!();

        let mut targets = vec![(self.output.as_str(), self.config_content())];
        if let Some(path) = &self.submission {
            targets.push((path.as_str(), Self::generate_sample_submission()));
        }

        for (path, _) in &targets {
            if Path::new(path).exists() && !self.force {
                println!("❌ File already exists: {path}");
                println!("   Use --force to overwrite");
                return Ok(EXIT_INVALID);
            }
        }

        for (path, content) in &targets {
            if let Err(e) = fs::write(path, content) {
                println!("❌ Failed to write {path}");
                println!("   Error: {e}");
                return Ok(EXIT_FATAL);
            }
            println!("✅ Created: {path}");
        }

        println!();
        println!("Next steps:");
        println!("  1. Edit {} with your settings", self.output);
        println!("  2. To upload reports, set google.enabled = true and export GOOGLE_ACCESS_TOKEN");
        println!("     (a .env file in the working directory is loaded automatically)");
        println!("  3. Validate configuration: medroi validate-config");
        match &self.submission {
            Some(path) => println!("  4. Run a calculation: medroi calculate --input {path}"),
            None => println!("  4. Run a calculation: medroi calculate --input <submission.toml>"),
        }
        println!();
        Ok(EXIT_OK)
    }

    fn config_content(&self) -> String {
        if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# medroi configuration

[application]
log_level = "info"
dry_run = false

[report]
output_dir = "reports"
timezone_offset_hours = 7
currency_symbol = "Rp"

[google]
enabled = false
# access_token = "${GOOGLE_ACCESS_TOKEN}"
# drive_root_folder_id = "your-root-folder-id"
# spreadsheet_id = "your-spreadsheet-id"
sheet_name = "Sheet1"

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# medroi configuration
#
# Every key is optional. Values of the form ${VAR} are read from the
# environment, and MEDROI_<SECTION>_<KEY> variables override single keys
# (for example MEDROI_GOOGLE_ACCESS_TOKEN).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (render reports, never call Google)
dry_run = false

# ============================================================================
# Report
# ============================================================================
[report]
# Directory for generated PDFs
output_dir = "reports"

# Whole-hour UTC offset for timestamps and file names (7 = WIB)
timezone_offset_hours = 7

# Currency symbol placed before amounts
currency_symbol = "Rp"

# Report title; the hospital name is appended
title = "AI Voice ROI Analysis Report"

# Organization shown in the footer
organization = "Medical AI Solutions"

# ============================================================================
# Google Drive and Sheets
# ============================================================================
[google]
enabled = false

# OAuth2 access token with the drive and spreadsheets scopes
# access_token = "${GOOGLE_ACCESS_TOKEN}"

# Reports are filed under <root>/<Hospital Name - Location>/
# drive_root_folder_id = "your-root-folder-id"

# One row per submission is appended when a spreadsheet is set
# spreadsheet_id = "your-spreadsheet-id"
sheet_name = "Sheet1"

# Request timeout in seconds
timeout_seconds = 60

[google.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }

    /// Sample submission using the default hospital operating parameters
    fn generate_sample_submission() -> String {
        r#"# medroi submission
#
# Provide either [operations] (figures are derived) or [financials]
# (figures entered directly), not both.

growth_rate = 0.0

[hospital]
name = "RS Sehat Sentosa"
location = "Jakarta"

[consultant]
name = "Budi Santoso"
email = "budi@example.com"
phone = "081234567890"

[operations]
total_staff = 200
admin_staff = 20
monthly_appointments = 5000
noshow_rate = 0.15
avg_admin_salary = 8000000
revenue_per_appointment = 250000
staff_workload_reduction = 0.30
noshow_reduction = 0.40
exchange_rate = 16000
setup_cost_usd = 20000
integration_cost_usd = 15000
training_cost_usd = 10000
maintenance_cost_monthly = 5000000

# [financials]
# initial_investment = 720000000
# annual_subscription_cost = 60000000
# annual_revenue_uplift = 900000000
# annual_operational_savings = 576000000
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_str;
    use crate::domain::Submission;

    #[test]
    fn test_generated_configs_load() {
        let minimal = load_config_str(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(minimal.report.output_dir, "reports");

        let examples = load_config_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert_eq!(examples.google.retry.max_retries, 3);
        assert!(!examples.google.enabled);
    }

    #[test]
    fn test_sample_submission_parses() {
        let submission = Submission::from_toml(&InitArgs::generate_sample_submission()).unwrap();
        assert!(submission.operations.is_some());
        assert!(submission.financials.is_none());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = temp.path().join("medroi.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            submission: None,
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_INVALID);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");
    }

    #[tokio::test]
    async fn test_init_writes_both_files() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = temp.path().join("medroi.toml");
        let submission = temp.path().join("submission.toml");

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            submission: Some(submission.to_string_lossy().to_string()),
            with_examples: true,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_OK);
        assert!(output.exists());
        assert!(submission.exists());
    }
}
