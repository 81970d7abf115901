//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the medroi configuration file.

use super::{EXIT_INVALID, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates; a failure here covers both parsing and rules
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_INVALID);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Report Output: {}", config.report.output_dir);
        println!("  Report Timezone: UTC{:+}", config.report.timezone_offset_hours);
        println!("  Google Sync: {}", if config.google.enabled { "enabled" } else { "disabled" });
        if config.google.enabled {
            println!("  Drive Root Folder: {}", config.google.drive_root_folder_id);
            match &config.google.spreadsheet_id {
                Some(id) => println!("  Tracking Sheet: {id} ({})", config.google.sheet_name),
                None => println!("  Tracking Sheet: not configured"),
            }
            println!("  Max Retries: {}", config.google.retry.max_retries);
        }
        if config.logging.local_enabled {
            println!(
                "  Log Files: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let code = ValidateArgs {}
            .execute("definitely-missing-medroi.toml")
            .await
            .unwrap();
        assert_eq!(code, EXIT_INVALID);
    }

    #[tokio::test]
    async fn test_validate_valid_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[report]\noutput_dir = \"out\"\n").unwrap();
        let code = ValidateArgs {}
            .execute(&temp.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
    }
}
