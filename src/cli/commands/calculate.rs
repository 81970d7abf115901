//! Calculate command implementation
//!
//! Reads a submission, prints the projection, renders the PDF and syncs it
//! to Google Drive and Sheets when configured.

use super::{EXIT_COLLABORATOR, EXIT_FATAL, EXIT_INVALID, EXIT_OK};
use crate::config::{load_config, load_config_str, MedRoiConfig};
use crate::core::format::{
    format_break_even, format_currency, format_months, format_percentage, format_timestamp,
};
use crate::core::{ReportOutcome, ReportPipeline};
use crate::domain::{MedRoiError, Submission};
use crate::log_error_with_context;
use clap::Args;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

/// Arguments for the calculate command
#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Submission file (TOML)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Override the report output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the yearly growth rate (e.g. 0.05 for 5%)
    #[arg(long, allow_hyphen_values = true)]
    pub growth_rate: Option<Decimal>,

    /// Skip PDF rendering (also skips upload)
    #[arg(long)]
    pub no_pdf: bool,

    /// Skip Google Drive and Sheets
    #[arg(long)]
    pub no_upload: bool,

    /// Print the projection as JSON
    #[arg(long)]
    pub json: bool,

    /// Dry run mode - compute and render without calling Google
    #[arg(long)]
    pub dry_run: bool,
}

impl CalculateArgs {
    /// Execute the calculate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting calculate command");

        let mut config = match read_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(&e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(EXIT_INVALID);
            }
        };

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.report.output_dir = dir.clone();
        }
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        let mut submission = match Submission::from_file(&self.input) {
            Ok(s) => s,
            Err(e) => {
                log_error_with_context!(&e, "Failed to read submission");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };
        if let Some(rate) = self.growth_rate {
            submission.growth_rate = rate;
        }

        let mut pipeline = ReportPipeline::from_config(&config)?.with_pdf(!self.no_pdf);
        if self.no_upload {
            pipeline = pipeline.with_services(None);
        }

        let outcome = match pipeline.run(&submission).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log_error_with_context!(&e, "Calculation failed");
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&json_report(&outcome))?);
        } else {
            print_summary(&outcome, &config);
        }

        if outcome.is_complete() {
            Ok(EXIT_OK)
        } else {
            for failure in &outcome.failures {
                eprintln!("⚠️  {failure}");
            }
            Ok(EXIT_COLLABORATOR)
        }
    }
}

/// Loads the configuration, falling back to defaults when the file is absent
fn read_config(config_path: &str) -> crate::domain::Result<MedRoiConfig> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        tracing::warn!(
            config_path = %config_path,
            "Configuration file not found, using defaults"
        );
        load_config_str("")
    }
}

fn exit_code_for(error: &MedRoiError) -> i32 {
    match error {
        MedRoiError::Validation { .. } | MedRoiError::Configuration(_) => EXIT_INVALID,
        e if e.is_collaborator_failure() => EXIT_COLLABORATOR,
        _ => EXIT_FATAL,
    }
}

fn json_report(outcome: &ReportOutcome) -> serde_json::Value {
    serde_json::json!({
        "input": outcome.input,
        "projection": outcome.projection,
        "report": {
            "file_name": outcome.file_name,
            "generated_at": outcome.generated_at.to_rfc3339(),
            "local_path": outcome.local_path,
            "drive": outcome.stored,
            "sheet_appended": outcome.sheet_appended,
        },
        "failures": outcome.failures.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
    })
}

fn print_summary(outcome: &ReportOutcome, config: &MedRoiConfig) {
    let symbol = &config.report.currency_symbol;
    let projection = &outcome.projection;

    println!(
        "📊 ROI projection for {} ({})",
        outcome.input.hospital.name, outcome.input.hospital.location
    );
    println!(
        "   Generated {}",
        format_timestamp(&outcome.generated_at, config.report.timezone_offset_hours)
    );
    println!();
    println!(
        "{:>4}  {:>20}  {:>20}  {:>20}",
        "Year", "Gross benefit", "Net cash flow", "Cumulative"
    );
    for year in &projection.years {
        println!(
            "{:>4}  {:>20}  {:>20}  {:>20}",
            year.year,
            format_currency(year.gross_benefit, symbol),
            format_currency(year.net_cash_flow, symbol),
            format_currency(year.cumulative_cash_flow, symbol),
        );
    }
    println!();
    println!(
        "  Initial investment: {}",
        format_currency(projection.initial_investment, symbol)
    );
    println!("  ROI year 1:         {}", format_percentage(projection.first_year_roi));
    println!("  ROI 5 years:        {}", format_percentage(projection.total_roi));
    println!("  Break-even:         {}", format_break_even(projection.break_even));
    println!("  Payback (months):   {}", format_months(projection.payback_months));
    println!();

    if let Some(path) = &outcome.local_path {
        println!("📄 Report written: {}", path.display());
    }
    if let Some(stored) = &outcome.stored {
        match &stored.web_view_link {
            Some(link) => println!("☁️  Uploaded to Google Drive: {link}"),
            None => println!("☁️  Uploaded to Google Drive: file {}", stored.file_id),
        }
    }
    if outcome.sheet_appended {
        println!("📝 Submission recorded in Google Sheets");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DriveError;
    use std::io::Write;

    const SUBMISSION: &str = r#"
[hospital]
name = "RS Sehat"
location = "Jakarta"

[consultant]
name = "Budi"
email = "budi@example.com"
phone = "0812"

[financials]
initial_investment = 10000
annual_subscription_cost = 1000
annual_revenue_uplift = 3000
annual_operational_savings = 2000
"#;

    fn args(input: PathBuf, output_dir: &Path) -> CalculateArgs {
        CalculateArgs {
            input,
            output_dir: Some(output_dir.to_string_lossy().to_string()),
            growth_rate: None,
            no_pdf: false,
            no_upload: true,
            json: true,
            dry_run: false,
        }
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&MedRoiError::validation("hospital.name", "is required")),
            EXIT_INVALID
        );
        assert_eq!(
            exit_code_for(&MedRoiError::Drive(DriveError::Timeout("t".to_string()))),
            EXIT_COLLABORATOR
        );
        assert_eq!(
            exit_code_for(&MedRoiError::Computation("overflow".to_string())),
            EXIT_FATAL
        );
    }

    #[tokio::test]
    async fn test_execute_writes_report() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("submission.toml");
        std::fs::File::create(&input)
            .unwrap()
            .write_all(SUBMISSION.as_bytes())
            .unwrap();
        let out = temp.path().join("reports");
        let missing_config = temp.path().join("absent.toml");

        let code = args(input, &out)
            .execute(&missing_config.to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
        let written: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
        assert_eq!(written.len(), 1);
    }

    #[tokio::test]
    async fn test_execute_invalid_submission() {
        let temp = tempfile::TempDir::new().unwrap();
        let input = temp.path().join("submission.toml");
        std::fs::write(&input, SUBMISSION.replace("[financials]", "[other]")).unwrap();

        let code = args(input, temp.path())
            .execute(&temp.path().join("absent.toml").to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, EXIT_INVALID);
    }
}
