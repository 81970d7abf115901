//! One submission end to end
//!
//! Validation and computation failures abort the run. Collaborator failures
//! (rendering, writing, Drive, Sheets) are collected in the outcome so the
//! projection is still returned to the caller.

use crate::adapters::google::{sheet_row, GoogleServices, StoredReport};
use crate::adapters::pdf::{write_report, ReportRenderer};
use crate::config::MedRoiConfig;
use crate::core::engine::project;
use crate::core::format::{format_timestamp, report_file_name_for, report_now};
use crate::core::scenario::input_from_submission;
use crate::domain::{MedRoiError, Result, RoiInput, RoiProjection, Submission};
use crate::{log_calculation_complete, log_error_with_context};
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use std::time::Instant;

/// Everything produced for one submission
#[derive(Debug)]
pub struct ReportOutcome {
    pub input: RoiInput,
    pub projection: RoiProjection,
    pub generated_at: DateTime<FixedOffset>,
    pub file_name: String,
    /// Rendered PDF, unless rendering was skipped or failed
    pub pdf: Option<Vec<u8>>,
    pub local_path: Option<PathBuf>,
    pub stored: Option<StoredReport>,
    pub sheet_appended: bool,
    /// Collaborator failures, in the order they happened
    pub failures: Vec<MedRoiError>,
}

impl ReportOutcome {
    /// True when every requested collaborator step succeeded
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs submissions through projection, rendering and upload
pub struct ReportPipeline {
    renderer: ReportRenderer,
    timezone_offset_hours: i32,
    output_dir: Option<PathBuf>,
    render_pdf: bool,
    services: Option<GoogleServices>,
}

impl ReportPipeline {
    /// Builds a pipeline from configuration
    ///
    /// Google services are only created when `google.enabled` is set and
    /// `application.dry_run` is not.
    pub fn from_config(config: &MedRoiConfig) -> Result<Self> {
        let services = if config.application.dry_run {
            tracing::info!("Dry run: Google Drive and Sheets are skipped");
            None
        } else {
            GoogleServices::from_config(&config.google)?
        };

        Ok(Self {
            renderer: ReportRenderer::new(&config.report),
            timezone_offset_hours: config.report.timezone_offset_hours,
            output_dir: Some(PathBuf::from(&config.report.output_dir)),
            render_pdf: true,
            services,
        })
    }

    /// Replaces the Google collaborators
    pub fn with_services(mut self, services: Option<GoogleServices>) -> Self {
        self.services = services;
        self
    }

    /// Sets or clears the local output directory
    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.output_dir = dir;
        self
    }

    /// Enables or disables PDF rendering; without a PDF nothing is uploaded
    pub fn with_pdf(mut self, render_pdf: bool) -> Self {
        self.render_pdf = render_pdf;
        self
    }

    /// Processes one submission
    ///
    /// # Errors
    ///
    /// Returns validation and computation errors. Collaborator failures are
    /// reported through [`ReportOutcome::failures`] instead.
    pub async fn run(&self, submission: &Submission) -> Result<ReportOutcome> {
        let started = Instant::now();
        let input = input_from_submission(submission)?;
        let projection = project(&input)?;
        log_calculation_complete!(
            input.hospital.name,
            projection.break_even,
            projection.total_roi,
            started.elapsed()
        );

        let generated_at = report_now(self.timezone_offset_hours)?;
        let file_name = report_file_name_for(generated_at.date_naive(), &input);
        let mut outcome = ReportOutcome {
            input,
            projection,
            generated_at,
            file_name,
            pdf: None,
            local_path: None,
            stored: None,
            sheet_appended: false,
            failures: Vec::new(),
        };

        if self.render_pdf {
            self.render(&mut outcome);
        }

        if let Some(services) = &self.services {
            self.sync(services, submission, &mut outcome).await;
        }

        Ok(outcome)
    }

    fn render(&self, outcome: &mut ReportOutcome) {
        let bytes = match self
            .renderer
            .render(&outcome.input, &outcome.projection, &outcome.generated_at)
        {
            Ok(bytes) => bytes,
            Err(e) => {
                log_error_with_context!(&e, "Failed to render PDF report");
                outcome.failures.push(e);
                return;
            }
        };

        if let Some(dir) = &self.output_dir {
            match write_report(dir, &outcome.file_name, &bytes) {
                Ok(path) => outcome.local_path = Some(path),
                Err(e) => {
                    log_error_with_context!(&e, "Failed to write PDF report");
                    outcome.failures.push(e);
                }
            }
        }
        outcome.pdf = Some(bytes);
    }

    async fn sync(
        &self,
        services: &GoogleServices,
        submission: &Submission,
        outcome: &mut ReportOutcome,
    ) {
        let Some(pdf) = outcome.pdf.as_deref() else {
            tracing::warn!("No PDF available; Google Drive and Sheets sync skipped");
            return;
        };

        match services
            .store
            .store_report(&outcome.input.hospital, &outcome.file_name, pdf)
            .await
        {
            Ok(stored) => outcome.stored = Some(stored),
            Err(e) => {
                log_error_with_context!(&e, "Failed to upload report to Google Drive");
                outcome.failures.push(e);
            }
        }

        if let Some(log) = &services.log {
            let link = outcome
                .stored
                .as_ref()
                .and_then(|s| s.web_view_link.as_deref());
            let row = sheet_row(
                &outcome.input,
                &outcome.projection,
                submission.operations.as_ref(),
                &format_timestamp(&outcome.generated_at, self.timezone_offset_hours),
                link,
            );
            match log.append_row(row).await {
                Ok(()) => outcome.sheet_appended = true,
                Err(e) => {
                    log_error_with_context!(&e, "Failed to append row to Google Sheets");
                    outcome.failures.push(e);
                }
            }
        }
    }
}
