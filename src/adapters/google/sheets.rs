//! Google Sheets tracking log
//!
//! Each submission becomes one appended row. Column order is fixed by
//! [`SHEET_COLUMNS`] so the tracking sheet can carry a matching header.

use super::http::{read_json, GoogleHttp};
use super::models::{AppendResponse, ValueRange};
use super::SubmissionLog;
use crate::config::GoogleConfig;
use crate::core::format::NOT_AVAILABLE;
use crate::domain::{HospitalOperations, MedRoiError, Result, RoiInput, RoiPercentage, RoiProjection};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Header names, in row order
pub const SHEET_COLUMNS: [&str; 29] = [
    "Timestamp",
    "Consultant Name",
    "Consultant Email",
    "Consultant Phone",
    "Hospital Name",
    "Hospital Location",
    "Initial Investment",
    "Annual Subscription Cost",
    "Annual Revenue Uplift",
    "Annual Operational Savings",
    "Growth Rate",
    "ROI Year 1 (%)",
    "ROI 5 Years (%)",
    "Break-even Year",
    "Payback Period (Months)",
    "PDF Link",
    "Total Staff",
    "Admin Staff",
    "Monthly Appointments",
    "No-show Rate",
    "Avg Admin Salary",
    "Revenue per Appointment",
    "Staff Workload Reduction",
    "No-show Reduction",
    "Exchange Rate",
    "Setup Cost (USD)",
    "Integration Cost (USD)",
    "Training Cost (USD)",
    "Maintenance Cost (Monthly)",
];

/// Builds the tracking row for one submission
///
/// Undefined values are written as `N/A`. Scenario columns are left empty
/// when the figures were entered directly.
pub fn sheet_row(
    input: &RoiInput,
    projection: &RoiProjection,
    operations: Option<&HospitalOperations>,
    timestamp: &str,
    pdf_link: Option<&str>,
) -> Vec<String> {
    let mut row = vec![
        timestamp.to_string(),
        input.consultant.name.clone(),
        input.consultant.email.clone(),
        input.consultant.phone.clone(),
        input.hospital.name.clone(),
        input.hospital.location.clone(),
        amount(input.initial_investment),
        amount(input.annual_subscription_cost),
        amount(input.annual_revenue_uplift),
        amount(input.annual_operational_savings),
        input.growth_rate.normalize().to_string(),
        percentage(projection.first_year_roi),
        percentage(projection.total_roi),
        projection
            .break_even
            .year()
            .map(|y| y.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        projection
            .payback_months
            .map(|m| m.round_dp(1).normalize().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        pdf_link.unwrap_or_default().to_string(),
    ];

    match operations {
        Some(ops) => row.extend([
            ops.total_staff.to_string(),
            ops.admin_staff.to_string(),
            ops.monthly_appointments.to_string(),
            ops.noshow_rate.normalize().to_string(),
            amount(ops.avg_admin_salary),
            amount(ops.revenue_per_appointment),
            ops.staff_workload_reduction.normalize().to_string(),
            ops.noshow_reduction.normalize().to_string(),
            amount(ops.exchange_rate),
            amount(ops.setup_cost_usd),
            amount(ops.integration_cost_usd),
            amount(ops.training_cost_usd),
            amount(ops.maintenance_cost_monthly),
        ]),
        None => row.resize(SHEET_COLUMNS.len(), String::new()),
    }

    row
}

fn amount(value: Decimal) -> String {
    value.round_dp(2).normalize().to_string()
}

fn percentage(roi: RoiPercentage) -> String {
    roi.value()
        .map(|v| v.round_dp(1).normalize().to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Appends rows to one worksheet of a spreadsheet
pub struct GoogleSheetsClient {
    http: GoogleHttp,
    base_url: String,
    spreadsheet_id: String,
    sheet_name: String,
}

impl GoogleSheetsClient {
    /// Creates a client, or `None` when no spreadsheet is configured
    pub fn from_config(config: &GoogleConfig) -> Result<Option<Self>> {
        let Some(spreadsheet_id) = config.spreadsheet_id.clone() else {
            return Ok(None);
        };
        Ok(Some(Self {
            http: GoogleHttp::new(config)?,
            base_url: config.sheets_api_base_url.trim_end_matches('/').to_string(),
            spreadsheet_id,
            sheet_name: config.sheet_name.clone(),
        }))
    }

    fn append_url(&self) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}!A1:append",
            self.base_url, self.spreadsheet_id, self.sheet_name
        )
    }
}

#[async_trait]
impl SubmissionLog for GoogleSheetsClient {
    async fn append_row(&self, row: Vec<String>) -> Result<()> {
        let url = self.append_url();
        let body = ValueRange { values: vec![row] };

        let resp = self
            .http
            .send_with_retry("append row", || {
                self.http
                    .client()
                    .post(&url)
                    .query(&[("valueInputOption", "USER_ENTERED")])
                    .json(&body)
            })
            .await
            .map_err(|e| MedRoiError::Sheets(e.to_string()))?;

        let appended: AppendResponse = read_json(resp)
            .await
            .map_err(|e| MedRoiError::Sheets(e.to_string()))?;
        let updates = appended.updates.unwrap_or_default();

        tracing::info!(
            spreadsheet_id = %self.spreadsheet_id,
            sheet = %self.sheet_name,
            updated_range = updates.updated_range.as_deref().unwrap_or_default(),
            updated_rows = updates.updated_rows.unwrap_or(0),
            "Submission row appended"
        );
        Ok(())
    }
}
