//! Form submission model
//!
//! A submission is the TOML document a consultant fills in. It holds the
//! identity block and either direct financial figures or the hospital
//! operating parameters the figures are derived from.

use super::errors::MedRoiError;
use super::input::{ConsultantInfo, HospitalInfo};
use super::result::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A single form submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub hospital: HospitalInfo,
    pub consultant: ConsultantInfo,

    /// Optional yearly growth of revenue uplift and savings
    #[serde(default)]
    pub growth_rate: Decimal,

    /// Direct engine figures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,

    /// Hospital operating parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operations: Option<HospitalOperations>,
}

impl Submission {
    /// Reads a submission from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// contains neither or both of `[financials]` and `[operations]`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            MedRoiError::Io(format!(
                "Failed to read submission file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml(&contents)
    }

    /// Parses a submission from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let submission: Submission = toml::from_str(contents).map_err(|e| {
            MedRoiError::validation("submission", format!("failed to parse TOML: {e}"))
        })?;

        match (&submission.financials, &submission.operations) {
            (None, None) => Err(MedRoiError::validation(
                "submission",
                "one of [financials] or [operations] is required",
            )),
            (Some(_), Some(_)) => Err(MedRoiError::validation(
                "submission",
                "[financials] and [operations] are mutually exclusive",
            )),
            _ => Ok(submission),
        }
    }
}

/// Annual figures entered directly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financials {
    #[serde(default)]
    pub initial_investment: Decimal,
    #[serde(default)]
    pub annual_subscription_cost: Decimal,
    #[serde(default)]
    pub annual_revenue_uplift: Decimal,
    #[serde(default)]
    pub annual_operational_savings: Decimal,
}

/// Hospital operating parameters
///
/// Rates are fractions (0.15 = 15%). Salaries, revenue and maintenance are in
/// local currency per month; implementation costs are in USD.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HospitalOperations {
    pub total_staff: u32,
    pub admin_staff: u32,
    pub monthly_appointments: u32,
    pub noshow_rate: Decimal,
    pub avg_admin_salary: Decimal,
    pub revenue_per_appointment: Decimal,
    pub staff_workload_reduction: Decimal,
    pub noshow_reduction: Decimal,
    pub exchange_rate: Decimal,
    pub setup_cost_usd: Decimal,
    pub integration_cost_usd: Decimal,
    pub training_cost_usd: Decimal,
    pub maintenance_cost_monthly: Decimal,
}

impl Default for HospitalOperations {
    fn default() -> Self {
        Self {
            total_staff: 200,
            admin_staff: 20,
            monthly_appointments: 5000,
            noshow_rate: dec!(0.15),
            avg_admin_salary: dec!(8000000),
            revenue_per_appointment: dec!(250000),
            staff_workload_reduction: dec!(0.30),
            noshow_reduction: dec!(0.40),
            exchange_rate: dec!(16000),
            setup_cost_usd: dec!(20000),
            integration_cost_usd: dec!(15000),
            training_cost_usd: dec!(10000),
            maintenance_cost_monthly: dec!(5000000),
        }
    }
}
