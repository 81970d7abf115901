//! ROI input model
//!
//! One [`RoiInput`] is built per form submission. It carries the hospital and
//! consultant identity plus the annual monetary figures the engine projects.

use super::arithmetic::{checked_add, checked_sub, checked_sum};
use super::errors::MedRoiError;
use super::result::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of years covered by every projection
pub const PROJECTION_YEARS: u32 = 5;

/// Hospital identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalInfo {
    /// Hospital name
    pub name: String,

    /// City or province
    pub location: String,
}

impl HospitalInfo {
    /// Creates a new HospitalInfo
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Drive folder name for this hospital: `HospitalName - Location`
    pub fn folder_name(&self) -> String {
        format!("{} - {}", self.name.trim(), self.location.trim())
    }
}

/// Consultant who prepared the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantInfo {
    /// Consultant name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Phone / WhatsApp number
    pub phone: String,
}

impl ConsultantInfo {
    /// Creates a new ConsultantInfo
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Initial investment split into its cost components (local currency)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentBreakdown {
    pub setup: Decimal,
    pub integration: Decimal,
    pub training: Decimal,
}

impl InvestmentBreakdown {
    /// Sum of all components
    pub fn total(&self) -> Result<Decimal> {
        checked_sum([self.setup, self.integration, self.training], "total investment")
    }
}

/// Monthly savings components (local currency)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsBreakdown {
    pub staff_savings_monthly: Decimal,
    pub noshow_savings_monthly: Decimal,
    pub maintenance_monthly: Decimal,
}

impl SavingsBreakdown {
    /// Staff plus no-show savings, net of maintenance
    pub fn net_monthly(&self) -> Result<Decimal> {
        let gross = checked_add(
            self.staff_savings_monthly,
            self.noshow_savings_monthly,
            "monthly savings",
        )?;
        checked_sub(gross, self.maintenance_monthly, "net monthly savings")
    }
}

/// Input record for the ROI engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiInput {
    pub hospital: HospitalInfo,
    pub consultant: ConsultantInfo,

    /// One-time outflow at year 0
    pub initial_investment: Decimal,

    /// Subscription / license / maintenance cost per year
    pub annual_subscription_cost: Decimal,

    /// Additional revenue per year in the first year
    pub annual_revenue_uplift: Decimal,

    /// Operational savings per year in the first year
    pub annual_operational_savings: Decimal,

    /// Yearly growth applied to revenue uplift and savings (0.05 = 5%)
    #[serde(default)]
    pub growth_rate: Decimal,

    /// Present when the input was derived from hospital operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_breakdown: Option<InvestmentBreakdown>,

    /// Present when the input was derived from hospital operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_breakdown: Option<SavingsBreakdown>,
}

impl RoiInput {
    /// Returns a builder for RoiInput
    pub fn builder() -> RoiInputBuilder {
        RoiInputBuilder::new()
    }

    /// Revenue uplift plus operational savings for year 1
    pub fn annual_gross_benefit(&self) -> Decimal {
        self.annual_revenue_uplift + self.annual_operational_savings
    }

    /// Checks required identity fields and monetary ranges
    ///
    /// Identity fields are checked first so a blank form reports the missing
    /// consultant details before any numeric problem.
    ///
    /// # Errors
    ///
    /// Returns [`MedRoiError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("consultant.name", &self.consultant.name),
            ("consultant.email", &self.consultant.email),
            ("consultant.phone", &self.consultant.phone),
            ("hospital.name", &self.hospital.name),
            ("hospital.location", &self.hospital.location),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(MedRoiError::validation(field, "is required"));
            }
        }

        let monetary = [
            ("initial_investment", self.initial_investment),
            ("annual_subscription_cost", self.annual_subscription_cost),
            ("annual_revenue_uplift", self.annual_revenue_uplift),
            ("annual_operational_savings", self.annual_operational_savings),
        ];
        for (field, value) in monetary {
            if value < Decimal::ZERO {
                return Err(MedRoiError::validation(
                    field,
                    format!("must be >= 0, got {value}"),
                ));
            }
        }

        if self.growth_rate < Decimal::NEGATIVE_ONE {
            return Err(MedRoiError::validation(
                "growth_rate",
                format!("must be >= -1 (-100%), got {}", self.growth_rate),
            ));
        }

        Ok(())
    }
}

/// Builder for [`RoiInput`]
///
/// Monetary fields default to zero; identity fields left unset fail
/// validation in [`RoiInputBuilder::build`].
#[derive(Debug, Default)]
pub struct RoiInputBuilder {
    hospital_name: Option<String>,
    hospital_location: Option<String>,
    consultant: Option<ConsultantInfo>,
    initial_investment: Decimal,
    annual_subscription_cost: Decimal,
    annual_revenue_uplift: Decimal,
    annual_operational_savings: Decimal,
    growth_rate: Decimal,
    investment_breakdown: Option<InvestmentBreakdown>,
    savings_breakdown: Option<SavingsBreakdown>,
}

impl RoiInputBuilder {
    /// Creates a new RoiInputBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hospital(mut self, name: impl Into<String>, location: impl Into<String>) -> Self {
        self.hospital_name = Some(name.into());
        self.hospital_location = Some(location.into());
        self
    }

    pub fn consultant(mut self, consultant: ConsultantInfo) -> Self {
        self.consultant = Some(consultant);
        self
    }

    pub fn initial_investment(mut self, amount: Decimal) -> Self {
        self.initial_investment = amount;
        self
    }

    pub fn annual_subscription_cost(mut self, amount: Decimal) -> Self {
        self.annual_subscription_cost = amount;
        self
    }

    pub fn annual_revenue_uplift(mut self, amount: Decimal) -> Self {
        self.annual_revenue_uplift = amount;
        self
    }

    pub fn annual_operational_savings(mut self, amount: Decimal) -> Self {
        self.annual_operational_savings = amount;
        self
    }

    pub fn growth_rate(mut self, rate: Decimal) -> Self {
        self.growth_rate = rate;
        self
    }

    pub fn investment_breakdown(mut self, breakdown: InvestmentBreakdown) -> Self {
        self.investment_breakdown = Some(breakdown);
        self
    }

    pub fn savings_breakdown(mut self, breakdown: SavingsBreakdown) -> Self {
        self.savings_breakdown = Some(breakdown);
        self
    }

    /// Builds and validates the RoiInput
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is missing or a
    /// monetary field is negative
    pub fn build(self) -> Result<RoiInput> {
        let consultant = self
            .consultant
            .unwrap_or_else(|| ConsultantInfo::new("", "", ""));
        let input = RoiInput {
            hospital: HospitalInfo::new(
                self.hospital_name.unwrap_or_default(),
                self.hospital_location.unwrap_or_default(),
            ),
            consultant,
            initial_investment: self.initial_investment,
            annual_subscription_cost: self.annual_subscription_cost,
            annual_revenue_uplift: self.annual_revenue_uplift,
            annual_operational_savings: self.annual_operational_savings,
            growth_rate: self.growth_rate,
            investment_breakdown: self.investment_breakdown,
            savings_breakdown: self.savings_breakdown,
        };
        input.validate()?;
        Ok(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn consultant() -> ConsultantInfo {
        ConsultantInfo::new("Budi Santoso", "budi@example.com", "081234567890")
    }

    #[test]
    fn test_builder_valid_input() {
        let input = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "Jakarta")
            .consultant(consultant())
            .initial_investment(dec!(10000))
            .annual_subscription_cost(dec!(1000))
            .annual_revenue_uplift(dec!(3000))
            .annual_operational_savings(dec!(2000))
            .build()
            .unwrap();

        assert_eq!(input.annual_gross_benefit(), dec!(5000));
        assert_eq!(input.growth_rate, Decimal::ZERO);
    }

    #[test]
    fn test_builder_missing_consultant_names_field() {
        let err = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "Jakarta")
            .build()
            .unwrap_err();

        match err {
            MedRoiError::Validation { field, .. } => assert_eq!(field, "consultant.name"),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_phone_is_rejected() {
        let err = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "Jakarta")
            .consultant(ConsultantInfo::new("Budi", "budi@example.com", "   "))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("consultant.phone"));
    }

    #[test]
    fn test_missing_location_is_rejected() {
        let err = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "")
            .consultant(consultant())
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("hospital.location"));
    }

    #[test]
    fn test_negative_subscription_is_rejected() {
        let err = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "Jakarta")
            .consultant(consultant())
            .annual_subscription_cost(dec!(-1))
            .build()
            .unwrap_err();

        match err {
            MedRoiError::Validation { field, message } => {
                assert_eq!(field, "annual_subscription_cost");
                assert!(message.contains(">= 0"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_growth_below_minus_one_is_rejected() {
        let err = RoiInput::builder()
            .hospital("RS Sehat Sentosa", "Jakarta")
            .consultant(consultant())
            .growth_rate(dec!(-1.5))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("growth_rate"));
    }

    #[test]
    fn test_folder_name() {
        let hospital = HospitalInfo::new(" RS Sehat Sentosa ", "Jakarta");
        assert_eq!(hospital.folder_name(), "RS Sehat Sentosa - Jakarta");
    }

    #[test]
    fn test_breakdown_totals() {
        let investment = InvestmentBreakdown {
            setup: dec!(320000000),
            integration: dec!(240000000),
            training: dec!(160000000),
        };
        assert_eq!(investment.total().unwrap(), dec!(720000000));

        let savings = SavingsBreakdown {
            staff_savings_monthly: dec!(48000000),
            noshow_savings_monthly: dec!(75000000),
            maintenance_monthly: dec!(5000000),
        };
        assert_eq!(savings.net_monthly().unwrap(), dec!(118000000));
    }

    #[test]
    fn test_breakdown_totals_report_overflow() {
        let investment = InvestmentBreakdown {
            setup: Decimal::MAX,
            integration: dec!(1),
            training: Decimal::ZERO,
        };
        assert!(matches!(
            investment.total(),
            Err(MedRoiError::Computation(_))
        ));

        let savings = SavingsBreakdown {
            staff_savings_monthly: Decimal::MAX,
            noshow_savings_monthly: Decimal::MAX,
            maintenance_monthly: Decimal::ZERO,
        };
        assert!(matches!(
            savings.net_monthly(),
            Err(MedRoiError::Computation(_))
        ));
    }
}
