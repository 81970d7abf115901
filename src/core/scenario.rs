//! Hospital operations scenario
//!
//! Derives the engine's annual figures from hospital operating parameters:
//! admin staff workload reduction becomes operational savings, recovered
//! no-show appointments become revenue uplift, USD implementation costs
//! become the local-currency investment, and monthly maintenance becomes the
//! subscription cost.

use crate::domain::arithmetic::checked_mul;
use crate::domain::{
    Financials, HospitalOperations, InvestmentBreakdown, MedRoiError, Result, RoiInput,
    SavingsBreakdown, Submission,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const MAX_NOSHOW_RATE: Decimal = dec!(0.5);
const MAX_REDUCTION: Decimal = dec!(0.8);
const MIN_EXCHANGE_RATE: Decimal = dec!(1000);

/// Figures derived from a set of operating parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFigures {
    pub investment: InvestmentBreakdown,
    pub savings: SavingsBreakdown,
}

impl ScenarioFigures {
    /// Annual operational savings (staff workload)
    pub fn annual_operational_savings(&self) -> Result<Decimal> {
        checked_mul(
            self.savings.staff_savings_monthly,
            MONTHS_PER_YEAR,
            "annual operational savings",
        )
    }

    /// Annual revenue uplift (recovered no-shows)
    pub fn annual_revenue_uplift(&self) -> Result<Decimal> {
        checked_mul(
            self.savings.noshow_savings_monthly,
            MONTHS_PER_YEAR,
            "annual revenue uplift",
        )
    }

    /// Annual maintenance cost
    pub fn annual_subscription_cost(&self) -> Result<Decimal> {
        checked_mul(
            self.savings.maintenance_monthly,
            MONTHS_PER_YEAR,
            "annual subscription cost",
        )
    }
}

/// Validates operating parameters against the form limits
pub fn validate_operations(ops: &HospitalOperations) -> Result<()> {
    let counts = [
        ("operations.total_staff", ops.total_staff),
        ("operations.admin_staff", ops.admin_staff),
        ("operations.monthly_appointments", ops.monthly_appointments),
    ];
    for (field, value) in counts {
        if value < 1 {
            return Err(MedRoiError::validation(field, "must be >= 1"));
        }
    }
    if ops.admin_staff > ops.total_staff {
        return Err(MedRoiError::validation(
            "operations.admin_staff",
            format!(
                "cannot exceed total_staff ({} > {})",
                ops.admin_staff, ops.total_staff
            ),
        ));
    }

    let rates = [
        ("operations.noshow_rate", ops.noshow_rate, MAX_NOSHOW_RATE),
        (
            "operations.staff_workload_reduction",
            ops.staff_workload_reduction,
            MAX_REDUCTION,
        ),
        ("operations.noshow_reduction", ops.noshow_reduction, MAX_REDUCTION),
    ];
    for (field, value, max) in rates {
        if value < Decimal::ZERO || value > max {
            return Err(MedRoiError::validation(
                field,
                format!("must be between 0 and {max}, got {value}"),
            ));
        }
    }

    if ops.exchange_rate < MIN_EXCHANGE_RATE {
        return Err(MedRoiError::validation(
            "operations.exchange_rate",
            format!("must be >= {MIN_EXCHANGE_RATE}, got {}", ops.exchange_rate),
        ));
    }

    let amounts = [
        ("operations.avg_admin_salary", ops.avg_admin_salary),
        ("operations.revenue_per_appointment", ops.revenue_per_appointment),
        ("operations.setup_cost_usd", ops.setup_cost_usd),
        ("operations.integration_cost_usd", ops.integration_cost_usd),
        ("operations.training_cost_usd", ops.training_cost_usd),
        ("operations.maintenance_cost_monthly", ops.maintenance_cost_monthly),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(MedRoiError::validation(
                field,
                format!("must be >= 0, got {value}"),
            ));
        }
    }

    Ok(())
}

/// Computes the investment and monthly savings implied by the parameters
///
/// # Errors
///
/// Returns a validation error if any parameter is out of range and a
/// computation error if a derived amount overflows the decimal range.
pub fn derive_figures(ops: &HospitalOperations) -> Result<ScenarioFigures> {
    validate_operations(ops)?;

    let investment = InvestmentBreakdown {
        setup: checked_mul(ops.setup_cost_usd, ops.exchange_rate, "setup cost")?,
        integration: checked_mul(
            ops.integration_cost_usd,
            ops.exchange_rate,
            "integration cost",
        )?,
        training: checked_mul(ops.training_cost_usd, ops.exchange_rate, "training cost")?,
    };

    let admin_payroll = checked_mul(
        Decimal::from(ops.admin_staff),
        ops.avg_admin_salary,
        "admin payroll",
    )?;
    let staff_savings_monthly = checked_mul(
        admin_payroll,
        ops.staff_workload_reduction,
        "staff savings",
    )?;
    let recovered_appointments =
        Decimal::from(ops.monthly_appointments) * ops.noshow_rate * ops.noshow_reduction;
    let noshow_savings_monthly = checked_mul(
        recovered_appointments,
        ops.revenue_per_appointment,
        "no-show savings",
    )?;

    Ok(ScenarioFigures {
        investment,
        savings: SavingsBreakdown {
            staff_savings_monthly,
            noshow_savings_monthly,
            maintenance_monthly: ops.maintenance_cost_monthly,
        },
    })
}

/// Turns a form submission into a validated engine input
///
/// # Errors
///
/// Returns a validation error naming the first missing or invalid field, or a
/// computation error if derived figures overflow.
pub fn input_from_submission(submission: &Submission) -> Result<RoiInput> {
    let builder = RoiInput::builder()
        .hospital(
            submission.hospital.name.clone(),
            submission.hospital.location.clone(),
        )
        .consultant(submission.consultant.clone())
        .growth_rate(submission.growth_rate);

    match (&submission.financials, &submission.operations) {
        (Some(Financials {
            initial_investment,
            annual_subscription_cost,
            annual_revenue_uplift,
            annual_operational_savings,
        }), None) => builder
            .initial_investment(*initial_investment)
            .annual_subscription_cost(*annual_subscription_cost)
            .annual_revenue_uplift(*annual_revenue_uplift)
            .annual_operational_savings(*annual_operational_savings)
            .build(),
        (None, Some(ops)) => {
            let figures = derive_figures(ops)?;
            let investment = figures.investment.total()?;
            tracing::debug!(
                investment = %investment,
                staff_savings_monthly = %figures.savings.staff_savings_monthly,
                noshow_savings_monthly = %figures.savings.noshow_savings_monthly,
                "Derived figures from hospital operations"
            );
            builder
                .initial_investment(investment)
                .annual_subscription_cost(figures.annual_subscription_cost()?)
                .annual_revenue_uplift(figures.annual_revenue_uplift()?)
                .annual_operational_savings(figures.annual_operational_savings()?)
                .investment_breakdown(figures.investment)
                .savings_breakdown(figures.savings)
                .build()
        }
        _ => Err(MedRoiError::validation(
            "submission",
            "exactly one of [financials] or [operations] is required",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConsultantInfo, HospitalInfo};

    fn submission(financials: Option<Financials>, operations: Option<HospitalOperations>) -> Submission {
        Submission {
            hospital: HospitalInfo::new("RS Sehat Sentosa", "Jakarta"),
            consultant: ConsultantInfo::new("Budi Santoso", "budi@example.com", "0812"),
            growth_rate: Decimal::ZERO,
            financials,
            operations,
        }
    }

    #[test]
    fn test_default_operations_figures() {
        let figures = derive_figures(&HospitalOperations::default()).unwrap();
        assert_eq!(figures.investment.setup, dec!(320000000));
        assert_eq!(figures.investment.integration, dec!(240000000));
        assert_eq!(figures.investment.training, dec!(160000000));
        assert_eq!(figures.investment.total().unwrap(), dec!(720000000));
        assert_eq!(figures.savings.staff_savings_monthly, dec!(48000000));
        assert_eq!(figures.savings.noshow_savings_monthly, dec!(75000000));
        assert_eq!(figures.annual_subscription_cost().unwrap(), dec!(60000000));
    }

    #[test]
    fn test_operations_submission_maps_to_engine_fields() {
        let input =
            input_from_submission(&submission(None, Some(HospitalOperations::default()))).unwrap();
        assert_eq!(input.initial_investment, dec!(720000000));
        assert_eq!(input.annual_operational_savings, dec!(576000000));
        assert_eq!(input.annual_revenue_uplift, dec!(900000000));
        assert_eq!(input.annual_subscription_cost, dec!(60000000));
        assert!(input.investment_breakdown.is_some());
        assert_eq!(
            input.savings_breakdown.as_ref().map(|s| s.net_monthly().unwrap()),
            Some(dec!(118000000))
        );
    }

    #[test]
    fn test_financials_submission_passes_through() {
        let financials = Financials {
            initial_investment: dec!(10000),
            annual_subscription_cost: dec!(1000),
            annual_revenue_uplift: dec!(3000),
            annual_operational_savings: dec!(2000),
        };
        let input = input_from_submission(&submission(Some(financials), None)).unwrap();
        assert_eq!(input.initial_investment, dec!(10000));
        assert!(input.investment_breakdown.is_none());
    }

    #[test]
    fn test_noshow_rate_above_limit_is_rejected() {
        let ops = HospitalOperations {
            noshow_rate: dec!(0.6),
            ..Default::default()
        };
        let err = derive_figures(&ops).unwrap_err();
        assert!(err.to_string().contains("operations.noshow_rate"));
    }

    #[test]
    fn test_unbounded_salary_reports_overflow() {
        let ops = HospitalOperations {
            avg_admin_salary: Decimal::MAX,
            ..Default::default()
        };
        let err = derive_figures(&ops).unwrap_err();
        assert!(matches!(err, MedRoiError::Computation(ref m) if m.contains("admin payroll")));

        let err = input_from_submission(&submission(None, Some(ops))).unwrap_err();
        assert!(matches!(err, MedRoiError::Computation(_)));
    }

    #[test]
    fn test_annual_figures_report_overflow() {
        let figures = ScenarioFigures {
            investment: InvestmentBreakdown {
                setup: Decimal::ZERO,
                integration: Decimal::ZERO,
                training: Decimal::ZERO,
            },
            savings: SavingsBreakdown {
                staff_savings_monthly: Decimal::MAX,
                noshow_savings_monthly: Decimal::MAX,
                maintenance_monthly: Decimal::MAX,
            },
        };
        assert!(figures.annual_operational_savings().is_err());
        assert!(figures.annual_revenue_uplift().is_err());
        assert!(figures.annual_subscription_cost().is_err());
    }

    #[test]
    fn test_zero_admin_staff_is_rejected() {
        let ops = HospitalOperations {
            admin_staff: 0,
            ..Default::default()
        };
        assert!(validate_operations(&ops).is_err());
    }

    #[test]
    fn test_admin_staff_cannot_exceed_total() {
        let ops = HospitalOperations {
            total_staff: 10,
            admin_staff: 11,
            ..Default::default()
        };
        let err = validate_operations(&ops).unwrap_err();
        assert!(err.to_string().contains("cannot exceed total_staff"));
    }

    #[test]
    fn test_low_exchange_rate_is_rejected() {
        let ops = HospitalOperations {
            exchange_rate: dec!(999),
            ..Default::default()
        };
        assert!(validate_operations(&ops).is_err());
    }

    #[test]
    fn test_missing_identity_is_reported_for_operations() {
        let mut sub = submission(None, Some(HospitalOperations::default()));
        sub.consultant.email = String::new();
        let err = input_from_submission(&sub).unwrap_err();
        assert!(err.to_string().contains("consultant.email"));
    }
}
