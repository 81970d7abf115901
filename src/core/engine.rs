//! ROI projection engine
//!
//! Pure computation from a validated [`RoiInput`] to a [`RoiProjection`].
//! All arithmetic is done in [`Decimal`] so cumulative sums do not drift.

use crate::domain::arithmetic::{checked_add, checked_div, checked_mul, checked_sub};
use crate::domain::{
    BreakEven, Result, RoiInput, RoiPercentage, RoiProjection, YearProjection, PROJECTION_YEARS,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Computes the five-year projection for one submission
///
/// The investment is a single outflow at year 0. Each year's gross benefit
/// is `(revenue_uplift + savings) * (1 + growth)^(year - 1)`, net cash flow
/// subtracts the subscription cost, and the cumulative figure starts from
/// `-investment`.
///
/// # Errors
///
/// Returns [`MedRoiError::Validation`] if the input is invalid and
/// [`MedRoiError::Computation`] if a cash flow figure overflows the decimal
/// range. ROI ratios that overflow are reported as [`RoiPercentage::Undefined`].
///
/// [`MedRoiError::Validation`]: crate::domain::MedRoiError::Validation
/// [`MedRoiError::Computation`]: crate::domain::MedRoiError::Computation
///
/// # Examples
///
/// ```
/// use medroi::core::engine::project;
/// use medroi::domain::{BreakEven, ConsultantInfo, RoiInput, RoiPercentage};
/// use rust_decimal_macros::dec;
///
/// let input = RoiInput::builder()
///     .hospital("RS Sehat", "Jakarta")
///     .consultant(ConsultantInfo::new("Budi", "budi@example.com", "0812"))
///     .initial_investment(dec!(10000))
///     .annual_subscription_cost(dec!(1000))
///     .annual_revenue_uplift(dec!(3000))
///     .annual_operational_savings(dec!(2000))
///     .build()
///     .unwrap();
///
/// let projection = project(&input).unwrap();
/// assert_eq!(projection.break_even, BreakEven::Year(3));
/// assert_eq!(projection.total_roi, RoiPercentage::Defined(dec!(100)));
/// ```
pub fn project(input: &RoiInput) -> Result<RoiProjection> {
    input.validate()?;

    let base_benefit = checked_add(
        input.annual_revenue_uplift,
        input.annual_operational_savings,
        "base benefit",
    )?;
    let growth_factor = checked_add(Decimal::ONE, input.growth_rate, "growth factor")?;

    let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);
    let mut multiplier = Decimal::ONE;
    let mut cumulative = -input.initial_investment;
    let mut break_even = BreakEven::NotReached;
    let mut payback_months = None;

    for year in 1..=PROJECTION_YEARS {
        if year > 1 {
            multiplier = checked_mul(multiplier, growth_factor, "growth multiplier")?;
        }

        let gross_benefit = checked_mul(base_benefit, multiplier, "gross benefit")?;
        let revenue_uplift = checked_mul(input.annual_revenue_uplift, multiplier, "revenue")?;
        let operational_savings = checked_sub(gross_benefit, revenue_uplift, "savings")?;
        let net_cash_flow =
            checked_sub(gross_benefit, input.annual_subscription_cost, "net cash flow")?;

        let previous = cumulative;
        cumulative = checked_add(cumulative, net_cash_flow, "cumulative cash flow")?;

        if break_even == BreakEven::NotReached && cumulative >= Decimal::ZERO {
            break_even = BreakEven::Year(year);
            payback_months = Some(payback_point(year, previous, net_cash_flow)?);
        }

        years.push(YearProjection {
            year,
            revenue_uplift,
            operational_savings,
            gross_benefit,
            subscription_cost: input.annual_subscription_cost,
            net_cash_flow,
            cumulative_cash_flow: cumulative,
        });
    }

    let first_year_roi = years
        .first()
        .map_or(RoiPercentage::Undefined, |y| {
            RoiPercentage::of(y.cumulative_cash_flow, input.initial_investment)
        });
    let total_roi = RoiPercentage::of(cumulative, input.initial_investment);

    tracing::debug!(
        hospital = %input.hospital.name,
        break_even = %break_even,
        total_roi = %total_roi,
        final_cumulative = %cumulative,
        "Projection computed"
    );

    Ok(RoiProjection {
        years,
        initial_investment: input.initial_investment,
        first_year_roi,
        total_roi,
        break_even,
        payback_months,
    })
}

/// Months from year 0 to the point where cumulative cash flow crosses zero,
/// interpolating linearly inside the break-even year.
fn payback_point(
    year: u32,
    previous_cumulative: Decimal,
    net_cash_flow: Decimal,
) -> Result<Decimal> {
    let whole_years = Decimal::from(year - 1) * MONTHS_PER_YEAR;
    if previous_cumulative >= Decimal::ZERO || net_cash_flow <= Decimal::ZERO {
        return Ok(whole_years);
    }
    let fraction = checked_div(-previous_cumulative, net_cash_flow, "payback months")?;
    let months = checked_mul(fraction, MONTHS_PER_YEAR, "payback months")?;
    Ok(checked_add(whole_years, months, "payback months")?.round_dp(2))
}
