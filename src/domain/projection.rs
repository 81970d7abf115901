//! ROI projection model
//!
//! A [`RoiProjection`] is the read-only result of one engine run: five
//! ordered year records plus summary values.

use super::arithmetic::checked_sum;
use super::result::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cash flow figures for a single projection year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearProjection {
    /// Year index, starting at 1
    pub year: u32,

    /// Revenue uplift for the year
    pub revenue_uplift: Decimal,

    /// Operational savings for the year
    pub operational_savings: Decimal,

    /// Revenue uplift plus operational savings
    pub gross_benefit: Decimal,

    /// Subscription cost charged in the year
    pub subscription_cost: Decimal,

    /// Gross benefit minus subscription cost
    pub net_cash_flow: Decimal,

    /// Running total including the year-0 investment outflow
    pub cumulative_cash_flow: Decimal,
}

/// ROI percentage, which has no value when nothing was invested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum RoiPercentage {
    Defined(Decimal),
    Undefined,
}

impl RoiPercentage {
    /// `gain / investment * 100`
    ///
    /// Undefined when nothing was invested, or when the ratio falls outside
    /// the decimal range (a tiny investment against a large cash flow).
    pub fn of(gain: Decimal, investment: Decimal) -> Self {
        if investment.is_zero() {
            return RoiPercentage::Undefined;
        }
        gain.checked_div(investment)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(RoiPercentage::Undefined, RoiPercentage::Defined)
    }

    /// Returns the percentage if defined
    pub fn value(&self) -> Option<Decimal> {
        match self {
            RoiPercentage::Defined(v) => Some(*v),
            RoiPercentage::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, RoiPercentage::Defined(_))
    }
}

impl fmt::Display for RoiPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiPercentage::Defined(v) => write!(f, "{:.1}%", v.round_dp(1)),
            RoiPercentage::Undefined => write!(f, "undefined"),
        }
    }
}

/// First year in which cumulative cash flow is non-negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "year", rename_all = "snake_case")]
pub enum BreakEven {
    Year(u32),
    NotReached,
}

impl BreakEven {
    pub fn year(&self) -> Option<u32> {
        match self {
            BreakEven::Year(y) => Some(*y),
            BreakEven::NotReached => None,
        }
    }
}

impl fmt::Display for BreakEven {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakEven::Year(y) => write!(f, "year {y}"),
            BreakEven::NotReached => write!(f, "not reached"),
        }
    }
}

/// Result of a projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiProjection {
    /// Year records, ordered 1..=5
    pub years: Vec<YearProjection>,

    /// Year-0 outflow
    pub initial_investment: Decimal,

    /// Cumulative cash flow after year 1 relative to the investment
    pub first_year_roi: RoiPercentage,

    /// Cumulative cash flow at the horizon relative to the investment
    pub total_roi: RoiPercentage,

    pub break_even: BreakEven,

    /// Months until cumulative cash flow reaches zero; `None` when not
    /// reached within the horizon
    pub payback_months: Option<Decimal>,
}

impl RoiProjection {
    /// Returns the record for a 1-based year index
    pub fn year(&self, year: u32) -> Option<&YearProjection> {
        self.years.iter().find(|y| y.year == year)
    }

    /// Cumulative cash flow at the end of the horizon
    pub fn final_cumulative(&self) -> Decimal {
        self.years
            .last()
            .map(|y| y.cumulative_cash_flow)
            .unwrap_or(-self.initial_investment)
    }

    /// ROI percentage at the end of the given year
    pub fn roi_at_year(&self, year: u32) -> RoiPercentage {
        self.year(year)
            .map_or(RoiPercentage::Undefined, |record| {
                RoiPercentage::of(record.cumulative_cash_flow, self.initial_investment)
            })
    }

    /// Gross benefit summed over the horizon
    pub fn total_gross_benefit(&self) -> Result<Decimal> {
        checked_sum(self.years.iter().map(|y| y.gross_benefit), "total gross benefit")
    }

    /// Net cash flow summed over the horizon
    pub fn total_net_cash_flow(&self) -> Result<Decimal> {
        checked_sum(self.years.iter().map(|y| y.net_cash_flow), "total net cash flow")
    }
}
