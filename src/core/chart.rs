//! Chart series derived from a projection
//!
//! The renderer draws two charts: cumulative cash flow as a line starting at
//! the year-0 investment, and per-year bars comparing revenue uplift,
//! operational savings and subscription cost.

use crate::domain::RoiProjection;
use rust_decimal::Decimal;

/// One point on a line chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPoint {
    /// Year index; 0 is the investment point
    pub year: u32,
    pub value: Decimal,
}

/// A labelled line series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSeries {
    pub label: String,
    pub points: Vec<ChartPoint>,
}

/// Which component a bar shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitComponent {
    RevenueUplift,
    OperationalSavings,
    SubscriptionCost,
}

impl BenefitComponent {
    pub const ALL: [BenefitComponent; 3] = [
        BenefitComponent::RevenueUplift,
        BenefitComponent::OperationalSavings,
        BenefitComponent::SubscriptionCost,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BenefitComponent::RevenueUplift => "Revenue uplift",
            BenefitComponent::OperationalSavings => "Operational savings",
            BenefitComponent::SubscriptionCost => "Subscription cost",
        }
    }

    /// RGB fill in the 0..1 range
    pub fn color(&self) -> (f32, f32, f32) {
        match self {
            BenefitComponent::RevenueUplift => (0.95, 0.77, 0.06),
            BenefitComponent::OperationalSavings => (0.15, 0.68, 0.38),
            BenefitComponent::SubscriptionCost => (0.91, 0.30, 0.24),
        }
    }
}

/// Bars for one component across all years, in year order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSeries {
    pub component: BenefitComponent,
    pub values: Vec<Decimal>,
}

/// Cumulative cash flow, beginning with `-investment` at year 0
pub fn cash_flow_series(projection: &RoiProjection) -> LineSeries {
    let mut points = Vec::with_capacity(projection.years.len() + 1);
    points.push(ChartPoint {
        year: 0,
        value: -projection.initial_investment,
    });
    points.extend(projection.years.iter().map(|y| ChartPoint {
        year: y.year,
        value: y.cumulative_cash_flow,
    }));
    LineSeries {
        label: "Cumulative cash flow".to_string(),
        points,
    }
}

/// Revenue uplift, savings and subscription cost per year
pub fn benefit_breakdown_series(projection: &RoiProjection) -> Vec<BarSeries> {
    BenefitComponent::ALL
        .iter()
        .map(|component| BarSeries {
            component: *component,
            values: projection
                .years
                .iter()
                .map(|y| match component {
                    BenefitComponent::RevenueUplift => y.revenue_uplift,
                    BenefitComponent::OperationalSavings => y.operational_savings,
                    BenefitComponent::SubscriptionCost => y.subscription_cost,
                })
                .collect(),
        })
        .collect()
}

/// Smallest and largest value, always spanning zero so the axis is visible
pub fn value_bounds<'a>(values: impl IntoIterator<Item = &'a Decimal>) -> (Decimal, Decimal) {
    values
        .into_iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        })
}
