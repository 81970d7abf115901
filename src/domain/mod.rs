//! Domain models and types for medroi.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Input models** ([`RoiInput`], [`HospitalInfo`], [`ConsultantInfo`])
//! - **Projection models** ([`RoiProjection`], [`YearProjection`], [`RoiPercentage`], [`BreakEven`])
//! - **Form submissions** ([`Submission`], [`Financials`], [`HospitalOperations`])
//! - **Error types** ([`MedRoiError`], [`DriveError`])
//! - **Result type alias** ([`Result`])
//! - **Checked decimal arithmetic** ([`arithmetic`])
//!
//! # Builder Pattern
//!
//! ```rust
//! use medroi::domain::{ConsultantInfo, RoiInput};
//! use rust_decimal_macros::dec;
//!
//! # fn example() -> medroi::domain::Result<()> {
//! let input = RoiInput::builder()
//!     .hospital("RS Sehat Sentosa", "Jakarta")
//!     .consultant(ConsultantInfo::new("Budi", "budi@example.com", "0812"))
//!     .initial_investment(dec!(10000))
//!     .annual_subscription_cost(dec!(1000))
//!     .annual_revenue_uplift(dec!(3000))
//!     .annual_operational_savings(dec!(2000))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod arithmetic;
pub mod errors;
pub mod input;
pub mod projection;
pub mod result;
pub mod submission;

pub use errors::{DriveError, MedRoiError};
pub use input::{
    ConsultantInfo, HospitalInfo, InvestmentBreakdown, RoiInput, RoiInputBuilder,
    SavingsBreakdown, PROJECTION_YEARS,
};
pub use projection::{BreakEven, RoiPercentage, RoiProjection, YearProjection};
pub use result::Result;
pub use submission::{Financials, HospitalOperations, Submission};
