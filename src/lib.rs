// medroi - Hospital AI Voice ROI Calculator
// Copyright (c) 2025 Medroi Contributors
// Licensed under the MIT License

//! # medroi - Hospital AI Voice ROI Calculator
//!
//! medroi projects the five-year return on investment of an AI voice agent
//! deployment for a hospital, renders the result as a PDF report and files
//! it in Google Drive with a tracking row in Google Sheets.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Deriving** annual figures from hospital operating parameters
//! - **Projecting** yearly cash flow, ROI, break-even year and payback months
//! - **Rendering** a two-page PDF report with tables and charts
//! - **Filing** the report per hospital in Google Drive and logging the submission
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (projection engine, scenario derivation, formatting, pipeline)
//! - [`adapters`] - External integrations (PDF, Google Drive, Google Sheets)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use medroi::core::project;
//! use medroi::domain::{BreakEven, ConsultantInfo, RoiInput};
//! use rust_decimal_macros::dec;
//!
//! # fn main() -> medroi::domain::Result<()> {
//! let input = RoiInput::builder()
//!     .hospital("RS Sehat Sentosa", "Jakarta")
//!     .consultant(ConsultantInfo::new("Budi", "budi@example.com", "0812"))
//!     .initial_investment(dec!(10000))
//!     .annual_subscription_cost(dec!(1000))
//!     .annual_revenue_uplift(dec!(3000))
//!     .annual_operational_savings(dec!(2000))
//!     .build()?;
//!
//! let projection = project(&input)?;
//! assert_eq!(projection.break_even, BreakEven::Year(3));
//! # Ok(())
//! # }
//! ```
//!
//! ## Report Pipeline
//!
//! ```rust,no_run
//! use medroi::config::load_config;
//! use medroi::core::ReportPipeline;
//! use medroi::domain::Submission;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medroi.toml")?;
//! let submission = Submission::from_file("rs-sehat.toml")?;
//!
//! let outcome = ReportPipeline::from_config(&config)?.run(&submission).await?;
//! println!("Break-even: {:?}", outcome.projection.break_even);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`] with [`domain::MedRoiError`].
//! Validation errors name the offending field; Drive and Sheets failures are
//! classified so callers can tell them apart from invalid input.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
