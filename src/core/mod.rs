//! Core business logic
//!
//! - [`engine`] - the five-year ROI projection
//! - [`scenario`] - deriving engine figures from hospital operations
//! - [`chart`] - chart series for the report
//! - [`format`] - currency, percentage, timestamp and file name formatting
//! - [`pipeline`] - one submission end to end: project, render, upload

pub mod chart;
pub mod engine;
pub mod format;
pub mod pipeline;
pub mod scenario;

pub use engine::project;
pub use pipeline::{ReportOutcome, ReportPipeline};
pub use scenario::input_from_submission;
