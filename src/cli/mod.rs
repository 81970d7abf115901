//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for medroi using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// medroi - hospital AI voice ROI calculator
#[derive(Parser, Debug)]
#[command(name = "medroi")]
#[command(version, about, long_about = None)]
#[command(author = "Medroi Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medroi.toml", env = "MEDROI_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDROI_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the projection for a submission, render and upload the report
    Calculate(commands::calculate::CalculateArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Create a sample configuration and submission
    Init(commands::init::InitArgs),
}
