//! CLI command definitions.

pub mod board;
pub mod health;
pub mod patients;
pub mod studies;

use clap::{Parser, Subcommand, ValueEnum};

/// CLI client for labtrack API.
#[derive(Debug, Parser)]
#[command(name = "labtrack-client")]
#[command(about = "CLI client for labtrack API", long_about = None)]
pub struct Cli {
    /// Server base URL.
    #[arg(long, env = "LABTRACK_URL", default_value = "http://localhost:3000")]
    pub base_url: String,

    /// Session token sent as a bearer credential.
    #[arg(long, env = "LABTRACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Study management.
    Studies(studies::StudiesCommand),
    /// Patient lookup.
    Patients(patients::PatientsCommand),
    /// The authenticated patient's study board.
    Board(board::BoardCommand),
    /// Server health checks.
    Health(health::HealthCommand),
}
