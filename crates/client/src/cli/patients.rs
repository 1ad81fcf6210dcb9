//! Patient CLI commands.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
pub struct PatientsCommand {
    #[command(subcommand)]
    pub action: PatientsAction,
}

#[derive(Debug, Subcommand)]
pub enum PatientsAction {
    /// Find a patient by dni (biochemist).
    Lookup {
        /// Patient dni.
        dni: String,
    },
}
