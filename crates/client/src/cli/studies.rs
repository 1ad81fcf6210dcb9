//! Studies CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use labtrack_core::study::CreateStudyForm;

/// Study management commands.
#[derive(Debug, Parser)]
pub struct StudiesCommand {
    #[command(subcommand)]
    pub action: StudiesAction,
}

/// Available study actions.
#[derive(Debug, Subcommand)]
pub enum StudiesAction {
    /// List studies assigned to you (biochemist).
    Mine {
        /// Only show studies in this status.
        #[arg(long)]
        status: Option<String>,
    },
    /// List every study (admin).
    All,
    /// Get a study by ID.
    Get {
        /// Study ID.
        id: i64,
    },
    /// Create a study for a patient.
    Create(CreateArgs),
    /// Change the status of a study.
    Status {
        /// Study ID.
        id: i64,
        /// Status name, e.g. COMPLETED.
        status: String,
    },
    /// Attach or replace the PDF of a study.
    Attach {
        /// Study ID.
        id: i64,
        /// Path to the PDF.
        pdf: PathBuf,
    },
    /// Delete a study.
    Delete {
        /// Study ID.
        id: i64,
    },
}

/// Arguments of `studies create`.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Patient dni.
    #[arg(long)]
    pub dni: String,
    /// Study name.
    #[arg(long)]
    pub name: String,
    /// Study date (YYYY-MM-DD).
    #[arg(long)]
    pub date: String,
    /// Social insurance.
    #[arg(long)]
    pub insurance: Option<String>,
    /// Biochemist ID. Defaults to the caller.
    #[arg(long)]
    pub biochemist: Option<i64>,
    /// PDF to upload with the study.
    #[arg(long)]
    pub pdf: Option<PathBuf>,
}

impl CreateArgs {
    /// The form as the server expects it.
    pub fn form(&self) -> CreateStudyForm {
        CreateStudyForm {
            dni: Some(self.dni.clone()),
            study_name: Some(self.name.clone()),
            study_date: Some(self.date.clone()),
            social_insurance: self.insurance.clone(),
            biochemist_id: self.biochemist.map(|id| id.to_string()),
        }
    }
}
