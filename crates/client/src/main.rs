//! labtrack-client CLI entry point.

use clap::Parser;
use labtrack_client::cli::board::BoardCommand;
use labtrack_client::cli::health::HealthAction;
use labtrack_client::cli::patients::PatientsAction;
use labtrack_client::cli::studies::StudiesAction;
use labtrack_client::cli::{Cli, Commands};
use labtrack_client::output::{emit, pretty};
use labtrack_client::LabtrackClient;
use labtrack_core::study::board::filter_studies;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = LabtrackClient::new(&cli.base_url, cli.token.clone());
    let format = cli.format;

    match cli.command {
        Commands::Studies(studies_cmd) => match studies_cmd.action {
            StudiesAction::Mine { status } => {
                let mut studies = client.list_my_studies().await?;
                if let Some(status) = status {
                    studies.retain(|s| s.status.name.eq_ignore_ascii_case(status.trim()));
                }
                emit(studies.as_slice(), format, pretty::format_studies);
            }
            StudiesAction::All => {
                let studies = client.list_all_studies().await?;
                emit(studies.as_slice(), format, pretty::format_studies);
            }
            StudiesAction::Get { id } => {
                let study = client.get_study(id).await?;
                emit(&study, format, pretty::format_study);
            }
            StudiesAction::Create(args) => {
                let study = client.create_study(&args.form(), args.pdf.as_deref()).await?;
                emit(&study, format, |s| format!("Created:\n{}", pretty::format_study(s)));
            }
            StudiesAction::Status { id, status } => {
                let study = client.update_study_status(id, &status).await?;
                emit(&study, format, |s| format!("Updated:\n{}", pretty::format_study(s)));
            }
            StudiesAction::Attach { id, pdf } => {
                let study = client.attach_pdf(id, &pdf).await?;
                emit(&study, format, |s| format!("Attached:\n{}", pretty::format_study(s)));
            }
            StudiesAction::Delete { id } => {
                let message = client.delete_study(id).await?;
                if !cli.quiet {
                    println!("{message} (study {id})");
                }
            }
        },
        Commands::Patients(patients_cmd) => match patients_cmd.action {
            PatientsAction::Lookup { dni } => {
                let patient = client.find_patient(&dni).await?;
                emit(&patient, format, pretty::format_patient);
            }
        },
        Commands::Board(BoardCommand { filter }) => {
            let studies = client.list_patient_studies().await?;
            let visible = filter_studies(&studies, filter);
            emit(&visible, format, |_| pretty::format_board(&studies, filter));
        }
        Commands::Health(health_cmd) => match health_cmd.action {
            HealthAction::Live => {
                let alive = client.livez().await?;
                if !cli.quiet {
                    println!("{}", if alive { "alive" } else { "not alive" });
                }
                if !alive {
                    std::process::exit(1);
                }
            }
            HealthAction::Ready => {
                let report = client.healthz().await?;
                emit(&report, format, pretty::format_health);
                if !report.is_ok() {
                    std::process::exit(1);
                }
            }
        },
    }

    Ok(())
}
