//! Pretty output formatting.

use labtrack_core::study::board::{BoardFilter, BoardStats, StatusKind};
use labtrack_core::study::{PatientLookup, StudyView, UserSummary};

use crate::client::health::HealthReport;

fn person(user: &UserSummary) -> String {
    user.profile
        .full_name()
        .unwrap_or_else(|| user.email.clone())
}

/// Format a study for display.
pub fn format_study(study: &StudyView) -> String {
    let mut output = format!(
        "{} [{}]\n  ID: {}\n  Date: {}\n  Patient: {} (dni {})",
        study.study_name,
        study.status.name,
        study.id,
        study.study_date,
        person(&study.patient),
        study.patient.dni
    );
    if let Some(biochemist) = &study.biochemist {
        output.push_str(&format!("\n  Biochemist: {}", person(biochemist)));
    }
    if let Some(insurance) = &study.social_insurance {
        output.push_str(&format!("\n  Insurance: {insurance}"));
    }
    if let Some(url) = &study.pdf_url {
        output.push_str(&format!("\n  PDF: {url}"));
    }
    output
}

/// Format studies for display.
pub fn format_studies(studies: &[StudyView]) -> String {
    format_study_list("STUDIES", studies.iter())
}

fn format_study_list<'a>(
    title: &str,
    studies: impl ExactSizeIterator<Item = &'a StudyView>,
) -> String {
    if studies.len() == 0 {
        return "No studies found.".to_string();
    }
    let mut output = format!("{title} ({})\n", studies.len());
    output.push_str(&"-".repeat(40));
    for study in studies {
        output.push_str(&format!("\n{}", format_study(study)));
        output.push('\n');
    }
    output
}

/// Format a patient lookup result for display.
pub fn format_patient(patient: &PatientLookup) -> String {
    let name = [patient.first_name.as_deref(), patient.last_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let name = if name.is_empty() { "(no name)" } else { name.as_str() };
    format!(
        "{name}\n  ID: {}\n  DNI: {}\n  Email: {}",
        patient.id, patient.dni, patient.email
    )
}

/// Format the patient board: counts per bucket, then the filtered studies.
pub fn format_board(studies: &[StudyView], filter: BoardFilter) -> String {
    let stats = BoardStats::from_studies(studies);
    let mut output = format!(
        "TOTAL {} | {} {} | {} {} | {} {} | {} {}\n",
        stats.total,
        StatusKind::Completed,
        stats.completed,
        StatusKind::InProgress,
        stats.in_progress,
        StatusKind::Partial,
        stats.partial,
        StatusKind::Pending,
        stats.pending
    );
    output.push_str(&"=".repeat(40));
    output.push('\n');

    let visible = labtrack_core::study::board::filter_studies(studies, filter);
    output.push_str(&format_study_list("STUDIES", visible.into_iter()));
    output
}

/// Format a readiness report for display.
pub fn format_health(report: &HealthReport) -> String {
    let mut output = format!("Status: {}", report.status);
    if let Some(count) = report.statuses {
        output.push_str(&format!("\n  Statuses: {count}"));
    }
    if let Some(error) = &report.error {
        output.push_str(&format!("\n  Error: {error}"));
    }
    output
}
