use chrono::{DateTime, NaiveDate};

use super::{CreateStudyForm, StudyError};
use crate::api::FieldError;

/// Creation input after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidStudyInput {
    pub dni: String,
    pub study_name: String,
    pub study_date: NaiveDate,
    pub social_insurance: Option<String>,
    pub biochemist_id: Option<i64>,
}

/// Parses a study date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps keep the calendar date in their own offset.
pub fn parse_study_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Parses a study id path segment.
pub fn parse_study_id(value: &str) -> Result<i64, StudyError> {
    value.trim().parse::<i64>().map_err(|_| StudyError::InvalidId)
}

fn required<'a>(
    value: &'a Option<String>,
    field: &str,
    errors: &mut Vec<FieldError>,
) -> Option<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(FieldError::new(field, format!("{field} is required")));
            None
        }
    }
}

/// Validates the creation form, collecting every field error.
pub fn validate_create_study(form: &CreateStudyForm) -> Result<ValidStudyInput, StudyError> {
    let mut errors = Vec::new();

    let dni = required(&form.dni, CreateStudyForm::DNI, &mut errors);
    let study_name = required(&form.study_name, CreateStudyForm::STUDY_NAME, &mut errors);
    let study_date = required(&form.study_date, CreateStudyForm::STUDY_DATE, &mut errors).and_then(
        |raw| {
            let parsed = parse_study_date(raw);
            if parsed.is_none() {
                errors.push(FieldError::new(
                    CreateStudyForm::STUDY_DATE,
                    "studyDate must be a valid date (YYYY-MM-DD)",
                ));
            }
            parsed
        },
    );

    let biochemist_id = match form.biochemist_id.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => match raw.parse::<i64>() {
            Ok(id) if id > 0 => Some(id),
            _ => {
                errors.push(FieldError::new(
                    CreateStudyForm::BIOCHEMIST_ID,
                    "biochemistId must be a positive integer",
                ));
                None
            }
        },
        _ => None,
    };

    let social_insurance = form
        .social_insurance
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    match (dni, study_name, study_date) {
        (Some(dni), Some(study_name), Some(study_date)) if errors.is_empty() => {
            Ok(ValidStudyInput {
                dni: dni.to_string(),
                study_name: study_name.to_string(),
                study_date,
                social_insurance,
                biochemist_id,
            })
        }
        _ => Err(StudyError::Validation(errors)),
    }
}
