//! Wire representations of studies and patients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Status, Study};
use crate::user::{Profile, Role, User};

/// Public view of a user embedded in a study.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    pub dni: String,
    pub role: Role,
    pub profile: Profile,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            dni: user.dni.clone(),
            role: user.role,
            profile: user.profile.clone(),
        }
    }
}

/// A study with its patient, biochemist and status resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyView {
    pub id: i64,
    pub study_name: String,
    pub study_date: NaiveDate,
    pub social_insurance: Option<String>,
    pub pdf_url: Option<String>,
    pub patient_id: i64,
    pub biochemist_id: Option<i64>,
    pub status: Status,
    pub patient: UserSummary,
    pub biochemist: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudyView {
    pub fn new(study: Study, status: Status, patient: &User, biochemist: Option<&User>) -> Self {
        Self {
            id: study.id,
            study_name: study.study_name,
            study_date: study.study_date,
            social_insurance: study.social_insurance,
            pdf_url: study.pdf_url,
            patient_id: study.patient_id,
            biochemist_id: study.biochemist_id,
            status,
            patient: patient.into(),
            biochemist: biochemist.map(UserSummary::from),
            created_at: study.created_at,
            updated_at: study.updated_at,
        }
    }
}

/// Patient identity returned by the dni lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLookup {
    pub id: i64,
    pub dni: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
}

impl From<&User> for PatientLookup {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            dni: user.dni.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            email: user.email.clone(),
        }
    }
}
