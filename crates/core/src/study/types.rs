use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Names of the rows seeded into the status reference table.
pub const STATUS_NAMES: [&str; 4] = [
    Status::IN_PROGRESS,
    Status::COMPLETED,
    Status::PARTIAL,
    Status::PENDING,
];

/// A named progress stage. Statuses are reference data, not an enum: any
/// stored name can follow any other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
}

impl Status {
    pub const IN_PROGRESS: &'static str = "IN_PROGRESS";
    pub const COMPLETED: &'static str = "COMPLETED";
    pub const PARTIAL: &'static str = "PARTIAL";
    pub const PENDING: &'static str = "PENDING";

    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A lab study owned by one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Study {
    pub id: i64,
    pub patient_id: i64,
    pub biochemist_id: Option<i64>,
    pub study_name: String,
    pub study_date: NaiveDate,
    pub social_insurance: Option<String>,
    pub status_id: i64,
    /// Public path of the uploaded PDF, e.g. `/uploads/pdfs/study-....pdf`.
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Study {
    /// True when `user_id` is the assigned biochemist.
    pub fn is_assigned_to(&self, user_id: i64) -> bool {
        self.biochemist_id == Some(user_id)
    }
}

/// Insert payload for a study. Ids and timestamps come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudy {
    pub patient_id: i64,
    pub biochemist_id: Option<i64>,
    pub study_name: String,
    pub study_date: NaiveDate,
    pub social_insurance: Option<String>,
    pub status_id: i64,
    pub pdf_url: Option<String>,
}

impl NewStudy {
    /// Builds the study with the given id and timestamp.
    pub fn into_study(self, id: i64, now: DateTime<Utc>) -> Study {
        Study {
            id,
            patient_id: self.patient_id,
            biochemist_id: self.biochemist_id,
            study_name: self.study_name,
            study_date: self.study_date,
            social_insurance: self.social_insurance,
            status_id: self.status_id,
            pdf_url: self.pdf_url,
            created_at: now,
            updated_at: now,
        }
    }
}
