//! Request payloads for study operations, shared by the server and the client.

use serde::{Deserialize, Serialize};

use crate::fields::{deserialize_optional_string, deserialize_optional_text};

/// Text fields of the study creation form, exactly as received.
///
/// Values stay as raw text so validation can report every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudyForm {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub dni: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub study_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub study_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub social_insurance: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub biochemist_id: Option<String>,
}

impl CreateStudyForm {
    pub const DNI: &'static str = "dni";
    pub const STUDY_NAME: &'static str = "studyName";
    pub const STUDY_DATE: &'static str = "studyDate";
    pub const SOCIAL_INSURANCE: &'static str = "socialInsurance";
    pub const BIOCHEMIST_ID: &'static str = "biochemistId";
    /// Name of the multipart file field.
    pub const PDF: &'static str = "pdf";

    /// Stores a multipart text field. Blank values count as absent and
    /// unknown field names are ignored.
    ///
    /// Returns false when the name is not a form field.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let value = Some(value).filter(|v| !v.trim().is_empty());
        let slot = match name {
            Self::DNI => &mut self.dni,
            Self::STUDY_NAME => &mut self.study_name,
            Self::STUDY_DATE => &mut self.study_date,
            Self::SOCIAL_INSURANCE => &mut self.social_insurance,
            Self::BIOCHEMIST_ID => &mut self.biochemist_id,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Text fields in wire form, for building a multipart body.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [
            (Self::DNI, &self.dni),
            (Self::STUDY_NAME, &self.study_name),
            (Self::STUDY_DATE, &self.study_date),
            (Self::SOCIAL_INSURANCE, &self.social_insurance),
            (Self::BIOCHEMIST_ID, &self.biochemist_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }
}

/// Body of `PATCH /api/studies/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    #[serde(
        default,
        alias = "status",
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub status_name: Option<String>,
}

impl UpdateStatusRequest {
    pub fn new(status_name: impl Into<String>) -> Self {
        Self {
            status_name: Some(status_name.into()),
        }
    }
}
