use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Account role. Every authorization decision matches on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Patient,
    Biochemist,
    Admin,
}

impl Role {
    /// Stable name used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "PATIENT",
            Role::Biochemist => "BIOCHEMIST",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PATIENT" => Ok(Role::Patient),
            "BIOCHEMIST" => Ok(Role::Biochemist),
            "ADMIN" => Ok(Role::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}

/// Personal data attached to a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub document_number: Option<String>,
}

impl Profile {
    /// "First Last", skipping whichever part is missing.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|p| !p.trim().is_empty())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}

/// A user account: patient, biochemist or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    /// National identity document number.
    pub dni: String,
    pub role: Role,
    #[serde(default)]
    pub profile: Profile,
}

impl User {
    /// Creates a user with an empty profile.
    pub fn new(id: i64, email: impl Into<String>, dni: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            dni: dni.into(),
            role,
            profile: Profile::default(),
        }
    }

    /// Sets first and last name, using the dni as document number.
    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.profile = Profile {
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            document_number: Some(self.dni.clone()),
        };
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
