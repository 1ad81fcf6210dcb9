//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Timestamps are stored as RFC 3339 text with a fixed
//! width so that lexical order matches chronological order.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
PRAGMA foreign_keys = ON;

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    dni TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    first_name TEXT,
    last_name TEXT,
    document_number TEXT
);

-- Status reference table
CREATE TABLE IF NOT EXISTS statuses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- Studies table
CREATE TABLE IF NOT EXISTS studies (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL,
    biochemist_id INTEGER,
    study_name TEXT NOT NULL,
    study_date TEXT NOT NULL,
    social_insurance TEXT,
    status_id INTEGER NOT NULL,
    pdf_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (patient_id) REFERENCES users(id),
    FOREIGN KEY (biochemist_id) REFERENCES users(id),
    FOREIGN KEY (status_id) REFERENCES statuses(id)
);

-- Indexes for efficient queries
CREATE INDEX IF NOT EXISTS idx_studies_patient_id ON studies(patient_id);
CREATE INDEX IF NOT EXISTS idx_studies_biochemist_id ON studies(biochemist_id);
CREATE INDEX IF NOT EXISTS idx_studies_created_at ON studies(created_at);
"#;

// ============================================================================
// User queries
// ============================================================================

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, email, dni, role, first_name, last_name, document_number)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, email, dni, role, first_name, last_name, document_number
FROM users WHERE id = ?1
"#;

pub const SELECT_USER_BY_DNI: &str = r#"
SELECT id, email, dni, role, first_name, last_name, document_number
FROM users WHERE dni = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, email, dni, role, first_name, last_name, document_number
FROM users WHERE email = ?1
"#;

// ============================================================================
// Status queries
// ============================================================================

pub const INSERT_STATUS: &str = "INSERT INTO statuses (name) VALUES (?1)";

pub const SELECT_STATUS_BY_ID: &str = "SELECT id, name FROM statuses WHERE id = ?1";

pub const SELECT_STATUS_BY_NAME: &str = "SELECT id, name FROM statuses WHERE name = ?1";

pub const SELECT_STATUSES: &str = "SELECT id, name FROM statuses ORDER BY id";

// ============================================================================
// Study queries
// ============================================================================

pub const INSERT_STUDY: &str = r#"
INSERT INTO studies (
    patient_id, biochemist_id, study_name, study_date, social_insurance,
    status_id, pdf_url, created_at, updated_at
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
"#;

const STUDY_COLUMNS: &str = "id, patient_id, biochemist_id, study_name, study_date, \
    social_insurance, status_id, pdf_url, created_at, updated_at";

pub fn select_study_by_id() -> String {
    format!("SELECT {STUDY_COLUMNS} FROM studies WHERE id = ?1")
}

pub fn select_studies_by_biochemist() -> String {
    format!(
        "SELECT {STUDY_COLUMNS} FROM studies WHERE biochemist_id = ?1 \
         ORDER BY created_at DESC, id DESC"
    )
}

pub fn select_studies_by_patient() -> String {
    format!(
        "SELECT {STUDY_COLUMNS} FROM studies WHERE patient_id = ?1 \
         ORDER BY created_at DESC, id DESC"
    )
}

pub fn select_all_studies() -> String {
    format!("SELECT {STUDY_COLUMNS} FROM studies ORDER BY created_at DESC, id DESC")
}

pub const UPDATE_STUDY_STATUS: &str =
    "UPDATE studies SET status_id = ?2, updated_at = ?3 WHERE id = ?1";

pub const UPDATE_STUDY_PDF: &str = "UPDATE studies SET pdf_url = ?2, updated_at = ?3 WHERE id = ?1";

pub const DELETE_STUDY: &str = "DELETE FROM studies WHERE id = ?1";
