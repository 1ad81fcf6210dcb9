//! Router fixtures shared by the handler tests.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use labtrack_auth::{AuthConfig, InMemorySessionStore};
use labtrack_core::storage::{StatusRepository, UserRepository};
use labtrack_core::study::{NewStudy, Status};
use labtrack_core::user::{Role, User};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::app::create_app;
use crate::config::Config;
use crate::state::AppState;
use crate::storage::{inmemory::InMemoryRepository, seed_statuses};

pub const ADMIN: i64 = 1;
pub const PATIENT: i64 = 3;
pub const OTHER_PATIENT: i64 = 4;
pub const BIOCHEMIST: i64 = 7;
pub const OTHER_BIOCHEMIST: i64 = 8;

pub const PATIENT_DNI: &str = "38374909";

const BOUNDARY: &str = "labtrack-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub repo: InMemoryRepository,
    config: Config,
    _uploads: TempDir,
}

impl TestApp {
    /// Seeded statuses and no users.
    pub async fn empty() -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let config = Config::for_tests(uploads.path());
        let repo = InMemoryRepository::new();
        seed_statuses(&repo).await.unwrap();

        let shared = Arc::new(repo.clone());
        let state = AppState::build(
            shared.clone(),
            shared.clone(),
            shared,
            Arc::new(InMemorySessionStore::new()),
            &config,
            AuthConfig::default(),
        );

        Self {
            router: create_app(state.clone(), &config),
            state,
            repo,
            config,
            _uploads: uploads,
        }
    }

    /// Seeded statuses, one admin, two patients and two biochemists.
    pub async fn new() -> Self {
        let app = Self::empty().await;

        for user in [
            User::new(ADMIN, "admin@example.com", "10000001", Role::Admin).with_name("Root", "Admin"),
            User::new(PATIENT, "ana@example.com", PATIENT_DNI, Role::Patient).with_name("Ana", "Paz"),
            User::new(OTHER_PATIENT, "juan@example.com", "40111222", Role::Patient)
                .with_name("Juan", "Pérez"),
            User::new(BIOCHEMIST, "bio@example.com", "20111222", Role::Biochemist)
                .with_name("Luis", "Gómez"),
            User::new(OTHER_BIOCHEMIST, "bio2@example.com", "20333444", Role::Biochemist)
                .with_name("Marta", "Ruiz"),
        ] {
            app.repo.create_user(&user).await.unwrap();
        }

        app
    }

    pub fn pdf_dir(&self) -> PathBuf {
        self.config.pdf_dir()
    }

    pub async fn user(&self, id: i64) -> User {
        self.repo.get_user(id).await.unwrap().unwrap()
    }

    /// Issues a fresh session token for `user_id`.
    pub async fn token(&self, user_id: i64) -> String {
        self.state
            .auth
            .issue_session(user_id)
            .await
            .unwrap()
            .id
            .to_string()
    }

    /// Stores an `IN_PROGRESS` study with a fixed id. Higher ids are newer.
    pub async fn insert_study(&self, id: i64, patient_id: i64, biochemist_id: Option<i64>) {
        let created_at = Utc::now() - Duration::days(1) + Duration::seconds(id);
        let study = NewStudy {
            patient_id,
            biochemist_id,
            study_name: format!("Study {id}"),
            study_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            social_insurance: None,
            status_id: self.status_id(Status::IN_PROGRESS).await,
            pdf_url: None,
        }
        .into_study(id, created_at);
        self.repo.insert_study(study).await;
    }

    async fn status_id(&self, name: &str) -> i64 {
        self.repo
            .get_status_by_name(name)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a `multipart/form-data` request with text fields and an optional
/// `pdf` part given as `(filename, content type, bytes)`.
pub fn multipart_request(
    method: &str,
    uri: &str,
    token: &str,
    fields: &[(&str, String)],
    file: Option<(&str, &str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"pdf\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn read_json(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}
