use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use labtrack_auth::auth_routes;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        health::{healthz, livez},
        patients::find_patient,
        studies::{
            attach_study_pdf, create_study, delete_study, get_study, list_all_studies,
            list_biochemist_studies, list_patient_studies, update_study_status,
        },
    },
    state::AppState,
};

/// Room for multipart boundaries and text fields on top of the PDF itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let api_routes = Router::new()
        .route("/studies", post(create_study))
        .route("/studies/biochemist/me", get(list_biochemist_studies))
        .route("/studies/all", get(list_all_studies))
        .route("/studies/patient/me", get(list_patient_studies))
        .route("/studies/patient/{dni}", get(find_patient))
        .route(
            "/studies/{id}",
            get(get_study).patch(attach_study_pdf).delete(delete_study),
        )
        .route("/studies/{id}/status", patch(update_study_status));

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .merge(auth_routes().with_state(state.auth.clone()))
        .nest_service("/uploads", ServeDir::new(&config.upload_dir))
        .layer(DefaultBodyLimit::max(
            config.upload_max_bytes + MULTIPART_OVERHEAD,
        ))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode};
    use labtrack_core::storage::{StatusRepository, StudyRepository};
    use labtrack_core::study::Status;
    use tower::ServiceExt;

    use crate::test_support::{
        json_request, multipart_request, read_json, request, TestApp, ADMIN, BIOCHEMIST,
        OTHER_BIOCHEMIST, OTHER_PATIENT, PATIENT, PATIENT_DNI,
    };

    const PDF: &[u8] = b"%PDF-1.4\n%test\n";

    fn form(dni: &str) -> Vec<(&'static str, String)> {
        vec![
            ("dni", dni.to_string()),
            ("studyName", "Hemograma completo".to_string()),
            ("studyDate", "2025-03-14".to_string()),
            ("socialInsurance", "OSDE".to_string()),
        ]
    }

    fn pdf_count(app: &TestApp) -> usize {
        std::fs::read_dir(app.pdf_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[tokio::test]
    async fn test_livez() {
        let app = TestApp::new().await;
        let response = app.send(request("GET", "/livez", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_healthz_reports_statuses() {
        let app = TestApp::new().await;
        let (status, json) = read_json(app.send(request("GET", "/healthz", None)).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["statuses"], 4);
    }

    #[tokio::test]
    async fn test_create_study_defaults_to_caller_and_in_progress() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(multipart_request("POST", "/api/studies", &token, &form(PATIENT_DNI), None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED, "{json}");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["biochemistId"], BIOCHEMIST);
        assert_eq!(json["data"]["status"]["name"], "IN_PROGRESS");
        assert_eq!(json["data"]["patient"]["dni"], PATIENT_DNI);
        assert_eq!(json["data"]["studyDate"], "2025-03-14");
        assert_eq!(json["data"]["pdfUrl"], serde_json::Value::Null);
        assert_eq!(pdf_count(&app), 0);
    }

    #[tokio::test]
    async fn test_create_study_with_pdf_serves_file() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(multipart_request(
                "POST",
                "/api/studies",
                &token,
                &form(PATIENT_DNI),
                Some(("resultado.pdf", "application/pdf", PDF)),
            ))
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");

        let url = json["data"]["pdfUrl"].as_str().unwrap().to_string();
        assert!(url.starts_with("/uploads/pdfs/study-"), "{url}");
        assert!(url.ends_with(".pdf"));
        assert_eq!(pdf_count(&app), 1);

        let response = app.send(request("GET", &url, None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        assert_eq!(&body[..], PDF);
    }

    #[tokio::test]
    async fn test_create_study_with_explicit_biochemist() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let mut fields = form(PATIENT_DNI);
        fields.push(("biochemistId", OTHER_BIOCHEMIST.to_string()));

        let (status, json) = read_json(
            app.send(multipart_request("POST", "/api/studies", &token, &fields, None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["biochemistId"], OTHER_BIOCHEMIST);
        assert_eq!(json["data"]["biochemist"]["id"], OTHER_BIOCHEMIST);
    }

    #[tokio::test]
    async fn test_create_study_unknown_dni_leaves_nothing_behind() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(multipart_request(
                "POST",
                "/api/studies",
                &token,
                &form("99999999"),
                Some(("resultado.pdf", "application/pdf", PDF)),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Patient with the given dni not found");
        assert!(app.repo.list_all().await.unwrap().is_empty());
        assert_eq!(pdf_count(&app), 0);
    }

    #[tokio::test]
    async fn test_create_study_dni_of_non_patient_is_not_found() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let biochemist_dni = app.user(OTHER_BIOCHEMIST).await.dni;

        let (status, _) = read_json(
            app.send(multipart_request(
                "POST",
                "/api/studies",
                &token,
                &form(&biochemist_dni),
                None,
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_study_patient_as_biochemist_is_422() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let mut fields = form(PATIENT_DNI);
        fields.push(("biochemistId", OTHER_PATIENT.to_string()));

        let (status, json) = read_json(
            app.send(multipart_request(
                "POST",
                "/api/studies",
                &token,
                &fields,
                Some(("resultado.pdf", "application/pdf", PDF)),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
        assert!(app.repo.list_all().await.unwrap().is_empty());
        assert_eq!(pdf_count(&app), 0);
    }

    #[tokio::test]
    async fn test_create_study_unknown_biochemist_is_404() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let mut fields = form(PATIENT_DNI);
        fields.push(("biochemistId", "999".to_string()));

        let (status, json) = read_json(
            app.send(multipart_request("POST", "/api/studies", &token, &fields, None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Biochemist not found");
    }

    #[tokio::test]
    async fn test_create_study_reports_every_missing_field() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let fields = vec![("studyDate", "14/03/2025".to_string())];

        let (status, json) = read_json(
            app.send(multipart_request("POST", "/api/studies", &token, &fields, None))
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let fields: Vec<&str> = json["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        assert_eq!(fields, vec!["dni", "studyName", "studyDate"]);
    }

    #[tokio::test]
    async fn test_create_study_rejects_non_pdf() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(multipart_request(
                "POST",
                "/api/studies",
                &token,
                &form(PATIENT_DNI),
                Some(("foto.png", "image/png", &b"\x89PNG"[..])),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Error uploading file");
        assert!(app.repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_study_malformed_multipart_is_upload_error() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/studies")
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{}"))
            .unwrap();
        let (status, json) = read_json(app.send(req).await).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Error uploading file");
    }

    #[tokio::test]
    async fn test_create_study_requires_biochemist() {
        let app = TestApp::new().await;

        let anonymous = app.send(request("POST", "/api/studies", None)).await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

        for user in [PATIENT, ADMIN] {
            let token = app.token(user).await;
            let response = app
                .send(multipart_request("POST", "/api/studies", &token, &form(PATIENT_DNI), None))
                .await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
        }
        assert!(app.repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_routes_filter_by_caller() {
        let app = TestApp::new().await;
        app.insert_study(1, PATIENT, Some(BIOCHEMIST)).await;
        app.insert_study(2, PATIENT, Some(OTHER_BIOCHEMIST)).await;
        app.insert_study(3, OTHER_PATIENT, Some(BIOCHEMIST)).await;

        let ids = |json: &serde_json::Value| -> Vec<i64> {
            json["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|s| s["id"].as_i64().unwrap())
                .collect()
        };

        let token = app.token(BIOCHEMIST).await;
        let (status, json) = read_json(
            app.send(request("GET", "/api/studies/biochemist/me", Some(&token)))
                .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids(&json), vec![3, 1]);

        let token = app.token(PATIENT).await;
        let (_, json) =
            read_json(app.send(request("GET", "/api/studies/patient/me", Some(&token))).await)
                .await;
        assert_eq!(ids(&json), vec![2, 1]);

        let token = app.token(ADMIN).await;
        let (_, json) =
            read_json(app.send(request("GET", "/api/studies/all", Some(&token))).await).await;
        assert_eq!(ids(&json), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn test_all_studies_requires_admin() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;
        let response = app
            .send(request("GET", "/api/studies/all", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_get_study_access() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;

        let cases = [
            (BIOCHEMIST, StatusCode::OK),
            (ADMIN, StatusCode::OK),
            (OTHER_BIOCHEMIST, StatusCode::FORBIDDEN),
            (PATIENT, StatusCode::FORBIDDEN),
        ];
        for (user, expected) in cases {
            let token = app.token(user).await;
            let response = app
                .send(request("GET", "/api/studies/42", Some(&token)))
                .await;
            assert_eq!(response.status(), expected, "user {user}");
        }
    }

    #[tokio::test]
    async fn test_get_study_bad_and_unknown_ids() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let response = app
            .send(request("GET", "/api/studies/abc", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let (status, json) =
            read_json(app.send(request("GET", "/api/studies/404", Some(&token))).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Study not found");
    }

    #[tokio::test]
    async fn test_update_status_by_assigned_biochemist() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(json_request(
                "PATCH",
                "/api/studies/42/status",
                &token,
                serde_json::json!({"statusName": "COMPLETED"}),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["status"]["name"], "COMPLETED");
        let stored = app.repo.get_study(42).await.unwrap().unwrap();
        assert!(stored.updated_at > stored.created_at);
    }

    #[tokio::test]
    async fn test_update_status_accepts_status_alias() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(json_request(
                "PATCH",
                "/api/studies/42/status",
                &token,
                serde_json::json!({"status": "PARTIAL"}),
            ))
            .await,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["status"]["name"], "PARTIAL");
    }

    #[tokio::test]
    async fn test_update_status_by_other_biochemist_or_admin_is_forbidden() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let before = app.repo.get_study(42).await.unwrap().unwrap();

        let token = app.token(OTHER_BIOCHEMIST).await;
        let response = app
            .send(json_request(
                "PATCH",
                "/api/studies/42/status",
                &token,
                serde_json::json!({"statusName": "COMPLETED"}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // ADMIN is stopped by the biochemist gate.
        let token = app.token(ADMIN).await;
        let response = app
            .send(json_request(
                "PATCH",
                "/api/studies/42/status",
                &token,
                serde_json::json!({"statusName": "COMPLETED"}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        assert_eq!(app.repo.get_study(42).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_status_unknown_name_leaves_study_unchanged() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let before = app.repo.get_study(42).await.unwrap().unwrap();
        let token = app.token(BIOCHEMIST).await;

        for name in ["ARCHIVED", "completed"] {
            let (status, json) = read_json(
                app.send(json_request(
                    "PATCH",
                    "/api/studies/42/status",
                    &token,
                    serde_json::json!({"statusName": name}),
                ))
                .await,
            )
            .await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["message"], "Status not found");
        }

        assert_eq!(app.repo.get_study(42).await.unwrap().unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_status_bad_requests() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let token = app.token(BIOCHEMIST).await;

        let response = app
            .send(json_request(
                "PATCH",
                "/api/studies/x/status",
                &token,
                serde_json::json!({"statusName": "COMPLETED"}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .send(json_request(
                "PATCH",
                "/api/studies/42/status",
                &token,
                serde_json::json!({"statusName": "  "}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let malformed = Request::builder()
            .method("PATCH")
            .uri("/api/studies/42/status")
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let response = app.send(malformed).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .send(json_request(
                "PATCH",
                "/api/studies/7/status",
                &token,
                serde_json::json!({"statusName": "COMPLETED"}),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_attach_pdf_replaces_previous_file() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        let token = app.token(BIOCHEMIST).await;

        let attach = || {
            multipart_request(
                "PATCH",
                "/api/studies/42",
                &token,
                &[],
                Some(("informe.pdf", "application/pdf", PDF)),
            )
        };

        let (status, first) = read_json(app.send(attach()).await).await;
        assert_eq!(status, StatusCode::OK, "{first}");
        assert_eq!(pdf_count(&app), 1);

        let (_, second) = read_json(app.send(attach()).await).await;
        assert_ne!(first["data"]["pdfUrl"], second["data"]["pdfUrl"]);
        assert_eq!(pdf_count(&app), 1);
    }

    #[tokio::test]
    async fn test_attach_pdf_errors() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;

        let token = app.token(BIOCHEMIST).await;
        let response = app
            .send(multipart_request("PATCH", "/api/studies/42", &token, &[], None))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .send(multipart_request(
                "PATCH",
                "/api/studies/404",
                &token,
                &[],
                Some(("informe.pdf", "application/pdf", PDF)),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let token = app.token(OTHER_BIOCHEMIST).await;
        let response = app
            .send(multipart_request(
                "PATCH",
                "/api/studies/42",
                &token,
                &[],
                Some(("informe.pdf", "application/pdf", PDF)),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(pdf_count(&app), 0);
    }

    #[tokio::test]
    async fn test_delete_study_rules() {
        let app = TestApp::new().await;
        app.insert_study(42, PATIENT, Some(BIOCHEMIST)).await;
        app.insert_study(43, PATIENT, Some(BIOCHEMIST)).await;

        let token = app.token(OTHER_BIOCHEMIST).await;
        let response = app
            .send(request("DELETE", "/api/studies/42", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let token = app.token(BIOCHEMIST).await;
        let (status, json) =
            read_json(app.send(request("DELETE", "/api/studies/42", Some(&token))).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(app.repo.get_study(42).await.unwrap(), None);

        let response = app
            .send(request("DELETE", "/api/studies/42", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let token = app.token(ADMIN).await;
        let response = app
            .send(request("DELETE", "/api/studies/43", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_patient_lookup() {
        let app = TestApp::new().await;
        let token = app.token(BIOCHEMIST).await;

        let (status, json) = read_json(
            app.send(request(
                "GET",
                &format!("/api/studies/patient/%20{PATIENT_DNI}%20"),
                Some(&token),
            ))
            .await,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], PATIENT);
        assert_eq!(json["data"]["dni"], PATIENT_DNI);
        assert_eq!(json["data"]["firstName"], "Ana");

        let response = app
            .send(request("GET", "/api/studies/patient/11111111", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .send(request("GET", "/api/studies/patient/%20", Some(&token)))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_patient_lookup_requires_biochemist() {
        let app = TestApp::new().await;
        let token = app.token(PATIENT).await;
        let response = app
            .send(request(
                "GET",
                &format!("/api/studies/patient/{PATIENT_DNI}"),
                Some(&token),
            ))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_auth_routes_are_mounted() {
        let app = TestApp::new().await;
        let token = app.token(PATIENT).await;
        let (status, json) =
            read_json(app.send(request("GET", "/auth/me", Some(&token))).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["id"], PATIENT);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin_with_credentials() {
        let app = TestApp::new().await;
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/studies/all")
            .header("origin", "http://localhost:3001")
            .header("access-control-request-method", "GET")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(req).await.unwrap();
        let headers = response.headers();
        assert_eq!(
            headers.get("access-control-allow-origin").unwrap(),
            "http://localhost:3001"
        );
        assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    }

    #[tokio::test]
    async fn test_study_status_seeded_at_startup() {
        let app = TestApp::new().await;
        let status = app.repo.get_status_by_name(Status::IN_PROGRESS).await.unwrap();
        assert!(status.is_some());
    }
}
