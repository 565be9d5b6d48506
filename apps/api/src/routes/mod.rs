pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::jobs::handlers as jobs;
use crate::results::handlers as results;
use crate::state::AppState;
use crate::web::handlers as web;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // HTML page
        .route("/", get(web::handle_index))
        .route("/analyze", post(web::handle_analyze_form))
        .route("/jobs", post(web::handle_add_job_form))
        // JSON API
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/analyses", post(analysis::handle_analyze))
        .route(
            "/api/v1/analyses/recent",
            get(results::handle_recent_analyses),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::matcher::TfIdfScorer;
    use crate::config::Config;
    use crate::db::memory_pool;
    use crate::jobs::store::{count_jobs, seed_sample_jobs};
    use crate::results::store::{recent_results, RECENT_ANALYSES_LIMIT};

    const BOUNDARY: &str = "X-RESUME-ANALYZER-BOUNDARY";
    const RESUME_PDF: &[u8] = include_bytes!("../../tests/fixtures/resume.pdf");

    async fn test_state() -> AppState {
        let db = memory_pool().await;
        seed_sample_jobs(&db).await.unwrap();
        AppState {
            db,
            config: Config::for_tests(),
            scorer: Arc::new(TfIdfScorer),
        }
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(
        text_fields: &[(&str, &str)],
        file: Option<(&str, &str, &[u8])>,
    ) -> Request<Body> {
        let mut body: Vec<u8> = Vec::new();
        if let Some((file_name, content_type, content)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume_file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        for (name, value) in text_fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_index_lists_seeded_jobs() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Data Analyst"));
        assert!(html.contains("Machine Learning Engineer"));
        assert!(html.contains("Backend Developer"));
        assert!(html.contains("No recent analyses yet."));
    }

    #[tokio::test]
    async fn test_api_create_job_then_list() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/jobs",
                json!({
                    "title": "Data Engineer",
                    "company": "Acme",
                    "skills_required": "Python, SQL, Docker",
                    "description": "Pipelines."
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["title"], "Data Engineer");

        let response = app.oneshot(get_request("/api/v1/jobs")).await.unwrap();
        let listed = body_json(response).await;
        let listed = listed.as_array().unwrap();
        assert_eq!(listed.len(), 4);
        assert_eq!(listed[3]["job_id"], created["job_id"]);
    }

    #[tokio::test]
    async fn test_api_create_job_blank_field_is_rejected() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/jobs",
                json!({
                    "title": "Data Engineer",
                    "company": "",
                    "skills_required": "Python",
                    "description": "Pipelines."
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(count_jobs(&state.db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_api_get_unknown_job_is_404() {
        let app = build_router(test_state().await);
        let response = app.oneshot(get_request("/api/v1/jobs/999")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_form_add_job_success_shows_new_listing() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(form_request(
                "/jobs",
                "title=Data+Engineer&company=Acme&skills_required=Python%2C+Spark&description=Pipelines",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("added successfully!"));
        assert!(html.contains("Python, Spark"));
        assert_eq!(count_jobs(&state.db).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_form_add_job_blank_field_shows_error() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(form_request(
                "/jobs",
                "title=Data+Engineer&company=Acme&skills_required=&description=Pipelines",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Please fill in all fields before submitting."));
        assert_eq!(count_jobs(&state.db).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_api_analysis_end_to_end() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/analyses",
                json!({
                    "name": "Ada",
                    "email": "ada@example.com",
                    "resume_text": "I know Python, SQL and Tableau"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let report = body_json(response).await;
        assert_eq!(report["best_match"]["title"], "Data Analyst");
        assert_eq!(report["missing_skills_display"], "powerbi, excel");
        assert!(report["match_score"].as_f64().unwrap() > 0.0);

        let response = app.oneshot(get_request("/api/v1/analyses/recent")).await.unwrap();
        let recent = body_json(response).await;
        assert_eq!(recent.as_array().unwrap().len(), 1);
        assert_eq!(recent[0]["user_name"], "Ada");
    }

    #[tokio::test]
    async fn test_api_analysis_blank_text_is_400() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/analyses",
                json!({ "name": "Ada", "email": "", "resume_text": "   " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(recent_results(&state.db, RECENT_ANALYSES_LIMIT)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_form_analysis_renders_best_match() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(multipart_request(
                &[
                    ("resume_text", "I know Python, SQL and Tableau"),
                    ("name", "Ada"),
                    ("email", "ada@example.com"),
                ],
                Some(("", "application/octet-stream", b"".as_slice())),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Best Match:"));
        assert!(html.contains("powerbi, excel"));
        assert!(html.contains("Result saved successfully!"));

        let recent = recent_results(&state.db, RECENT_ANALYSES_LIMIT).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].user_email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_form_analysis_reads_text_upload() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(multipart_request(
                &[("name", "Bo"), ("email", "bo@example.com")],
                Some(("cv.txt", "text/plain", b"Docker, Django, MySQL and REST API work".as_slice())),
            ))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Backend Developer @ Amazon"));
        assert!(html.contains("Missing Skills:</b> python"));
    }

    #[tokio::test]
    async fn test_form_analysis_reads_pdf_upload() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(multipart_request(
                &[("name", "Ada"), ("email", "ada@example.com")],
                Some(("cv.pdf", "application/pdf", RESUME_PDF)),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Data Analyst @ Google"));
        assert!(html.contains("Missing Skills:</b> powerbi, excel"));

        let recent = recent_results(&state.db, RECENT_ANALYSES_LIMIT).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].missing_skills, "powerbi, excel");
    }

    #[tokio::test]
    async fn test_form_analysis_blank_shows_warning_and_records_nothing() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(multipart_request(
                &[("resume_text", "   "), ("name", "Ada"), ("email", "")],
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"class="notice notice-warning""#));
        assert!(html.contains("Please upload or paste your resume content first."));
        assert!(recent_results(&state.db, RECENT_ANALYSES_LIMIT)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_form_analysis_unreadable_pdf_shows_error() {
        let state = test_state().await;
        let app = build_router(state.clone());

        let response = app
            .oneshot(multipart_request(
                &[("name", "Ada")],
                Some(("cv.pdf", "application/pdf", b"definitely not a pdf".as_slice())),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"class="notice notice-error""#));
        assert!(recent_results(&state.db, RECENT_ANALYSES_LIMIT)
            .await
            .unwrap()
            .is_empty());
    }
}
