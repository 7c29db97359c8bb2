pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Screening page
        .route("/", get(handlers::handle_index))
        .route("/screen", post(handlers::handle_screen_form))
        // Screening API
        .route(
            "/api/v1/screenings",
            post(handlers::handle_create_screening),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::screening::ranking_client::RankingError;
    use crate::test_support::{ranking, Scripted, ScriptedRankingClient};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app(client: Arc<ScriptedRankingClient>) -> Router {
        build_router(AppState {
            ranking_client: client,
            config: Config {
                gemini_api_key: "test-key".to_string(),
                gemini_model: "gemini-test".to_string(),
                gemini_base_url: "http://127.0.0.1:9".to_string(),
                llm_timeout_secs: 5,
                port: 0,
                rust_log: "debug".to_string(),
            },
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = body_string(response).await;
        (status, serde_json::from_str(&body).unwrap_or(json!({})))
    }

    async fn post_form(app: Router, body: &'static str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri("/screen")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        (status, body_string(response).await)
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let app = test_app(ScriptedRankingClient::new(vec![]));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["model"], "gemini-test");
    }

    #[tokio::test]
    async fn test_index_renders_idle_form() {
        let app = test_app(ScriptedRankingClient::new(vec![]));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("<form id=\"screening-form\""));
        assert!(html.contains("type=\"submit\" disabled>"));
    }

    #[tokio::test]
    async fn test_api_returns_rankings_in_order() {
        let client = ScriptedRankingClient::new(vec![Scripted::Rankings(vec![
            ranking("Alice", 1, 93),
            ranking("Bob", 2, 71),
        ])]);
        let app = test_app(client.clone());

        let (status, body) = post_json(
            app,
            "/api/v1/screenings",
            json!({"job_description": "Rust engineer", "resumes": "Alice\n---\nBob"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["resume_count"], 2);
        assert_eq!(body["rankings"][0]["candidate_name"], "Alice");
        assert_eq!(body["rankings"][1]["candidate_name"], "Bob");
        assert!(body["screening_id"].is_string());
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_api_blank_job_description_is_bad_request_without_call() {
        let client = ScriptedRankingClient::new(vec![]);
        let app = test_app(client.clone());

        let (status, body) = post_json(
            app,
            "/api/v1/screenings",
            json!({"job_description": "", "resumes": "Jane Doe..."}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job description"));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_api_mistyped_body_keeps_error_envelope() {
        let client = ScriptedRankingClient::new(vec![]);
        let (status, body) = post_json(
            test_app(client.clone()),
            "/api/v1/screenings",
            json!({"job_description": 5}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].is_string());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_api_unparseable_body_keeps_error_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/screenings")
            .header("content-type", "application/json")
            .body(Body::from("{\"job_description\": "))
            .unwrap();
        let response = test_app(ScriptedRankingClient::new(vec![]))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_api_service_failure_passes_message_through() {
        let client = ScriptedRankingClient::new(vec![Scripted::Fail(RankingError::Service(
            "timeout".to_string(),
        ))]);
        let (status, body) = post_json(
            test_app(client),
            "/api/v1/screenings",
            json!({"job_description": "JD", "resumes": "Alice"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["message"], "An error occurred: timeout");
    }

    #[tokio::test]
    async fn test_form_success_renders_rankings() {
        let client = ScriptedRankingClient::new(vec![Scripted::Rankings(vec![ranking(
            "Alice", 1, 88,
        )])]);
        let (status, html) = post_form(
            test_app(client.clone()),
            "job_description=Rust+engineer&resumes=Alice%0ARust",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<strong>Alice</strong>"));
        assert!(html.contains(">Rust engineer</textarea>"));
        assert_eq!(
            client.calls(),
            vec![("Rust engineer".to_string(), "Alice\nRust".to_string())]
        );
    }

    #[tokio::test]
    async fn test_form_failure_renders_banner() {
        let client = ScriptedRankingClient::new(vec![Scripted::Fail(RankingError::Parse(
            "trailing characters".to_string(),
        ))]);
        let (status, html) =
            post_form(test_app(client), "job_description=JD&resumes=Alice").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("could not be read"));
        assert!(!html.contains("trailing characters"));
    }

    #[tokio::test]
    async fn test_form_missing_field_renders_validation_banner() {
        let client = ScriptedRankingClient::new(vec![]);
        let (status, html) = post_form(test_app(client.clone()), "resumes=Alice").await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Please provide both a job description and at least one resume."));
        assert!(client.calls().is_empty());
    }
}
