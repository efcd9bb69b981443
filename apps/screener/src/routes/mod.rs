pub mod analyze;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Largest accepted upload, form fields included.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", post(analyze::handle_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::ProcessingState;
    use crate::screening::poller::PollPolicy;
    use crate::screening::testing::FakeInference;
    use crate::screening::Screener;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    const BOUNDARY: &str = "screener-test-boundary";

    fn app(api: FakeInference) -> Router {
        let screener = Screener::new(
            Arc::new(api),
            PollPolicy {
                interval: Duration::from_millis(1),
                max_attempts: 2,
            },
        );
        build_router(AppState { screener })
    }

    fn multipart_body(fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, content) in fields {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match file_name {
                Some(f) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\nContent-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn analyze_request(fields: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const JD: &[u8] = b"Senior Backend Engineer, 5+ years Go experience";
    const PDF: &[u8] = b"%PDF-1.7 jane";

    #[tokio::test]
    async fn test_health() {
        let response = app(FakeInference::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_model_json() {
        let response = app(FakeInference::default())
            .oneshot(analyze_request(&[
                ("job_desc", None, JD),
                ("file", Some("jane.pdf"), PDF),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["candidate_name"], "Jane Doe");
        assert_eq!(body["total_score"], 72);
        assert_eq!(body["analysis"]["skills"]["score"], 80);
    }

    #[tokio::test]
    async fn test_analyze_accepts_job_description_spelling() {
        let response = app(FakeInference::default())
            .oneshot(analyze_request(&[
                ("job_description", None, JD),
                ("file", Some("jane.pdf"), PDF),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_file_is_validation_error() {
        let response = app(FakeInference::default())
            .oneshot(analyze_request(&[("job_desc", None, JD)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_job_description_is_validation_error() {
        let response = app(FakeInference::default())
            .oneshot(analyze_request(&[("file", Some("jane.pdf"), PDF)]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_failed_processing_is_upload_failed() {
        let api = FakeInference::default().with_upload_states(vec![ProcessingState::Failed]);
        let response = app(api)
            .oneshot(analyze_request(&[
                ("job_desc", None, JD),
                ("file", Some("jane.pdf"), PDF),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "UPLOAD_FAILED");
    }

    #[tokio::test]
    async fn test_schema_mismatch_has_its_own_code() {
        let api = FakeInference::default()
            .with_replies(vec![Ok(r#"{"candidate_name":"X","analysis":{}}"#.to_string())]);
        let response = app(api)
            .oneshot(analyze_request(&[
                ("job_desc", None, JD),
                ("file", Some("jane.pdf"), PDF),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(json_body(response).await["error"]["code"], "SCHEMA_MISMATCH");
    }
}
