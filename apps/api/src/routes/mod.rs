pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::billing::handlers as billing;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(health::root_handler))
        // Auth API
        .route("/api/auth/signup", post(auth::handle_signup))
        .route("/api/auth/login", post(auth::handle_login))
        // Resume API
        .route("/api/resume/upload", post(resume::handle_upload))
        .route("/api/resume/my-resumes", get(resume::handle_my_resumes))
        .route("/api/resume/roadmap", get(resume::handle_roadmap))
        .route("/api/resume/jobs", get(resume::handle_jobs))
        .route("/api/resume/tutor", post(resume::handle_tutor))
        // Payment API
        .route(
            "/api/payment/create-checkout-session",
            post(billing::handle_create_checkout_session),
        )
        .route("/api/payment/verify-payment", post(billing::handle_verify_payment))
        .route("/api/payment/subscription", get(billing::handle_get_subscription))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::auth::token::issue_token;
    use crate::billing::stripe::{CheckoutRequest, CheckoutSession, PaymentError, PaymentGateway};
    use crate::config::Config;

    struct UnreachableGateway;

    #[async_trait]
    impl PaymentGateway for UnreachableGateway {
        async fn create_checkout_session(
            &self,
            _request: CheckoutRequest<'_>,
        ) -> Result<CheckoutSession, PaymentError> {
            panic!("gateway must not be called in router tests")
        }

        async fn retrieve_checkout_session(
            &self,
            _session_id: &str,
        ) -> Result<CheckoutSession, PaymentError> {
            panic!("gateway must not be called in router tests")
        }
    }

    /// Returns the same session for every lookup.
    struct FixedSessionGateway(CheckoutSession);

    #[async_trait]
    impl PaymentGateway for FixedSessionGateway {
        async fn create_checkout_session(
            &self,
            _request: CheckoutRequest<'_>,
        ) -> Result<CheckoutSession, PaymentError> {
            Ok(self.0.clone())
        }

        async fn retrieve_checkout_session(
            &self,
            _session_id: &str,
        ) -> Result<CheckoutSession, PaymentError> {
            Ok(self.0.clone())
        }
    }

    /// The pool never connects; any handler that reaches the database fails
    /// with a 500 instead of the status these tests expect.
    fn state_with(payments: Arc<dyn PaymentGateway>) -> AppState {
        let config = Config::for_tests();
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        AppState {
            db,
            config,
            payments,
        }
    }

    fn test_state() -> AppState {
        state_with(Arc::new(UnreachableGateway))
    }

    fn session_for(user_id: Uuid, plan: &str, payment_status: &str) -> CheckoutSession {
        CheckoutSession {
            id: "cs_test_1".to_string(),
            payment_status: payment_status.to_string(),
            client_reference_id: Some(user_id.to_string()),
            metadata: [
                ("userId".to_string(), user_id.to_string()),
                ("plan".to_string(), plan.to_string()),
            ]
            .into_iter()
            .collect(),
            ..CheckoutSession::default()
        }
    }

    const BOUNDARY: &str = "orbit-test-boundary";

    fn multipart_body(name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Body {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        Body::from(body)
    }

    async fn post_upload(body: Body) -> (StatusCode, Value) {
        let state = test_state();
        let token = issue_token(Uuid::new_v4(), &state.config.jwt_secret).unwrap();
        let response = build_router(state)
            .oneshot(
                Request::post("/api/resume/upload")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(
                        header::CONTENT_TYPE,
                        format!("multipart/form-data; boundary={BOUNDARY}"),
                    )
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn post_verify(user_id: Uuid, session: CheckoutSession, plan: &str) -> (StatusCode, Value) {
        let state = state_with(Arc::new(FixedSessionGateway(session)));
        let token = issue_token(user_id, &state.config.jwt_secret).unwrap();
        let response = build_router(state)
            .oneshot(
                Request::post("/api/payment/verify-payment")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(format!(
                        r#"{{"sessionId":"cs_test_1","plan":"{plan}"}}"#
                    )))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "orbit-api");
    }

    #[tokio::test]
    async fn test_protected_route_without_token_is_unauthorized() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/api/resume/roadmap").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get("/api/resume/jobs")
                    .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tutor_rejects_blank_message_before_lookup() {
        let state = test_state();
        let token = issue_token(Uuid::new_v4(), &state.config.jwt_secret).unwrap();
        let app = build_router(state);

        for payload in [r#"{"message":"   "}"#, r#"{"message":42}"#, "{}"] {
            let response = app
                .clone()
                .oneshot(
                    Request::post("/api/resume/tutor")
                        .header(header::AUTHORIZATION, format!("Bearer {token}"))
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(payload))
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "payload {payload}");
            let body = body_json(response).await;
            assert_eq!(body["error"]["message"], "Message is required");
        }
    }

    #[tokio::test]
    async fn test_checkout_with_unknown_plan_is_rejected() {
        let state = test_state();
        let token = issue_token(Uuid::new_v4(), &state.config.jwt_secret).unwrap();
        let app = build_router(state);

        let response = app
            .oneshot(
                Request::post("/api/payment/create-checkout-session")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"plan":"gold"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_resume_field_is_rejected() {
        let (status, body) =
            post_upload(multipart_body("avatar", "cv.pdf", "application/pdf", b"%PDF-1.4")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "No file uploaded. Please select a PDF resume."
        );
    }

    #[tokio::test]
    async fn test_upload_of_non_pdf_is_rejected() {
        let (status, body) =
            post_upload(multipart_body("resume", "cv.png", "image/png", b"\x89PNG")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Only PDF resumes are supported");
    }

    #[tokio::test]
    async fn test_upload_of_empty_pdf_is_rejected() {
        let (status, body) =
            post_upload(multipart_body("resume", "cv.pdf", "application/pdf", b"")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Uploaded file is empty");
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_envelope() {
        let state = test_state();
        let token = issue_token(Uuid::new_v4(), &state.config.jwt_secret).unwrap();
        let response = build_router(state)
            .oneshot(
                Request::post("/api/resume/tutor")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("JSON"));
    }

    #[tokio::test]
    async fn test_verify_rejects_plan_other_than_purchased() {
        let user_id = Uuid::new_v4();
        let (status, body) = post_verify(user_id, session_for(user_id, "basic", "paid"), "pro").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Checkout session does not match this user and plan"
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_another_users_session() {
        let owner = Uuid::new_v4();
        let (status, body) =
            post_verify(Uuid::new_v4(), session_for(owner, "basic", "paid"), "basic").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Checkout session does not match this user and plan"
        );
    }

    #[tokio::test]
    async fn test_verify_rejects_unpaid_session() {
        let user_id = Uuid::new_v4();
        let (status, body) =
            post_verify(user_id, session_for(user_id, "premium", "unpaid"), "premium").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Payment not completed");
    }
}
