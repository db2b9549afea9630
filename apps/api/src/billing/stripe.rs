//! Payment gateway: the only place that talks to Stripe.
//!
//! Handlers depend on the [`PaymentGateway`] trait carried in `AppState` as
//! `Arc<dyn PaymentGateway>`; [`StripeClient`] is the production backend.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::billing::plans::Plan;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stripe API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// The subset of a Stripe Checkout Session this service reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
    pub payment_status: String,
    pub customer: Option<String>,
    pub client_reference_id: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl CheckoutSession {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    /// True when the session was created by `user_id` for `plan`, as recorded
    /// in `client_reference_id` and the `userId`/`plan` metadata at creation.
    pub fn belongs_to(&self, user_id: Uuid, plan: Plan) -> bool {
        let user_id = user_id.to_string();
        self.client_reference_id.as_deref() == Some(user_id.as_str())
            && self.metadata.get("userId") == Some(&user_id)
            && self.metadata.get("plan").map(String::as_str) == Some(plan.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct CheckoutRequest<'a> {
    pub user_id: Uuid,
    pub email: &'a str,
    pub plan: Plan,
    pub frontend_url: &'a str,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest<'_>,
    ) -> Result<CheckoutSession, PaymentError>;

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, PaymentError>;
}

#[derive(Debug, Deserialize)]
struct StripeError {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: String,
}

/// Stripe REST client for Checkout Sessions.
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    api_base: String,
}

impl StripeClient {
    pub fn new(secret_key: String, api_base: String) -> Result<Self, PaymentError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            secret_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    async fn parse_session(response: reqwest::Response) -> Result<CheckoutSession, PaymentError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StripeError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let session: CheckoutSession = response.json().await?;
        debug!(
            "Stripe session {} payment_status={}",
            session.id, session.payment_status
        );
        Ok(session)
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_checkout_session(
        &self,
        request: CheckoutRequest<'_>,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .post(format!("{}/checkout/sessions", self.api_base))
            .bearer_auth(&self.secret_key)
            .form(&checkout_form(&request))
            .send()
            .await?;

        Self::parse_session(response).await
    }

    async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, PaymentError> {
        let response = self
            .client
            .get(format!("{}/checkout/sessions/{session_id}", self.api_base))
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        Self::parse_session(response).await
    }
}

/// Form-encoded body for `POST /v1/checkout/sessions`: one-off card payment
/// for the plan price, redirecting back to the frontend.
fn checkout_form(request: &CheckoutRequest<'_>) -> Vec<(&'static str, String)> {
    let details = request.plan.details();
    let plan = request.plan.as_str();
    let frontend = request.frontend_url.trim_end_matches('/');

    vec![
        ("payment_method_types[0]", "card".to_string()),
        ("mode", "payment".to_string()),
        ("customer_email", request.email.to_string()),
        ("client_reference_id", request.user_id.to_string()),
        ("line_items[0][quantity]", "1".to_string()),
        ("line_items[0][price_data][currency]", "usd".to_string()),
        ("line_items[0][price_data][unit_amount]", details.price_cents.to_string()),
        (
            "line_items[0][price_data][product_data][name]",
            format!("Orbit AI - {} Plan", details.name),
        ),
        (
            "line_items[0][price_data][product_data][description]",
            details.features.join(", "),
        ),
        (
            "success_url",
            format!("{frontend}/payment-success?session_id={{CHECKOUT_SESSION_ID}}&plan={plan}"),
        ),
        ("cancel_url", format!("{frontend}/payment-cancelled")),
        ("metadata[userId]", request.user_id.to_string()),
        ("metadata[plan]", plan.to_string()),
    ]
}
