//! Axum route handlers for the Payment API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::extractor::AuthUser;
use crate::auth::store::find_by_id;
use crate::billing::plans::{catalog, Plan};
use crate::billing::store::{activate_plan, find_subscription, Activation};
use crate::billing::stripe::CheckoutRequest;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::user::UserRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionRequest {
    pub plan: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub session_id: String,
    pub session_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub session_id: String,
    pub plan: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivatedSubscription {
    pub plan: String,
    pub status: String,
    pub resume_uploads: i32,
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub message: &'static str,
    pub subscription: ActivatedSubscription,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    pub is_premium: bool,
    pub resume_uploads_remaining: i32,
    pub subscription: Value,
    pub plans: serde_json::Map<String, Value>,
}

fn parse_plan(raw: &str) -> Result<Plan, AppError> {
    raw.parse::<Plan>().map_err(AppError::Validation)
}

async fn load_user(state: &AppState, auth: AuthUser) -> Result<UserRow, AppError> {
    find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// POST /api/payment/create-checkout-session
pub async fn handle_create_checkout_session(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<CheckoutSessionRequest>,
) -> Result<Json<CheckoutSessionResponse>, AppError> {
    let plan = parse_plan(&req.plan)?;
    let user = load_user(&state, auth).await?;

    let session = state
        .payments
        .create_checkout_session(CheckoutRequest {
            user_id: user.id,
            email: &user.email,
            plan,
            frontend_url: &state.config.frontend_url,
        })
        .await?;

    info!("Created checkout session {} ({plan}) for user {}", session.id, user.id);

    Ok(Json(CheckoutSessionResponse {
        session_id: session.id,
        session_url: session.url,
    }))
}

/// POST /api/payment/verify-payment
///
/// Confirms the Checkout Session belongs to the caller, was created for the
/// requested plan and was paid, then records the payment and activates the
/// plan for 30 days. Verifying an already-recorded session is a no-op.
pub async fn handle_verify_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, AppError> {
    let plan = parse_plan(&req.plan)?;
    let session_id = req.session_id.trim();
    if session_id.is_empty() {
        return Err(AppError::Validation("sessionId is required".to_string()));
    }

    let session = state.payments.retrieve_checkout_session(session_id).await?;

    if !session.belongs_to(auth.user_id, plan) {
        warn!(
            "Session {} does not match user {} and plan {plan}",
            session.id, auth.user_id
        );
        return Err(AppError::Validation(
            "Checkout session does not match this user and plan".to_string(),
        ));
    }

    if !session.is_paid() {
        warn!(
            "Session {} for user {} not paid (status {})",
            session.id, auth.user_id, session.payment_status
        );
        return Err(AppError::Validation("Payment not completed".to_string()));
    }

    let user = load_user(&state, auth).await?;
    let activation = activate_plan(
        &state.db,
        &user,
        plan,
        &session.id,
        session.customer.as_deref(),
        Utc::now(),
    )
    .await?;

    if let Activation::Activated { payment, .. } = &activation {
        info!("Recorded payment {} for user {}", payment.id, user.id);
    }

    verify_response(activation).map(Json)
}

fn verify_response(activation: Activation) -> Result<VerifyPaymentResponse, AppError> {
    let (message, subscription) = match activation {
        Activation::Activated { subscription, .. } => {
            ("Payment successful! Subscription activated.", subscription)
        }
        Activation::AlreadyRecorded {
            subscription: Some(subscription),
        } => ("Payment already verified. Subscription active.", subscription),
        Activation::AlreadyRecorded { subscription: None } => {
            return Err(AppError::Conflict(
                "Payment already recorded for another account".to_string(),
            ))
        }
    };

    Ok(VerifyPaymentResponse {
        message,
        subscription: ActivatedSubscription {
            resume_uploads: subscription.plan_resume_uploads.unwrap_or_default(),
            plan: subscription.plan,
            status: subscription.status,
            expires_at: subscription.current_period_end,
        },
    })
}

/// GET /api/payment/subscription
pub async fn handle_get_subscription(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SubscriptionStatusResponse>, AppError> {
    let user = load_user(&state, auth).await?;
    let subscription = find_subscription(&state.db, user.id).await?;

    let subscription = match subscription {
        Some(s) => serde_json::to_value(s).map_err(|e| AppError::Internal(e.into()))?,
        None => json!({
            "plan": "free",
            "status": "inactive",
            "resumeUploads": 0,
            "features": []
        }),
    };

    Ok(Json(SubscriptionStatusResponse {
        is_premium: user.is_premium,
        resume_uploads_remaining: user.resume_uploads_remaining,
        subscription,
        plans: catalog(),
    }))
}
