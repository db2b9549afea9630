use std::sync::Arc;

use sqlx::PgPool;

use crate::billing::stripe::PaymentGateway;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Stripe in production; tests swap in a fake.
    pub payments: Arc<dyn PaymentGateway>,
}
