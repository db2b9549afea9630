use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub stripe_session_id: Option<String>,
    pub amount_cents: i32,
    pub currency: String,
    pub status: String,
    pub plan: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
