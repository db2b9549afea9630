use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

pub const STATUS_ACTIVE: &str = "active";

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub plan: String,
    pub plan_name: Option<String>,
    pub plan_price_cents: Option<i32>,
    /// -1 means unlimited.
    pub plan_resume_uploads: Option<i32>,
    pub plan_features: Vec<String>,
    pub status: String,
    pub stripe_customer_id: Option<String>,
    pub current_period_start: Option<DateTime<Utc>>,
    pub current_period_end: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SubscriptionRow {
    pub fn is_unlimited(&self) -> bool {
        self.plan_resume_uploads == Some(-1)
    }
}
