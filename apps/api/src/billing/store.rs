use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::billing::plans::Plan;
use crate::models::payment::PaymentRow;
use crate::models::subscription::{SubscriptionRow, STATUS_ACTIVE};
use crate::models::user::UserRow;

/// Length of a paid period.
pub const PERIOD_DAYS: i64 = 30;

pub async fn find_subscription(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<SubscriptionRow>, sqlx::Error> {
    sqlx::query_as::<_, SubscriptionRow>("SELECT * FROM subscriptions WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Outcome of [`activate_plan`].
#[derive(Debug)]
pub enum Activation {
    Activated {
        payment: PaymentRow,
        subscription: SubscriptionRow,
    },
    /// The session was redeemed before; nothing was written.
    AlreadyRecorded { subscription: Option<SubscriptionRow> },
}

/// Records a completed payment and activates (or renews) the user's
/// subscription in one transaction. A session id is only ever redeemed once.
pub async fn activate_plan(
    pool: &PgPool,
    user: &UserRow,
    plan: Plan,
    session_id: &str,
    stripe_customer_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<Activation, sqlx::Error> {
    let details = plan.details();
    let features: Vec<String> = details.features.iter().map(|f| f.to_string()).collect();
    let period_end = now + Duration::days(PERIOD_DAYS);

    let mut tx = pool.begin().await?;

    let payment = sqlx::query_as::<_, PaymentRow>(
        r#"
        INSERT INTO payments
            (id, user_id, email, stripe_session_id, amount_cents, currency, status, plan, description)
        VALUES ($1, $2, $3, $4, $5, 'usd', 'completed', $6, $7)
        ON CONFLICT (stripe_session_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&user.email)
    .bind(session_id)
    .bind(details.price_cents)
    .bind(plan.as_str())
    .bind(format!("{} Plan - {} uploads", details.name, details.resume_uploads))
    .fetch_optional(&mut *tx)
    .await?;

    let Some(payment) = payment else {
        tx.rollback().await?;
        info!("Session {session_id} already recorded for user {}", user.id);
        return Ok(Activation::AlreadyRecorded {
            subscription: find_subscription(pool, user.id).await?,
        });
    };

    let subscription = sqlx::query_as::<_, SubscriptionRow>(
        r#"
        INSERT INTO subscriptions
            (id, user_id, email, plan, plan_name, plan_price_cents, plan_resume_uploads,
             plan_features, status, stripe_customer_id, current_period_start, current_period_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ON CONFLICT (user_id) DO UPDATE SET
            plan = EXCLUDED.plan,
            plan_name = EXCLUDED.plan_name,
            plan_price_cents = EXCLUDED.plan_price_cents,
            plan_resume_uploads = EXCLUDED.plan_resume_uploads,
            plan_features = EXCLUDED.plan_features,
            status = EXCLUDED.status,
            stripe_customer_id = COALESCE(subscriptions.stripe_customer_id, EXCLUDED.stripe_customer_id),
            current_period_start = EXCLUDED.current_period_start,
            current_period_end = EXCLUDED.current_period_end,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.id)
    .bind(&user.email)
    .bind(plan.as_str())
    .bind(details.name)
    .bind(details.price_cents)
    .bind(details.resume_uploads)
    .bind(&features)
    .bind(STATUS_ACTIVE)
    .bind(stripe_customer_id)
    .bind(now)
    .bind(period_end)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE users SET is_premium = TRUE, resume_uploads_remaining = $1 WHERE id = $2",
    )
    .bind(details.resume_uploads)
    .bind(user.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    info!(
        "Activated {} plan for user {} until {}",
        plan, user.id, period_end
    );

    Ok(Activation::Activated {
        payment,
        subscription,
    })
}
