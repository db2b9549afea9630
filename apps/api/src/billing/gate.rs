//! Subscription Gate: decides whether a user may upload another resume.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::subscription::{SubscriptionRow, STATUS_ACTIVE};
use crate::models::user::UserRow;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenyReason {
    #[error("Please subscribe to upload resumes")]
    NoSubscription,
    #[error("Subscription expired. Please renew.")]
    Expired,
    #[error("No uploads remaining. Please upgrade or renew your plan.")]
    NoUploadsRemaining,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadDecision {
    Allowed {
        plan: String,
        /// `None` on unlimited plans.
        uploads_remaining: Option<i32>,
    },
    Denied {
        reason: DenyReason,
        current_plan: String,
    },
}

pub fn evaluate_upload(
    user: &UserRow,
    subscription: Option<&SubscriptionRow>,
    now: DateTime<Utc>,
) -> UploadDecision {
    let subscription = match subscription {
        Some(s) if user.is_premium => s,
        _ => {
            return UploadDecision::Denied {
                reason: DenyReason::NoSubscription,
                current_plan: "free".to_string(),
            }
        }
    };

    let period_over = subscription
        .current_period_end
        .map_or(true, |end| now > end);
    if subscription.status != STATUS_ACTIVE || period_over {
        return UploadDecision::Denied {
            reason: DenyReason::Expired,
            current_plan: subscription.plan.clone(),
        };
    }

    if subscription.is_unlimited() {
        return UploadDecision::Allowed {
            plan: subscription.plan.clone(),
            uploads_remaining: None,
        };
    }

    if user.resume_uploads_remaining > 0 {
        return UploadDecision::Allowed {
            plan: subscription.plan.clone(),
            uploads_remaining: Some(user.resume_uploads_remaining),
        };
    }

    UploadDecision::Denied {
        reason: DenyReason::NoUploadsRemaining,
        current_plan: subscription.plan.clone(),
    }
}
