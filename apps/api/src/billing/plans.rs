use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Upload allowance marker for unlimited plans.
pub const UNLIMITED_UPLOADS: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
    Pro,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetails {
    pub name: &'static str,
    pub price_cents: i32,
    /// [`UNLIMITED_UPLOADS`] for no limit.
    pub resume_uploads: i32,
    pub features: &'static [&'static str],
    pub period: &'static str,
}

impl Plan {
    pub const ALL: [Plan; 3] = [Plan::Basic, Plan::Premium, Plan::Pro];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
            Plan::Pro => "pro",
        }
    }

    pub fn details(&self) -> PlanDetails {
        match self {
            Plan::Basic => PlanDetails {
                name: "Basic",
                price_cents: 199,
                resume_uploads: 5,
                features: &["5 Resume Uploads", "Basic ATS Analysis", "Email Support"],
                period: "monthly",
            },
            Plan::Premium => PlanDetails {
                name: "Premium",
                price_cents: 599,
                resume_uploads: 50,
                features: &[
                    "50 Resume Uploads",
                    "Advanced ATS Analysis",
                    "AI Tutor Access",
                    "Priority Support",
                ],
                period: "monthly",
            },
            Plan::Pro => PlanDetails {
                name: "Pro",
                price_cents: 1299,
                resume_uploads: UNLIMITED_UPLOADS,
                features: &[
                    "Unlimited Uploads",
                    "Expert Analysis",
                    "Full AI Suite",
                    "24/7 Priority Support",
                    "API Access",
                ],
                period: "monthly",
            },
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Plan::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Invalid plan '{s}'"))
    }
}

/// The catalog keyed by plan id, as the pricing page expects it.
pub fn catalog() -> serde_json::Map<String, serde_json::Value> {
    Plan::ALL
        .into_iter()
        .map(|p| {
            let details = serde_json::to_value(p.details()).unwrap_or_default();
            (p.as_str().to_string(), details)
        })
        .collect()
}
