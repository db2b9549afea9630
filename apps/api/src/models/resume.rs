use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// One processed upload. Rows are only ever inserted.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub extracted_skills: Vec<String>,
    pub readiness_score: i32,
    pub roadmap_progress: i32,
    pub jobs_matched: i32,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn ats_score(&self) -> u32 {
        self.readiness_score.max(0) as u32
    }
}

/// Resume as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeView {
    pub id: Uuid,
    pub ats_score: i32,
    pub skills: Vec<String>,
    pub roadmap_progress: i32,
    pub jobs_matched: i32,
    pub created_at: DateTime<Utc>,
}

impl From<ResumeRow> for ResumeView {
    fn from(row: ResumeRow) -> Self {
        Self {
            id: row.id,
            ats_score: row.readiness_score,
            skills: row.extracted_skills,
            roadmap_progress: row.roadmap_progress,
            jobs_matched: row.jobs_matched,
            created_at: row.created_at,
        }
    }
}
