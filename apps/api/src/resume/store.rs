use sqlx::PgPool;
use uuid::Uuid;

use crate::analysis::ResumeAnalysis;
use crate::models::resume::ResumeRow;

/// Stores one analysed upload. On metered plans the user's upload counter is
/// charged in the same transaction; `None` means no upload was left to charge
/// and nothing was stored.
pub async fn record_upload(
    pool: &PgPool,
    user_id: Uuid,
    analysis: &ResumeAnalysis,
    metered: bool,
) -> Result<Option<ResumeRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes
            (id, user_id, extracted_skills, readiness_score, roadmap_progress, jobs_matched)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&analysis.skills)
    .bind(analysis.ats_score as i32)
    .bind(analysis.roadmap_progress as i32)
    .bind(analysis.jobs_matched as i32)
    .fetch_one(&mut *tx)
    .await?;

    if metered {
        let charged = sqlx::query(
            r#"
            UPDATE users SET resume_uploads_remaining = resume_uploads_remaining - 1
            WHERE id = $1 AND resume_uploads_remaining > 0
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        if charged == 0 {
            tx.rollback().await?;
            return Ok(None);
        }
    }

    tx.commit().await?;
    Ok(Some(resume))
}

/// The most recently created resume; every derived view reads this one.
pub async fn find_latest_resume(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// All resumes for a user, newest first.
pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        "SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
