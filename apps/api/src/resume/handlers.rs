//! Axum route handlers for the Resume API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::analysis::gaps::{plan_skill_gaps, recommendations, JobRecommendations, SkillLearningItem};
use crate::analysis::jobs::{match_jobs, MatchedJob};
use crate::analysis::roadmap::{count_with_status, generate_roadmap, RoadmapStep, StepStatus};
use crate::analysis::tutor::{answer, question_from};
use crate::analysis::analyze_resume;
use crate::auth::extractor::AuthUser;
use crate::auth::store::find_by_id;
use crate::billing::gate::{evaluate_upload, DenyReason, UploadDecision};
use crate::billing::store::find_subscription;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::resume::{ResumeRow, ResumeView};
use crate::resume::pdf::{extract_text, is_pdf};
use crate::resume::store::{find_latest_resume, list_resumes, record_upload};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: &'static str,
    pub ats_score: u32,
    pub skills: Vec<String>,
    pub experience: String,
    pub suggestions: Vec<String>,
    pub roadmap_progress: u32,
    pub jobs_matched: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyResumesResponse {
    pub latest_resume: Option<ResumeView>,
    pub resumes: Vec<ResumeView>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResponse {
    pub roadmap: Vec<RoadmapStep>,
    pub current_skills: Vec<String>,
    pub ats_score: u32,
    pub total_steps: usize,
    pub completed_steps: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobsResponse {
    pub message: &'static str,
    pub jobs: Vec<MatchedJob>,
    pub total_jobs: usize,
    pub missing_skills: Vec<String>,
    pub skill_roadmap: Option<Vec<SkillLearningItem>>,
    pub current_skills: Vec<String>,
    pub ats_score: u32,
    pub recommendations: JobRecommendations,
}

/// `message` stays untyped so a non-string value is a validation error
/// rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct TutorRequest {
    #[serde(default)]
    pub message: Value,
}

#[derive(Debug, Serialize)]
pub struct TutorResponse {
    pub answer: String,
}

struct UploadedFile {
    content_type: Option<String>,
    file_name: Option<String>,
    data: Bytes,
}

/// Pulls the `resume` field out of the multipart body, skipping anything else.
async fn read_resume_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("File upload failed: {e}")))?;

        return Ok(Some(UploadedFile {
            content_type,
            file_name,
            data,
        }));
    }

    Ok(None)
}

async fn latest_or_not_found(state: &AppState, auth: AuthUser) -> Result<ResumeRow, AppError> {
    find_latest_resume(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("No resume found. Please upload a resume first.".to_string())
        })
}

/// POST /api/resume/upload
///
/// Checks the subscription gate, extracts text from the PDF, runs the analysis
/// pipeline, then stores the result and charges one upload together.
pub async fn handle_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_resume_field(&mut multipart).await?.ok_or_else(|| {
        AppError::Validation("No file uploaded. Please select a PDF resume.".to_string())
    })?;

    if !is_pdf(file.content_type.as_deref(), file.file_name.as_deref()) {
        return Err(AppError::Validation("Only PDF resumes are supported".to_string()));
    }
    if file.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }

    let user = find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    let subscription = find_subscription(&state.db, user.id).await?;

    let metered = match evaluate_upload(&user, subscription.as_ref(), Utc::now()) {
        UploadDecision::Allowed { plan, uploads_remaining } => {
            debug!("Upload allowed for user {} on {plan} ({uploads_remaining:?} left)", user.id);
            uploads_remaining.is_some()
        }
        UploadDecision::Denied { reason, current_plan } => {
            warn!("Upload denied for user {} on {current_plan}: {reason}", user.id);
            return Err(AppError::PaymentRequired(reason.to_string()));
        }
    };

    info!(
        "Processing resume for user {} ({} bytes, {:?})",
        user.id,
        file.data.len(),
        file.file_name
    );

    let text = extract_text(file.data).await?;
    let analysis = analyze_resume(&text);
    let saved = record_upload(&state.db, user.id, &analysis, metered)
        .await?
        .ok_or_else(|| AppError::PaymentRequired(DenyReason::NoUploadsRemaining.to_string()))?;

    info!(
        "Saved resume {} for user {}: score {}, {} skills",
        saved.id,
        user.id,
        analysis.ats_score,
        analysis.skills.len()
    );

    Ok(Json(UploadResponse {
        message: "Resume processed successfully",
        ats_score: analysis.ats_score,
        skills: analysis.skills,
        experience: analysis.experience.label,
        suggestions: analysis.suggestions,
        roadmap_progress: analysis.roadmap_progress,
        jobs_matched: analysis.jobs_matched,
    }))
}

/// GET /api/resume/my-resumes
pub async fn handle_my_resumes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MyResumesResponse>, AppError> {
    let resumes: Vec<ResumeView> = list_resumes(&state.db, auth.user_id)
        .await?
        .into_iter()
        .map(ResumeView::from)
        .collect();

    Ok(Json(MyResumesResponse {
        latest_resume: resumes.first().cloned(),
        resumes,
    }))
}

/// GET /api/resume/roadmap
pub async fn handle_roadmap(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RoadmapResponse>, AppError> {
    let resume = latest_or_not_found(&state, auth).await?;
    let ats_score = resume.ats_score();
    let roadmap = generate_roadmap(&resume.extracted_skills, ats_score);

    Ok(Json(RoadmapResponse {
        total_steps: roadmap.len(),
        completed_steps: count_with_status(&roadmap, StepStatus::Completed),
        roadmap,
        current_skills: resume.extracted_skills,
        ats_score,
    }))
}

/// GET /api/resume/jobs
pub async fn handle_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<JobsResponse>, AppError> {
    let resume = latest_or_not_found(&state, auth).await?;
    let ats_score = resume.ats_score();
    let report = match_jobs(&resume.extracted_skills, ats_score);
    let skill_roadmap = plan_skill_gaps(&report.missing_skills);
    let recommendations = recommendations(&report.missing_skills, skill_roadmap.is_some());

    Ok(Json(JobsResponse {
        message: "Job matches generated successfully",
        total_jobs: report.matched_jobs.len(),
        jobs: report.matched_jobs,
        missing_skills: report.missing_skills,
        skill_roadmap,
        current_skills: resume.extracted_skills,
        ats_score,
        recommendations,
    }))
}

/// POST /api/resume/tutor
pub async fn handle_tutor(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<TutorRequest>,
) -> Result<Json<TutorResponse>, AppError> {
    let question = question_from(&req.message)
        .ok_or_else(|| AppError::Validation("Message is required".to_string()))?;

    let resume = latest_or_not_found(&state, auth).await?;
    let answer = answer(question, &resume.extracted_skills, resume.ats_score());

    Ok(Json(TutorResponse { answer }))
}
