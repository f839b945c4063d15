//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::models::{CoverLetter, GeneratedResume, MatchResult};
use crate::generation::pipeline::{
    generate_cover_letter, generate_experience_bullets, generate_match, generate_resume,
    generate_skills, generate_summary, Outcome,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryRequest {
    pub job_title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SkillsRequest {
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptionRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse<T> {
    pub result: T,
    /// False when a newer request for the same operation superseded this one.
    pub applied: bool,
}

impl<T> From<Outcome<T>> for GenerateResponse<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            result: outcome.value,
            applied: outcome.applied,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterView {
    pub text: String,
    /// `text`, or a fixed notice when the model wrote nothing.
    pub display_text: String,
}

impl From<&CoverLetter> for CoverLetterView {
    fn from(letter: &CoverLetter) -> Self {
        Self {
            text: letter.text.clone(),
            display_text: letter.display_text().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedView {
    pub generated_resume: Option<GeneratedResume>,
    pub match_result: Option<MatchResult>,
    pub cover_letter: Option<CoverLetterView>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:sid/generated
pub async fn handle_get_generated(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<GeneratedView>, AppError> {
    let view = state
        .sessions
        .with_session(sid, |session| GeneratedView {
            generated_resume: session.generated_resume.clone(),
            match_result: session.match_result.clone(),
            cover_letter: session.cover_letter.as_ref().map(CoverLetterView::from),
        })
        .await?;
    Ok(Json(view))
}

/// POST /api/v1/sessions/:sid/generate/summary
///
/// The body is optional; without a job title the first experience role is used.
pub async fn handle_generate_summary(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    body: Option<Json<SummaryRequest>>,
) -> Result<Json<GenerateResponse<String>>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let outcome =
        generate_summary(&state.sessions, &state.gateway, sid, request.job_title).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/sessions/:sid/generate/experience/:id/bullets
pub async fn handle_generate_bullets(
    State(state): State<AppState>,
    Path((sid, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<GenerateResponse<Vec<String>>>, AppError> {
    let outcome =
        generate_experience_bullets(&state.sessions, &state.gateway, sid, entry_id).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/sessions/:sid/generate/skills
pub async fn handle_generate_skills(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    body: Option<Json<SkillsRequest>>,
) -> Result<Json<GenerateResponse<Vec<String>>>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let outcome = generate_skills(&state.sessions, &state.gateway, sid, request.role).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/sessions/:sid/generate/resume
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<GenerateResponse<GeneratedResume>>, AppError> {
    let outcome = generate_resume(&state.sessions, &state.gateway, sid).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/sessions/:sid/generate/match
///
/// Requires a generated resume; its plain-text rendering is what gets compared.
pub async fn handle_generate_match(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<GenerateResponse<MatchResult>>, AppError> {
    let outcome =
        generate_match(&state.sessions, &state.gateway, sid, request.job_description).await?;
    Ok(Json(outcome.into()))
}

/// POST /api/v1/sessions/:sid/generate/cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<GenerateResponse<CoverLetterView>>, AppError> {
    let outcome =
        generate_cover_letter(&state.sessions, &state.gateway, sid, request.job_description)
            .await?;
    Ok(Json(GenerateResponse {
        result: CoverLetterView::from(&outcome.value),
        applied: outcome.applied,
    }))
}
