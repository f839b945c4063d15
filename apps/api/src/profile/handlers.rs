//! Axum route handlers for the profile wizard. Every edit is synchronous and
//! happens under the session lock; none of them touch the model.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::completeness::{compute_completeness_report, CompletenessReport};
use crate::profile::models::{Entry, IdentityUpdate, Profile};
use crate::profile::sample::sample_profile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummaryUpdate {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillsUpdate {
    pub skills: String,
}

/// GET /api/v1/sessions/:sid/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .sessions
        .with_session(sid, |session| session.profile.clone())
        .await?;
    Ok(Json(profile))
}

/// PUT /api/v1/sessions/:sid/profile
///
/// Wholesale replace. Nil or repeated entry ids are given fresh ones.
pub async fn handle_replace_profile(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(mut profile): Json<Profile>,
) -> Result<Json<Profile>, AppError> {
    profile.rekey_entries();
    let profile = state
        .sessions
        .with_session(sid, move |session| {
            session.profile = profile;
            session.profile.clone()
        })
        .await?;
    Ok(Json(profile))
}

/// PATCH /api/v1/sessions/:sid/profile/identity
pub async fn handle_update_identity(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(update): Json<IdentityUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .sessions
        .with_session(sid, move |session| {
            session.profile.apply_identity(update);
            session.profile.clone()
        })
        .await?;
    Ok(Json(profile))
}

/// PUT /api/v1/sessions/:sid/profile/summary
pub async fn handle_set_summary(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<SummaryUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .sessions
        .with_session(sid, move |session| {
            session.profile.summary = req.summary;
            session.profile.clone()
        })
        .await?;
    Ok(Json(profile))
}

/// PUT /api/v1/sessions/:sid/profile/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(req): Json<SkillsUpdate>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .sessions
        .with_session(sid, move |session| {
            session.profile.skills = req.skills;
            session.profile.clone()
        })
        .await?;
    Ok(Json(profile))
}

/// POST /api/v1/sessions/:sid/profile/sample
pub async fn handle_load_sample(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let profile = state
        .sessions
        .with_session(sid, |session| {
            session.profile = sample_profile();
            session.profile.clone()
        })
        .await?;
    Ok(Json(profile))
}

/// POST /api/v1/sessions/:sid/profile/{section}
///
/// Appends under a fresh id; any id in the body is ignored.
pub async fn handle_add_entry<E: Entry>(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
    Json(entry): Json<E>,
) -> Result<(StatusCode, Json<E>), AppError> {
    let entry = state
        .sessions
        .with_session(sid, move |session| {
            E::list_mut(&mut session.profile).push_new(entry).clone()
        })
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/v1/sessions/:sid/profile/{section}/:id
pub async fn handle_update_entry<E: Entry>(
    State(state): State<AppState>,
    Path((sid, id)): Path<(Uuid, Uuid)>,
    Json(entry): Json<E>,
) -> Result<Json<E>, AppError> {
    let entry = state
        .sessions
        .try_with_session(sid, move |session| {
            E::list_mut(&mut session.profile)
                .replace(id, entry)
                .cloned()
                .ok_or_else(|| entry_not_found::<E>(id))
        })
        .await?;
    Ok(Json(entry))
}

/// DELETE /api/v1/sessions/:sid/profile/{section}/:id
pub async fn handle_delete_entry<E: Entry>(
    State(state): State<AppState>,
    Path((sid, id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .try_with_session(sid, move |session| {
            E::list_mut(&mut session.profile)
                .remove(id)
                .ok_or_else(|| entry_not_found::<E>(id))?;
            session.board.forget_entry(id);
            Ok(())
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:sid/completeness
pub async fn handle_get_completeness(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<CompletenessReport>, AppError> {
    let report = state
        .sessions
        .with_session(sid, |session| compute_completeness_report(&session.profile))
        .await?;
    Ok(Json(report))
}

fn entry_not_found<E: Entry>(id: Uuid) -> AppError {
    AppError::NotFound(format!("{} entry {id} not found", E::SECTION))
}
