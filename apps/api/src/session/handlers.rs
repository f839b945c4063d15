use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::status::StatusEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    info!("Session {session_id} created");
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// DELETE /api/v1/sessions/:sid
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(sid).await?;
    info!("Session {sid} removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:sid/status
///
/// Keys that were never used are left out; the client treats them as idle.
pub async fn handle_get_status(
    State(state): State<AppState>,
    Path(sid): Path<Uuid>,
) -> Result<Json<Vec<StatusEntry>>, AppError> {
    let entries = state
        .sessions
        .with_session(sid, |session| session.board.entries())
        .await?;
    Ok(Json(entries))
}
