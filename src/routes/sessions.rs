//! Session REST routes — snapshot save/load, decoupled from the relay.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::session::{self, SaveOutcome, SessionError};
use crate::state::AppState;

// =============================================================================
// BODIES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSessionBody {
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub image_data: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSessionResponse {
    pub message: &'static str,
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSessionResponse {
    pub room_id: String,
    pub image_data: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/sessions/save` — upsert a room's snapshot.
pub async fn save_session(
    State(state): State<AppState>,
    Json(body): Json<SaveSessionBody>,
) -> Result<Json<SaveSessionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let outcome = session::save(
        &state.pool,
        body.room_id.as_deref(),
        body.user_name.as_deref(),
        body.image_data.as_deref(),
    )
    .await
    .map_err(session_error_response)?;

    let response = match outcome {
        SaveOutcome::Created { session_id } => SaveSessionResponse {
            message: "Session saved",
            action: "created",
            session_id: Some(session_id),
        },
        SaveOutcome::Updated => {
            SaveSessionResponse { message: "Session saved", action: "updated", session_id: None }
        }
    };
    Ok(Json(response))
}

/// `GET /api/sessions/:room_id` — fetch the stored snapshot verbatim.
pub async fn load_session(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Result<Json<LoadSessionResponse>, (StatusCode, Json<serde_json::Value>)> {
    let snapshot = session::load(&state.pool, &room_id)
        .await
        .map_err(session_error_response)?;

    Ok(Json(LoadSessionResponse { room_id: snapshot.room_id, image_data: snapshot.image_data }))
}

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map a service error to a status + generic JSON body. Storage failures
/// are logged here with their cause; the caller only sees a generic message.
fn session_error_response(err: SessionError) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        SessionError::Validation(field) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("{field} is required") })),
        ),
        SessionError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no saved session for this room" })),
        ),
        SessionError::Storage(e) => {
            tracing::error!(error = %e, "session storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "internal server error" })),
            )
        }
    }
}

#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;
