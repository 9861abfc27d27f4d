//! Session service — durable canvas snapshots keyed by room id.
//!
//! DESIGN
//! ======
//! One row per room, upsert-by-room-id: the first save inserts the row and
//! records the creating user; every later save replaces image_data and
//! bumps updated_at only. User resolution and the session upsert run in a
//! single transaction so a failed save leaves neither half behind, and the
//! session row is locked before the insert/update branch so concurrent
//! saves to one room serialize at that step (last committed writer wins).
//!
//! ERROR HANDLING
//! ==============
//! Validation failures surface as 400s, missing rooms as 404s, and any
//! sqlx failure as a 500 with the cause logged at the route layer — the
//! caller only ever sees a generic message.

use sqlx::{PgPool, Postgres, Transaction};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("missing required field: {0}")]
    Validation(&'static str),
    #[error("no session saved for room: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result of a save: whether the room's row was inserted or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Created { session_id: i64 },
    Updated,
}

/// A stored snapshot, returned verbatim — no transformation, no re-encoding.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub room_id: String,
    pub image_data: String,
}

// =============================================================================
// SAVE
// =============================================================================

/// Persist a room's snapshot, creating the session row on first save.
///
/// `user_name` is optional; when present the user row is resolved or
/// created idempotently and recorded as the session creator on insert.
///
/// # Errors
///
/// `Validation` when `room_id` or `image_data` is absent or empty,
/// `Storage` on any database failure.
pub async fn save(
    pool: &PgPool,
    room_id: Option<&str>,
    user_name: Option<&str>,
    image_data: Option<&str>,
) -> Result<SaveOutcome, SessionError> {
    let room_id = require(room_id, "roomId")?;
    let image_data = require(image_data, "imageData")?;
    let user_name = user_name.filter(|name| !name.is_empty());

    let mut tx = pool.begin().await?;

    let created_by = match user_name {
        Some(name) => Some(resolve_user(&mut tx, name).await?),
        None => None,
    };

    // Lock the row (if any) so the insert/update branch cannot race a
    // concurrent save to the same room within its own transaction.
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM whiteboard_sessions WHERE room_id = $1 FOR UPDATE")
            .bind(room_id)
            .fetch_optional(&mut *tx)
            .await?;

    let outcome = if existing.is_some() {
        // created_by and created_at are immutable after first insert.
        sqlx::query(
            "UPDATE whiteboard_sessions SET image_data = $2, updated_at = now() WHERE room_id = $1",
        )
        .bind(room_id)
        .bind(image_data)
        .execute(&mut *tx)
        .await?;
        SaveOutcome::Updated
    } else {
        let session_id: i64 = sqlx::query_scalar(
            "INSERT INTO whiteboard_sessions (room_id, image_data, created_by) \
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(room_id)
        .bind(image_data)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;
        SaveOutcome::Created { session_id }
    };

    tx.commit().await?;
    Ok(outcome)
}

/// Resolve a user id by display name, creating the row on first save.
/// The no-op `DO UPDATE` makes the statement return the id either way.
async fn resolve_user(tx: &mut Transaction<'_, Postgres>, name: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (name) VALUES ($1) \
         ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
         RETURNING id",
    )
    .bind(name)
    .fetch_one(&mut **tx)
    .await
}

// =============================================================================
// LOAD
// =============================================================================

/// Load the most recently saved snapshot for a room.
///
/// # Errors
///
/// `NotFound` when no row exists or the stored payload is empty,
/// `Storage` on any database failure.
pub async fn load(pool: &PgPool, room_id: &str) -> Result<SessionSnapshot, SessionError> {
    let row: Option<(String, Option<String>)> =
        sqlx::query_as("SELECT room_id, image_data FROM whiteboard_sessions WHERE room_id = $1")
            .bind(room_id)
            .fetch_optional(pool)
            .await?;

    match row {
        Some((room_id, Some(image_data))) if !image_data.is_empty() => {
            Ok(SessionSnapshot { room_id, image_data })
        }
        _ => Err(SessionError::NotFound(room_id.to_string())),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, SessionError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(SessionError::Validation(field)),
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
