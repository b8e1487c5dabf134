mod join;
mod kick;
mod locations;
mod me;
mod new;
mod note;
mod room;
mod status;
mod vote;
mod votes;

use axum::{
    Router,
    routing::{delete, get, post},
};
use sqlx::SqlitePool;

use crate::{AppError, AppResult, AppState, db::Room, model::ParticipantId};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::new_room))
        .route("/{room_id}", get(room::room))
        .route("/{room_id}/join", post(join::join))
        .route("/{room_id}/me", get(me::me))
        .route("/{room_id}/vote", post(vote::vote))
        .route("/{room_id}/votes", get(votes::votes))
        .route("/{room_id}/note", post(note::note))
        .route("/{room_id}/location-vote", post(locations::toggle))
        .route("/{room_id}/location-votes", get(locations::tallies))
        .route("/{room_id}/participants/{participant_id}", delete(kick::kick))
        .route("/{room_id}/status/{participant_id}", get(status::status))
        .method_not_allowed_fallback(method_not_allowed)
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub(crate) async fn find_room(db_pool: &SqlitePool, room_id: &str) -> AppResult<Room> {
    sqlx::query_as("SELECT id,admin_id,created_at FROM rooms WHERE id=?")
        .bind(room_id)
        .fetch_optional(db_pool)
        .await?
        .ok_or(AppError::NotFound("Room"))
}

/// Fails unless the participant is in the room and hasn't been kicked.
pub(crate) async fn ensure_active(
    db_pool: &SqlitePool,
    room_id: &str,
    participant_id: ParticipantId,
) -> AppResult<()> {
    let is_kicked: Option<(bool,)> =
        sqlx::query_as("SELECT is_kicked FROM participants WHERE id=? AND room_id=?")
            .bind(participant_id)
            .bind(room_id)
            .fetch_optional(db_pool)
            .await?;

    match is_kicked {
        Some((false,)) => Ok(()),
        _ => Err(AppError::Forbidden("Participant has been kicked")),
    }
}
