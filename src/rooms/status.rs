use axum::{Json, debug_handler, extract::State};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{ApiPath, AppResult, AppState, model::ParticipantId};

use super::find_room;

/// Polled by clients before each refresh. Someone the room doesn't know
/// counts as kicked; an unknown room is not found.
#[debug_handler(state = AppState)]
pub(crate) async fn status(
    State(db_pool): State<SqlitePool>,
    ApiPath((room_id, participant_id)): ApiPath<(String, ParticipantId)>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;

    let is_kicked: Option<(bool,)> =
        sqlx::query_as("SELECT is_kicked FROM participants WHERE id=? AND room_id=?")
            .bind(participant_id)
            .bind(&room.id)
            .fetch_optional(&db_pool)
            .await?;

    let is_kicked = is_kicked.is_none_or(|(is_kicked,)| is_kicked);
    Ok(Json(json!({ "is_kicked": is_kicked })))
}
