use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::info;

use crate::{ApiPath, ApiQuery, AppError, AppResult, AppState, model::ParticipantId};

use super::find_room;

#[derive(Deserialize)]
pub(crate) struct KickQuery {
    admin_id: Option<ParticipantId>,
}

/// Kicks a participant and drops their votes. Only the room admin may do
/// this, and not to themselves.
#[debug_handler(state = AppState)]
pub(crate) async fn kick(
    State(db_pool): State<SqlitePool>,
    ApiPath((room_id, participant_id)): ApiPath<(String, ParticipantId)>,
    ApiQuery(KickQuery { admin_id }): ApiQuery<KickQuery>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;

    if admin_id.is_none() || room.admin_id != admin_id {
        return Err(AppError::Forbidden("Not authorized"));
    }
    if Some(participant_id) == admin_id {
        return Err(AppError::Forbidden("Cannot kick yourself"));
    }

    let mut tx = db_pool.begin().await?;

    let kicked = sqlx::query("UPDATE participants SET is_kicked=1 WHERE id=? AND room_id=?")
        .bind(participant_id)
        .bind(&room.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if kicked == 0 {
        return Err(AppError::NotFound("Participant"));
    }

    sqlx::query("DELETE FROM votes WHERE participant_id=? AND room_id=?")
        .bind(participant_id)
        .bind(&room.id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM location_votes WHERE participant_id=? AND room_id=?")
        .bind(participant_id)
        .bind(&room.id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(room_id = %room.id, participant_id, "kicked");
    Ok(Json(json!({ "ok": true })))
}
