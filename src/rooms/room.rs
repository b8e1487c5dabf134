use axum::{
    Json, debug_handler,
    extract::State,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{ApiPath, AppResult, AppState, db::Participant};

use super::find_room;

/// The room itself plus everyone who ever joined, kicked or not.
#[debug_handler(state = AppState)]
pub(crate) async fn room(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;

    let participants: Vec<Participant> = sqlx::query_as(
        "SELECT id,nickname,is_kicked FROM participants WHERE room_id=? ORDER BY created_at,id",
    )
    .bind(&room.id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(json!({
        "admin_id": room.admin_id,
        "room": room,
        "participants": participants,
    })))
}
