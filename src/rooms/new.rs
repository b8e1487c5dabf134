use axum::{Json, debug_handler, extract::State};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::{AppResult, AppState, db};

#[debug_handler(state = AppState)]
pub(crate) async fn new_room(State(db_pool): State<SqlitePool>) -> AppResult<Json<Value>> {
    let room_id = Uuid::now_v7().to_string();
    sqlx::query("INSERT INTO rooms (id,admin_id,created_at) VALUES (?,NULL,?)")
        .bind(&room_id)
        .bind(db::now()?)
        .execute(&db_pool)
        .await?;

    info!(%room_id, "room created");
    Ok(Json(json!({ "room_id": room_id })))
}
