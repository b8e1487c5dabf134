use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{ApiJson, ApiPath, AppResult, AppState, db, model};

use super::find_room;

#[derive(Deserialize)]
pub(crate) struct NoteQuery {
    #[serde(default)]
    date: String,
    #[serde(default)]
    note: Option<String>,
}

/// Sets the room's note for a date. A blank note clears it.
#[debug_handler(state = AppState)]
pub(crate) async fn note(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
    ApiJson(NoteQuery { date, note }): ApiJson<NoteQuery>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;
    let date = model::parse_date(&date)?;
    let note = note.as_deref().unwrap_or_default().trim();

    if note.is_empty() {
        sqlx::query("DELETE FROM notes WHERE room_id=? AND date=?")
            .bind(&room.id)
            .bind(&date)
            .execute(&db_pool)
            .await?;
    } else {
        sqlx::query(
            "INSERT INTO notes (room_id,date,note,updated_at) VALUES (?,?,?,?)
            ON CONFLICT (room_id,date) DO UPDATE SET note=excluded.note,updated_at=excluded.updated_at",
        )
        .bind(&room.id)
        .bind(&date)
        .bind(note)
        .bind(db::now()?)
        .execute(&db_pool)
        .await?;
    }

    Ok(Json(json!({ "ok": true })))
}
