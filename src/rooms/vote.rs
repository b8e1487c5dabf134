use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiJson, ApiPath, AppResult, AppState,
    model::{self, ParticipantId, TimeSlot, VoteStatus},
};

use super::{ensure_active, find_room};

#[derive(Deserialize)]
pub(crate) struct VoteQuery {
    participant_id: ParticipantId,
    #[serde(default)]
    date: String,
    #[serde(default)]
    time_slot: String,
    /// `null` or missing clears the vote.
    #[serde(default)]
    status: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn vote(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
    ApiJson(VoteQuery {
        participant_id,
        date,
        time_slot,
        status,
    }): ApiJson<VoteQuery>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;
    ensure_active(&db_pool, &room.id, participant_id).await?;

    let time_slot: TimeSlot = time_slot.parse()?;
    let status = status.as_deref().map(str::parse::<VoteStatus>).transpose()?;
    let date = model::parse_date(&date)?;

    match status {
        Some(status) => {
            sqlx::query(
                "INSERT INTO votes (room_id,participant_id,date,time_slot,status) VALUES (?,?,?,?,?)
                ON CONFLICT (participant_id,date,time_slot) DO UPDATE SET status=excluded.status",
            )
            .bind(&room.id)
            .bind(participant_id)
            .bind(&date)
            .bind(time_slot)
            .bind(status)
            .execute(&db_pool)
            .await?;
        }
        None => {
            sqlx::query("DELETE FROM votes WHERE participant_id=? AND date=? AND time_slot=?")
                .bind(participant_id)
                .bind(&date)
                .bind(time_slot)
                .execute(&db_pool)
                .await?;
        }
    }

    Ok(Json(json!({ "ok": true })))
}
