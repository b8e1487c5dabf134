use std::collections::BTreeMap;

use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::SqlitePool;

use crate::{
    ApiJson, ApiPath, AppResult, AppState,
    model::{Location, ParticipantId},
};

use super::{ensure_active, find_room};

#[derive(Deserialize)]
pub(crate) struct LocationVoteQuery {
    participant_id: ParticipantId,
    #[serde(default)]
    location: String,
}

#[derive(Serialize)]
pub(crate) struct Voter {
    participant_id: ParticipantId,
    nickname: String,
}

/// Adds the participant's vote for a location, or takes it back if it was
/// already there.
#[debug_handler(state = AppState)]
pub(crate) async fn toggle(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
    ApiJson(LocationVoteQuery {
        participant_id,
        location,
    }): ApiJson<LocationVoteQuery>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;
    ensure_active(&db_pool, &room.id, participant_id).await?;
    let location: Location = location.parse()?;

    let removed = sqlx::query("DELETE FROM location_votes WHERE participant_id=? AND location=?")
        .bind(participant_id)
        .bind(location.as_str())
        .execute(&db_pool)
        .await?
        .rows_affected()
        > 0;

    if !removed {
        sqlx::query(
            "INSERT INTO location_votes (room_id,participant_id,location) VALUES (?,?,?)
            ON CONFLICT (participant_id,location) DO NOTHING",
        )
        .bind(&room.id)
        .bind(participant_id)
        .bind(location.as_str())
        .execute(&db_pool)
        .await?;
    }

    Ok(Json(json!({ "ok": true, "added": !removed })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn tallies(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;

    let rows: Vec<(String, ParticipantId, String)> = sqlx::query_as(
        "SELECT lv.location,lv.participant_id,p.nickname
        FROM location_votes lv JOIN participants p ON lv.participant_id=p.id
        WHERE lv.room_id=? AND p.is_kicked=0
        ORDER BY lv.location,p.created_at,p.id",
    )
    .bind(&room.id)
    .fetch_all(&db_pool)
    .await?;

    let mut votes: BTreeMap<String, Vec<Voter>> = BTreeMap::new();
    for (location, participant_id, nickname) in rows {
        votes.entry(location).or_default().push(Voter {
            participant_id,
            nickname,
        });
    }

    Ok(Json(json!({
        "votes": votes,
        "locations": Location::ALL,
    })))
}
