use std::collections::BTreeMap;

use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    ApiPath, AppResult, AppState,
    model::ParticipantId,
    tally::{self, DateView, VoteRow},
};

use super::find_room;

#[derive(Serialize, sqlx::FromRow)]
pub(crate) struct ActiveParticipant {
    id: ParticipantId,
    nickname: String,
}

#[derive(Serialize)]
pub(crate) struct Snapshot {
    total_participants: usize,
    participants: Vec<ActiveParticipant>,
    admin_id: Option<ParticipantId>,
    dates: BTreeMap<String, DateView>,
}

/// Current availability snapshot, counting only participants who aren't kicked.
#[debug_handler(state = AppState)]
pub(crate) async fn votes(
    State(db_pool): State<SqlitePool>,
    ApiPath(room_id): ApiPath<String>,
) -> AppResult<Json<Snapshot>> {
    let room = find_room(&db_pool, &room_id).await?;

    let participants: Vec<ActiveParticipant> = sqlx::query_as(
        "SELECT id,nickname FROM participants WHERE room_id=? AND is_kicked=0 ORDER BY created_at,id",
    )
    .bind(&room.id)
    .fetch_all(&db_pool)
    .await?;

    let votes: Vec<VoteRow> = sqlx::query_as(
        "SELECT v.date,v.time_slot,v.status,v.participant_id,p.nickname
        FROM votes v JOIN participants p ON v.participant_id=p.id
        WHERE v.room_id=? AND p.is_kicked=0
        ORDER BY v.date,v.time_slot,p.created_at,p.id",
    )
    .bind(&room.id)
    .fetch_all(&db_pool)
    .await?;

    let notes: Vec<(String, String)> =
        sqlx::query_as("SELECT date,note FROM notes WHERE room_id=? AND note!='' ORDER BY date")
            .bind(&room.id)
            .fetch_all(&db_pool)
            .await?;

    let dates = tally::build_dates(participants.len(), votes, notes.into_iter().collect());

    Ok(Json(Snapshot {
        total_participants: participants.len(),
        participants,
        admin_id: room.admin_id,
        dates,
    }))
}
