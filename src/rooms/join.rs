use axum::{
    Json, debug_handler,
    extract::State,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{
    ApiJson, ApiPath, AppError, AppResult, AppState, db,
    model::ParticipantId,
    session::{self, Identity},
};

use super::find_room;

#[derive(Deserialize)]
pub(crate) struct JoinQuery {
    #[serde(default)]
    nickname: String,
}

#[derive(Serialize)]
pub(crate) struct Joined {
    participant_id: ParticipantId,
    nickname: String,
    is_admin: bool,
}

/// Joins under a nickname, or rejoins if it's already taken in this room.
/// The first participant in a room becomes its admin.
#[debug_handler(state = AppState)]
pub(crate) async fn join(
    State(db_pool): State<SqlitePool>,
    session: Session,
    ApiPath(room_id): ApiPath<String>,
    ApiJson(JoinQuery { nickname }): ApiJson<JoinQuery>,
) -> AppResult<Json<Joined>> {
    let room = find_room(&db_pool, &room_id).await?;

    let nickname = nickname.trim();
    if nickname.is_empty() {
        return Err(AppError::BadRequest("Nickname cannot be empty".to_owned()));
    }

    let mut tx = db_pool.begin().await?;

    let (participant_id, is_kicked): (ParticipantId, bool) = sqlx::query_as(
        "INSERT INTO participants (room_id,nickname,created_at) VALUES (?,?,?)
        ON CONFLICT (room_id,nickname) DO UPDATE SET nickname=excluded.nickname
        RETURNING id,is_kicked",
    )
    .bind(&room.id)
    .bind(nickname)
    .bind(db::now()?)
    .fetch_one(&mut *tx)
    .await?;

    if is_kicked {
        return Err(AppError::Forbidden("Participant has been kicked"));
    }

    sqlx::query("UPDATE rooms SET admin_id=? WHERE id=? AND admin_id IS NULL")
        .bind(participant_id)
        .bind(&room.id)
        .execute(&mut *tx)
        .await?;

    let (admin_id,): (Option<ParticipantId>,) =
        sqlx::query_as("SELECT admin_id FROM rooms WHERE id=?")
            .bind(&room.id)
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;

    let is_admin = admin_id == Some(participant_id);
    info!(room_id = %room.id, participant_id, nickname, is_admin, "joined");

    session::remember(
        &session,
        &room.id,
        Identity {
            participant_id,
            nickname: nickname.to_owned(),
        },
    )
    .await?;

    Ok(Json(Joined {
        participant_id,
        nickname: nickname.to_owned(),
        is_admin,
    }))
}
