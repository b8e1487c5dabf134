use axum::{
    Json, debug_handler,
    extract::State,
};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{ApiPath, AppError, AppResult, AppState, session};

use super::find_room;

/// Who this browser is in the room, if it has joined before. A kicked
/// identity is reported once and then forgotten.
#[debug_handler(state = AppState)]
pub(crate) async fn me(
    State(db_pool): State<SqlitePool>,
    session: Session,
    ApiPath(room_id): ApiPath<String>,
) -> AppResult<Json<Value>> {
    let room = find_room(&db_pool, &room_id).await?;

    let Some(identity) = session::recall(&session, &room.id).await? else {
        return Err(AppError::NotFound("Participant"));
    };

    let is_kicked: Option<(bool,)> =
        sqlx::query_as("SELECT is_kicked FROM participants WHERE id=? AND room_id=?")
            .bind(identity.participant_id)
            .bind(&room.id)
            .fetch_optional(&db_pool)
            .await?;

    let Some((is_kicked,)) = is_kicked else {
        session::forget(&session, &room.id).await?;
        return Err(AppError::NotFound("Participant"));
    };

    if is_kicked {
        session::forget(&session, &room.id).await?;
    }

    Ok(Json(json!({
        "participant_id": identity.participant_id,
        "nickname": identity.nickname,
        "is_admin": room.admin_id == Some(identity.participant_id),
        "is_kicked": is_kicked,
    })))
}
