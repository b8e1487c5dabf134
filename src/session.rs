//! The browser's identity in each room it has joined, kept in the session
//! cookie instead of client-side storage.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{AppResult, model::ParticipantId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub participant_id: ParticipantId,
    pub nickname: String,
}

fn key(room_id: &str) -> String {
    format!("participant:{room_id}")
}

pub async fn remember(session: &Session, room_id: &str, identity: Identity) -> AppResult<()> {
    session.insert(&key(room_id), identity).await?;
    Ok(())
}

pub async fn recall(session: &Session, room_id: &str) -> AppResult<Option<Identity>> {
    Ok(session.get::<Identity>(&key(room_id)).await?)
}

pub async fn forget(session: &Session, room_id: &str) -> AppResult<()> {
    session.remove::<Identity>(&key(room_id)).await?;
    Ok(())
}
