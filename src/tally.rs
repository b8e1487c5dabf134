//! Per-date snapshot of a room's availability votes.
//!
//! Everything here is pure: handlers fetch active participants' votes and the
//! room's notes, then hand them to [`build_dates`].

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{Aggregate, ParticipantId, TimeSlot, VoteStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VoteRow {
    #[serde(skip)]
    pub date: String,
    #[serde(skip)]
    pub time_slot: TimeSlot,
    pub participant_id: ParticipantId,
    pub nickname: String,
    pub status: VoteStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub aggregate: Aggregate,
    pub votes: Vec<VoteRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateView {
    pub lunch: SlotView,
    pub dinner: SlotView,
    pub note: String,
}

/// Summarizes one slot. Green needs every active participant on board;
/// any red or yellow vote wins regardless of how many greens there are.
pub fn aggregate<I>(statuses: I, total_participants: usize) -> Aggregate
where
    I: IntoIterator<Item = VoteStatus>,
{
    let mut count = 0;
    let (mut red, mut yellow) = (false, false);
    for status in statuses {
        count += 1;
        match status {
            VoteStatus::Red => red = true,
            VoteStatus::Yellow => yellow = true,
            VoteStatus::Green => {}
        }
    }

    if red {
        Aggregate::Red
    } else if yellow {
        Aggregate::Yellow
    } else if count > 0 && count == total_participants {
        Aggregate::Green
    } else {
        Aggregate::White
    }
}

fn slot_view(votes: Vec<VoteRow>, total_participants: usize) -> SlotView {
    SlotView {
        aggregate: aggregate(votes.iter().map(|vote| vote.status), total_participants),
        votes,
    }
}

/// Builds the snapshot for every date that has a vote or a note.
///
/// `votes` must already be restricted to participants who aren't kicked, and
/// `notes` to non-empty ones.
pub fn build_dates(
    total_participants: usize,
    votes: impl IntoIterator<Item = VoteRow>,
    mut notes: BTreeMap<String, String>,
) -> BTreeMap<String, DateView> {
    let mut by_slot: BTreeMap<(String, TimeSlot), Vec<VoteRow>> = BTreeMap::new();
    for vote in votes {
        by_slot
            .entry((vote.date.clone(), vote.time_slot))
            .or_default()
            .push(vote);
    }

    let dates: BTreeSet<String> = by_slot
        .keys()
        .map(|(date, _)| date.clone())
        .chain(notes.keys().cloned())
        .collect();

    dates
        .into_iter()
        .map(|date| {
            let mut slot = |time_slot: TimeSlot| {
                let votes = by_slot.remove(&(date.clone(), time_slot)).unwrap_or_default();
                slot_view(votes, total_participants)
            };
            let view = DateView {
                lunch: slot(TimeSlot::Lunch),
                dinner: slot(TimeSlot::Dinner),
                note: notes.remove(&date).unwrap_or_default(),
            };
            (date, view)
        })
        .collect()
}
