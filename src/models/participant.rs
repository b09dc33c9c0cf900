//! Participant: one roster entry enrolled in a tournament.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::group::GroupId;
use crate::models::tournament::TournamentId;

/// Unique identifier for a participant (used in match slots and standings).
pub type ParticipantId = Uuid;

/// A tournament participant, as supplied by the enrollment system.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub tournament_id: TournamentId,
    /// Display name from the roster entry.
    pub name: String,
    /// Pre-assigned rank controlling bracket placement; unique within a
    /// tournament when present. None means unseeded.
    pub seed: Option<u32>,
    /// Set when the group stage is generated; None before that (and always
    /// None for single elimination).
    pub group_id: Option<GroupId>,
}

impl Participant {
    /// Enroll a participant with an optional seed rank.
    pub fn new(tournament_id: TournamentId, name: impl Into<String>, seed: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            seed,
            group_id: None,
        }
    }
}

/// Sort key placing seeded participants first (lowest seed number = strongest),
/// then unseeded ones in enrollment order.
pub fn seed_order(participants: &mut [Participant]) {
    participants.sort_by_key(|p| p.seed.unwrap_or(u32::MAX));
}
