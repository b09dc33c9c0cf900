//! Group: one round-robin pool within a group-stage tournament.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::participant::ParticipantId;
use crate::models::tournament::TournamentId;

/// Unique identifier for a group.
pub type GroupId = Uuid;

/// A group-stage pool. The participant list is ordered by intra-group seeding
/// (strongest first) as assigned at generation time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub tournament_id: TournamentId,
    /// Display name ("Girone A", "Girone B", ...).
    pub name: String,
    pub participant_ids: Vec<ParticipantId>,
}

impl Group {
    pub fn new(tournament_id: TournamentId, name: impl Into<String>, participant_ids: Vec<ParticipantId>) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            name: name.into(),
            participant_ids,
        }
    }
}
