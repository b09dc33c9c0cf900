//! Derived views: standings rows and cross-tournament player reports.
//! Never persisted as a source of truth; recomputed from matches on each read.

use serde::{Deserialize, Serialize};

use crate::models::participant::ParticipantId;

/// One row of a ranked standings table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub participant_id: ParticipantId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// 1-based position after tiebreaks.
    pub rank: u32,
}

impl StandingRow {
    pub fn new(participant_id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            participant_id,
            name: name.into(),
            played: 0,
            won: 0,
            lost: 0,
            sets_won: 0,
            sets_lost: 0,
            games_won: 0,
            games_lost: 0,
            rank: 0,
        }
    }

    pub fn set_difference(&self) -> i64 {
        self.sets_won as i64 - self.sets_lost as i64
    }

    pub fn game_difference(&self) -> i64 {
        self.games_won as i64 - self.games_lost as i64
    }
}

/// One row of the cross-tournament player ranking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerRankingRow {
    pub player_name: String,
    pub tournaments_played: u32,
    pub tournaments_won: u32,
    pub matches_won: u32,
    pub matches_lost: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub games_won: u32,
    pub games_lost: u32,
    /// Percentage of finished matches won, 0-100.
    pub win_rate: f64,
}

/// Platform-wide counters shown above the ranking.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportOverview {
    pub total_tournaments: u32,
    pub completed_tournaments: u32,
    pub total_matches: u32,
    pub completed_matches: u32,
}

/// Full player report payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub overview: ReportOverview,
    pub player_rankings: Vec<PlayerRankingRow>,
}
