//! Tournament, its format/phase enums, and TournamentError.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::game::MatchId;
use crate::models::group::GroupId;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough participants to generate a schedule (per tournament or per group).
    InsufficientParticipants { required: usize, actual: usize },
    /// A schedule already exists for this phase (or another caller is creating it right now).
    AlreadyGenerated,
    /// Malformed or impossible tennis score. The string says what was wrong.
    InvalidScore(String),
    /// Attempt to complete a match without a determinable winner (tennis has no draws).
    NoWinnerInTennis,
    /// Not every group match is finished yet.
    GroupStageIncomplete,
    /// No match with this id.
    MatchNotFound(MatchId),
    /// No tournament with this id.
    TournamentNotFound(TournamentId),
    /// No group with this id.
    GroupNotFound(GroupId),
    /// Operation does not apply to this tournament format.
    InvalidTournamentType,
    /// The match already has a result and cannot be scored again.
    MatchAlreadyCompleted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientParticipants { required, actual } => {
                write!(f, "Need at least {} participants (got {})", required, actual)
            }
            TournamentError::AlreadyGenerated => {
                write!(f, "Schedule already generated for this phase")
            }
            TournamentError::InvalidScore(reason) => write!(f, "Invalid score: {}", reason),
            TournamentError::NoWinnerInTennis => {
                write!(f, "Cannot complete a tennis match without a winner")
            }
            TournamentError::GroupStageIncomplete => {
                write!(f, "Not all group matches are completed")
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            TournamentError::GroupNotFound(_) => write!(f, "Group not found"),
            TournamentError::InvalidTournamentType => {
                write!(f, "Operation not valid for this tournament format")
            }
            TournamentError::MatchAlreadyCompleted => write!(f, "Match already has a result"),
        }
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How the tournament is structured.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// One knockout bracket from enrollment to final.
    SingleElimination,
    /// Round-robin groups first, qualifiers advance to a knockout bracket.
    GroupsThenKnockout,
    /// One all-play-all championship, no knockout.
    RoundRobin,
}

/// How many sets a single match is played over.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    BestOf1,
    #[default]
    BestOf3,
    BestOf5,
}

impl MatchFormat {
    /// Sets a side must win to take the match (1, 2 or 3).
    pub fn sets_to_win(self) -> usize {
        match self {
            MatchFormat::BestOf1 => 1,
            MatchFormat::BestOf3 => 2,
            MatchFormat::BestOf5 => 3,
        }
    }
}

/// Current phase of the tournament. Transitions are monotonic and one-directional:
/// Enrollment -> GroupStage -> Knockout -> Completed. Single elimination skips
/// GroupStage; a round-robin championship skips Knockout.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Enrollment open; no schedule generated yet.
    #[default]
    Enrollment,
    /// Group round-robins (or the championship rounds) are being played.
    GroupStage,
    /// Single-elimination bracket is being played.
    Knockout,
    /// Final result decided. Canonical terminal phase.
    Completed,
}

/// Group-stage configuration for `GroupsThenKnockout` tournaments.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupConfig {
    /// Number of groups the roster is split into.
    pub num_groups: usize,
    /// How many participants advance from each group to the knockout phase.
    pub qualifiers_per_group: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            num_groups: 2,
            qualifiers_per_group: 2,
        }
    }
}

/// A tournament as supplied by the enrollment system. The engine mutates only
/// `phase`, and only through the store's guarded transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    pub match_format: MatchFormat,
    /// Maximum roster size accepted by enrollment.
    pub capacity: usize,
    pub phase: Phase,
    /// Present for `GroupsThenKnockout`; ignored otherwise.
    pub group_config: Option<GroupConfig>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create a tournament in Enrollment phase.
    pub fn new(
        name: impl Into<String>,
        format: TournamentFormat,
        match_format: MatchFormat,
        capacity: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            match_format,
            capacity,
            phase: Phase::Enrollment,
            group_config: match format {
                TournamentFormat::GroupsThenKnockout => Some(GroupConfig::default()),
                _ => None,
            },
            created_at: Utc::now(),
        }
    }

    /// Group configuration, falling back to the default split.
    pub fn group_config(&self) -> GroupConfig {
        self.group_config.unwrap_or_default()
    }
}
