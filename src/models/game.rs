//! TennisMatch, its slots, set scores, and round labelling.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::group::GroupId;
use crate::models::participant::ParticipantId;
use crate::models::tournament::{TournamentError, TournamentId};

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Which side of the match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// What occupies one side of a match.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// A known participant.
    Player(ParticipantId),
    /// Placeholder: whoever wins the referenced feeder match ("TBD").
    WinnerOf(MatchId),
    /// No opponent in this slot; the other side advances automatically.
    Bye,
}

impl Slot {
    /// The participant id if this slot is resolved.
    pub fn player(&self) -> Option<ParticipantId> {
        match self {
            Slot::Player(id) => Some(*id),
            _ => None,
        }
    }
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Created by a generator, waiting for a result.
    #[default]
    Scheduled,
    /// Played and decided through set scores.
    Completed,
    /// Decided without play: forfeit or bye. No sets recorded.
    Walkover,
}

/// Score of a 7-6 tiebreak: winner needs at least 7 points and a 2-point lead.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TiebreakScore {
    pub home_points: u32,
    pub away_points: u32,
}

/// One completed set. Only constructible through [`SetScore::new`], which
/// enforces the tennis numeric rules, so every stored value is a legal set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScore {
    /// 1-based position of the set within the match.
    pub number: u32,
    pub home_games: u32,
    pub away_games: u32,
    /// Required iff the set finished 7-6 (either direction).
    pub tiebreak: Option<TiebreakScore>,
}

impl SetScore {
    /// Validate and build a set score. A set is won at 6 games with a 2-game
    /// lead, at 7-5, or at 7-6 with a tiebreak; anything else is rejected.
    pub fn new(
        number: u32,
        home_games: u32,
        away_games: u32,
        tiebreak: Option<TiebreakScore>,
    ) -> Result<Self, TournamentError> {
        let (hi, lo) = if home_games >= away_games {
            (home_games, away_games)
        } else {
            (away_games, home_games)
        };
        let is_tiebreak_set = hi == 7 && lo == 6;

        let valid_games = (hi == 6 && hi >= lo + 2) || (hi == 7 && lo == 5) || is_tiebreak_set;
        if !valid_games {
            return Err(TournamentError::InvalidScore(format!(
                "{}-{} is not a finished tennis set",
                home_games, away_games
            )));
        }

        match (is_tiebreak_set, tiebreak) {
            (true, None) => {
                return Err(TournamentError::InvalidScore(
                    "a 7-6 set requires a tiebreak score".into(),
                ));
            }
            (false, Some(_)) => {
                return Err(TournamentError::InvalidScore(format!(
                    "tiebreak score given for a {}-{} set",
                    home_games, away_games
                )));
            }
            (true, Some(tb)) => {
                let (tb_hi, tb_lo) = if tb.home_points >= tb.away_points {
                    (tb.home_points, tb.away_points)
                } else {
                    (tb.away_points, tb.home_points)
                };
                if tb_hi < 7 || tb_hi < tb_lo + 2 {
                    return Err(TournamentError::InvalidScore(format!(
                        "tiebreak {}-{} needs at least 7 points and a 2-point lead",
                        tb.home_points, tb.away_points
                    )));
                }
                // The tiebreak decides the set, so its winner must be the 7-game side.
                let tb_home_won = tb.home_points > tb.away_points;
                let set_home_won = home_games > away_games;
                if tb_home_won != set_home_won {
                    return Err(TournamentError::InvalidScore(
                        "tiebreak winner does not match the set winner".into(),
                    ));
                }
            }
            (false, None) => {}
        }

        Ok(Self {
            number,
            home_games,
            away_games,
            tiebreak,
        })
    }

    /// Which side took the set. Draws are impossible by construction.
    pub fn winner(&self) -> Side {
        if self.home_games > self.away_games {
            Side::Home
        } else {
            Side::Away
        }
    }
}

/// A single tennis match within a tournament schedule. Created exactly once by
/// a generator; afterwards only score, winner and status are mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TennisMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// Owning group for group-stage matches; None for knockout/championship.
    pub group_id: Option<GroupId>,
    /// Numeric round order, 1 = first round played.
    pub round: u32,
    /// Display label ("Finale", "Semifinale", ..., "Round N").
    pub round_label: String,
    pub home: Slot,
    pub away: Slot,
    pub sets: Vec<SetScore>,
    pub winner: Option<ParticipantId>,
    pub status: MatchStatus,
    /// Knockout link: the match (and side of it) the winner advances into.
    pub next_match: Option<(MatchId, Side)>,
}

impl TennisMatch {
    pub fn new(
        tournament_id: TournamentId,
        round: u32,
        round_label: impl Into<String>,
        home: Slot,
        away: Slot,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            group_id: None,
            round,
            round_label: round_label.into(),
            home,
            away,
            sets: Vec::new(),
            winner: None,
            status: MatchStatus::Scheduled,
            next_match: None,
        }
    }

    /// Slot on the given side.
    pub fn slot(&self, side: Side) -> Slot {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    /// Resolved participant on the given side, if any.
    pub fn player(&self, side: Side) -> Option<ParticipantId> {
        self.slot(side).player()
    }

    /// True once a result exists (completed or walkover).
    pub fn is_finished(&self) -> bool {
        self.status != MatchStatus::Scheduled
    }
}

/// Display label for a knockout round, derived from how many matches that
/// round contains (counted from the final backwards).
pub fn round_label(matches_in_round: usize, round: u32) -> String {
    match matches_in_round {
        1 => "Finale".to_string(),
        2 => "Semifinale".to_string(),
        4 => "Quarti di finale".to_string(),
        8 => "Ottavi di finale".to_string(),
        _ => format!("Round {}", round),
    }
}
