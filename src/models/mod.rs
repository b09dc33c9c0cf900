//! Data structures for the tournament engine: tournaments, participants,
//! matches and sets, groups, derived standings.

mod game;
mod group;
mod participant;
mod standings;
mod tournament;

pub use game::{
    round_label, MatchId, MatchStatus, SetScore, Side, Slot, TennisMatch, TiebreakScore,
};
pub use group::{Group, GroupId};
pub use participant::{seed_order, Participant, ParticipantId};
pub use standings::{PlayerRankingRow, PlayerReport, ReportOverview, StandingRow};
pub use tournament::{
    GroupConfig, MatchFormat, Phase, Tournament, TournamentError, TournamentFormat, TournamentId,
};
