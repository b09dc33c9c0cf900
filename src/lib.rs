//! Tournament structure engine for a tennis booking platform: bracket and
//! round-robin generation, tennis scoring, standings, group advancement, and
//! cross-tournament reports, behind an injected persistence port.

pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    advance_from_groups, compute_standings, decide_winner, generate_bracket,
    generate_championship, generate_groups, group_standings, player_report, report_match_result,
    tournament_standings,
};
pub use models::{
    Group, GroupConfig, GroupId, MatchFormat, MatchId, MatchStatus, Participant, ParticipantId,
    Phase, PlayerRankingRow, PlayerReport, ReportOverview, SetScore, Side, Slot, StandingRow,
    TennisMatch, TiebreakScore, Tournament, TournamentError, TournamentFormat, TournamentId,
};
pub use storage::{MemoryStore, TournamentStore};
