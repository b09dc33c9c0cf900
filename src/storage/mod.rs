//! Persistence port for the engine, plus the in-memory implementation used by
//! the web binary and the tests.
//!
//! The engine never talks to a datastore directly: everything goes through
//! [`TournamentStore`]. The one non-CRUD requirement is
//! [`TournamentStore::try_advance_phase`], an atomic compare-and-set on the
//! tournament's phase. Generation and advancement take the guard before
//! inserting any rows, so duplicate generation across concurrent callers (or
//! processes, for a database-backed store) cannot both succeed.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    Group, GroupId, MatchId, Participant, Phase, TennisMatch, Tournament, TournamentId,
};

/// Repository interface the engine operates against.
pub trait TournamentStore: Send + Sync {
    fn insert_tournament(&self, tournament: Tournament);
    fn tournament(&self, id: TournamentId) -> Option<Tournament>;
    /// All tournaments, for cross-tournament reporting.
    fn tournaments(&self) -> Vec<Tournament>;

    /// Atomically move a tournament's phase from `from` to `to`. Returns false
    /// when the current phase is not `from` (someone else got there first, or
    /// the transition was already made).
    fn try_advance_phase(&self, id: TournamentId, from: Phase, to: Phase) -> bool;

    fn insert_participant(&self, participant: Participant);
    /// Roster of a tournament, in enrollment order.
    fn participants(&self, tournament_id: TournamentId) -> Vec<Participant>;
    fn update_participant(&self, participant: Participant);

    fn insert_groups(&self, groups: Vec<Group>);
    fn groups(&self, tournament_id: TournamentId) -> Vec<Group>;
    fn group(&self, id: GroupId) -> Option<Group>;

    fn insert_matches(&self, matches: Vec<TennisMatch>);
    fn match_by_id(&self, id: MatchId) -> Option<TennisMatch>;
    fn update_match(&self, m: TennisMatch);
    /// All matches of a tournament, ordered by round then creation order.
    fn matches(&self, tournament_id: TournamentId) -> Vec<TennisMatch>;
}
