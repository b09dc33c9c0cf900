//! In-memory store: RwLock-protected tables, linear scans. Good enough for a
//! single-process deployment and for tests; a database-backed store would
//! implement the same trait with a conditional UPDATE for the phase guard.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{
    Group, GroupId, MatchId, Participant, Phase, TennisMatch, Tournament, TournamentId,
};
use crate::storage::TournamentStore;

#[derive(Default)]
struct Tables {
    tournaments: HashMap<TournamentId, Tournament>,
    /// Enrollment order is meaningful (unseeded participants rank by it).
    participants: Vec<Participant>,
    groups: Vec<Group>,
    /// Insertion order is meaningful (round order within a generation event).
    matches: Vec<TennisMatch>,
}

/// Thread-safe in-memory implementation of [`TournamentStore`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl TournamentStore for MemoryStore {
    fn insert_tournament(&self, tournament: Tournament) {
        self.write().tournaments.insert(tournament.id, tournament);
    }

    fn tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.read().tournaments.get(&id).cloned()
    }

    fn tournaments(&self) -> Vec<Tournament> {
        let mut all: Vec<_> = self.read().tournaments.values().cloned().collect();
        all.sort_by_key(|t| t.created_at);
        all
    }

    fn try_advance_phase(&self, id: TournamentId, from: Phase, to: Phase) -> bool {
        let mut tables = self.write();
        match tables.tournaments.get_mut(&id) {
            Some(t) if t.phase == from => {
                t.phase = to;
                true
            }
            _ => false,
        }
    }

    fn insert_participant(&self, participant: Participant) {
        self.write().participants.push(participant);
    }

    fn participants(&self, tournament_id: TournamentId) -> Vec<Participant> {
        self.read()
            .participants
            .iter()
            .filter(|p| p.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn update_participant(&self, participant: Participant) {
        let mut tables = self.write();
        if let Some(p) = tables.participants.iter_mut().find(|p| p.id == participant.id) {
            *p = participant;
        }
    }

    fn insert_groups(&self, groups: Vec<Group>) {
        self.write().groups.extend(groups);
    }

    fn groups(&self, tournament_id: TournamentId) -> Vec<Group> {
        self.read()
            .groups
            .iter()
            .filter(|g| g.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn group(&self, id: GroupId) -> Option<Group> {
        self.read().groups.iter().find(|g| g.id == id).cloned()
    }

    fn insert_matches(&self, matches: Vec<TennisMatch>) {
        self.write().matches.extend(matches);
    }

    fn match_by_id(&self, id: MatchId) -> Option<TennisMatch> {
        self.read().matches.iter().find(|m| m.id == id).cloned()
    }

    fn update_match(&self, m: TennisMatch) {
        let mut tables = self.write();
        if let Some(existing) = tables.matches.iter_mut().find(|x| x.id == m.id) {
            *existing = m;
        }
    }

    fn matches(&self, tournament_id: TournamentId) -> Vec<TennisMatch> {
        let mut out: Vec<_> = self
            .read()
            .matches
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        out.sort_by_key(|m| m.round);
        out
    }
}
