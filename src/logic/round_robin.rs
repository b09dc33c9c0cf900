//! All-play-all scheduling: the whole-tournament championship and the
//! per-group variant of the group stage.

use crate::models::{
    seed_order, Group, GroupId, ParticipantId, Phase, Slot, TennisMatch, TournamentError,
    TournamentFormat, TournamentId,
};
use crate::storage::TournamentStore;

/// Generate the full all-play-all schedule for a `RoundRobin` championship.
/// Every pair of participants meets exactly once: N*(N-1)/2 matches.
pub fn generate_championship(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<TennisMatch>, TournamentError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    if tournament.format != TournamentFormat::RoundRobin {
        return Err(TournamentError::InvalidTournamentType);
    }

    let roster = store.participants(tournament_id);
    if roster.len() < 2 {
        return Err(TournamentError::InsufficientParticipants {
            required: 2,
            actual: roster.len(),
        });
    }
    let entrants: Vec<ParticipantId> = roster.iter().map(|p| p.id).collect();
    let matches = build_round_robin(tournament_id, &entrants, None);

    if !store.try_advance_phase(tournament_id, Phase::Enrollment, Phase::GroupStage) {
        return Err(TournamentError::AlreadyGenerated);
    }
    store.insert_matches(matches.clone());
    log::info!(
        "generated championship for tournament {}: {} participants, {} matches",
        tournament_id,
        entrants.len(),
        matches.len()
    );
    Ok(matches)
}

/// Split the roster into `num_groups` groups and generate an independent
/// round-robin per group. Participants are dealt serpentine in seed order so
/// the strongest players spread across groups; every group needs at least two
/// members.
pub fn generate_groups(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
    num_groups: usize,
) -> Result<(Vec<Group>, Vec<TennisMatch>), TournamentError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    if tournament.format != TournamentFormat::GroupsThenKnockout || num_groups == 0 {
        return Err(TournamentError::InvalidTournamentType);
    }

    let mut roster = store.participants(tournament_id);
    if roster.len() < 2 * num_groups {
        return Err(TournamentError::InsufficientParticipants {
            required: 2 * num_groups,
            actual: roster.len(),
        });
    }
    seed_order(&mut roster);

    // Serpentine deal: row 0 left-to-right, row 1 right-to-left, ...
    let mut assigned: Vec<Vec<ParticipantId>> = vec![Vec::new(); num_groups];
    for (i, p) in roster.iter().enumerate() {
        let row = i / num_groups;
        let col = i % num_groups;
        let g = if row % 2 == 0 { col } else { num_groups - 1 - col };
        assigned[g].push(p.id);
    }

    let groups: Vec<Group> = assigned
        .iter()
        .enumerate()
        .map(|(i, ids)| Group::new(tournament_id, group_name(i), ids.clone()))
        .collect();

    let mut matches = Vec::new();
    for group in &groups {
        for m in build_round_robin(tournament_id, &group.participant_ids, Some(group.id)) {
            matches.push(m);
        }
    }

    if !store.try_advance_phase(tournament_id, Phase::Enrollment, Phase::GroupStage) {
        return Err(TournamentError::AlreadyGenerated);
    }
    for group in &groups {
        for &pid in &group.participant_ids {
            if let Some(mut p) = roster.iter().find(|p| p.id == pid).cloned() {
                p.group_id = Some(group.id);
                store.update_participant(p);
            }
        }
    }
    store.insert_groups(groups.clone());
    store.insert_matches(matches.clone());
    log::info!(
        "generated group stage for tournament {}: {} groups, {} matches",
        tournament_id,
        groups.len(),
        matches.len()
    );
    Ok((groups, matches))
}

/// Circle-method round robin over the given entrants. With an odd entrant
/// count a rotating bye placeholder sits in the ring; pairings involving it
/// are skipped, so every real participant rests exactly one round.
pub(crate) fn build_round_robin(
    tournament_id: TournamentId,
    entrants: &[ParticipantId],
    group_id: Option<GroupId>,
) -> Vec<TennisMatch> {
    let mut ring: Vec<Option<ParticipantId>> = entrants.iter().copied().map(Some).collect();
    if ring.len() % 2 == 1 {
        ring.push(None);
    }
    let n = ring.len();
    let mut matches = Vec::with_capacity(entrants.len() * (entrants.len() - 1) / 2);

    for round in 1..n as u32 {
        for i in 0..n / 2 {
            if let (Some(a), Some(b)) = (ring[i], ring[n - 1 - i]) {
                let mut m = TennisMatch::new(
                    tournament_id,
                    round,
                    format!("Round {}", round),
                    Slot::Player(a),
                    Slot::Player(b),
                );
                m.group_id = group_id;
                matches.push(m);
            }
        }
        // Fixed pivot at index 0, the rest rotates one step.
        ring[1..].rotate_right(1);
    }
    matches
}

fn group_name(index: usize) -> String {
    if index < 26 {
        format!("Girone {}", (b'A' + index as u8) as char)
    } else {
        format!("Girone {}", index + 1)
    }
}
