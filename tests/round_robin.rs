//! Integration tests for round-robin generation: championship schedules and
//! the group-stage variant.

use std::collections::HashMap;

use tennis_tournament_web::{
    generate_championship, generate_groups, report_match_result, MatchFormat, MemoryStore,
    Participant, ParticipantId, Phase, Side, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentStore,
};

fn tournament_with(
    format: TournamentFormat,
    n: usize,
) -> (MemoryStore, TournamentId, Vec<ParticipantId>) {
    let store = MemoryStore::new();
    let t = Tournament::new("Campionato", format, MatchFormat::BestOf3, 64);
    let tid = t.id;
    store.insert_tournament(t);
    let mut ids = Vec::new();
    for i in 0..n {
        let p = Participant::new(tid, format!("P{i}"), Some(i as u32 + 1));
        ids.push(p.id);
        store.insert_participant(p);
    }
    (store, tid, ids)
}

#[test]
fn six_participants_play_fifteen_matches() {
    let (store, tid, _) = tournament_with(TournamentFormat::RoundRobin, 6);
    let matches = generate_championship(&store, tid).unwrap();
    assert_eq!(matches.len(), 15);
    // 5 rounds of 3.
    let mut per_round: HashMap<u32, usize> = HashMap::new();
    for m in &matches {
        *per_round.entry(m.round).or_default() += 1;
    }
    assert_eq!(per_round.len(), 5);
    assert!(per_round.values().all(|&c| c == 3));
}

#[test]
fn every_pair_meets_exactly_once() {
    for n in 2..=9 {
        let (store, tid, _) = tournament_with(TournamentFormat::RoundRobin, n);
        let matches = generate_championship(&store, tid).unwrap();
        assert_eq!(matches.len(), n * (n - 1) / 2, "n = {}", n);
        let mut seen: Vec<(ParticipantId, ParticipantId)> = Vec::new();
        for m in &matches {
            let a = m.player(Side::Home).unwrap();
            let b = m.player(Side::Away).unwrap();
            assert_ne!(a, b);
            let pair = if a < b { (a, b) } else { (b, a) };
            assert!(!seen.contains(&pair), "pair met twice with n = {}", n);
            seen.push(pair);
        }
    }
}

#[test]
fn odd_field_sits_everyone_out_exactly_once() {
    let (store, tid, ids) = tournament_with(TournamentFormat::RoundRobin, 5);
    let matches = generate_championship(&store, tid).unwrap();
    assert_eq!(matches.len(), 10);
    // 5 rounds, 2 matches each; every participant plays 4 matches.
    for id in &ids {
        let played = matches
            .iter()
            .filter(|m| m.player(Side::Home) == Some(*id) || m.player(Side::Away) == Some(*id))
            .count();
        assert_eq!(played, 4);
    }
}

#[test]
fn championship_requires_two_participants() {
    let (store, tid, _) = tournament_with(TournamentFormat::RoundRobin, 1);
    assert!(matches!(
        generate_championship(&store, tid),
        Err(TournamentError::InsufficientParticipants { required: 2, actual: 1 })
    ));
}

#[test]
fn second_championship_generation_is_rejected() {
    let (store, tid, _) = tournament_with(TournamentFormat::RoundRobin, 4);
    generate_championship(&store, tid).unwrap();
    assert!(matches!(
        generate_championship(&store, tid),
        Err(TournamentError::AlreadyGenerated)
    ));
}

#[test]
fn championship_rejects_other_formats() {
    let (store, tid, _) = tournament_with(TournamentFormat::SingleElimination, 4);
    assert!(matches!(
        generate_championship(&store, tid),
        Err(TournamentError::InvalidTournamentType)
    ));
}

#[test]
fn last_result_completes_a_championship() {
    let (store, tid, _) = tournament_with(TournamentFormat::RoundRobin, 3);
    let matches = generate_championship(&store, tid).unwrap();
    for m in &matches {
        let home = m.player(Side::Home).unwrap();
        report_match_result(&store, m.id, vec![], Some(home)).unwrap();
    }
    assert_eq!(store.tournament(tid).unwrap().phase, Phase::Completed);
}

#[test]
fn groups_split_the_roster_and_tag_matches() {
    let (store, tid, _) = tournament_with(TournamentFormat::GroupsThenKnockout, 8);
    let (groups, matches) = generate_groups(&store, tid, 2).unwrap();
    assert_eq!(groups.len(), 2);
    assert!(groups.iter().all(|g| g.participant_ids.len() == 4));
    // 2 groups of 4 -> 6 matches each.
    assert_eq!(matches.len(), 12);
    for g in &groups {
        assert_eq!(matches.iter().filter(|m| m.group_id == Some(g.id)).count(), 6);
    }
    // Group assignment is written back to the roster.
    for p in store.participants(tid) {
        assert!(p.group_id.is_some());
    }
    assert_eq!(store.tournament(tid).unwrap().phase, Phase::GroupStage);
}

#[test]
fn serpentine_deal_spreads_the_seeds() {
    let (store, tid, ids) = tournament_with(TournamentFormat::GroupsThenKnockout, 8);
    let (groups, _) = generate_groups(&store, tid, 2).unwrap();
    // Seeds 1,4,5,8 in one group; 2,3,6,7 in the other.
    let group_a = groups
        .iter()
        .find(|g| g.participant_ids.contains(&ids[0]))
        .unwrap();
    for idx in [3, 4, 7] {
        assert!(group_a.participant_ids.contains(&ids[idx]));
    }
}

#[test]
fn groups_need_at_least_two_members_each() {
    let (store, tid, _) = tournament_with(TournamentFormat::GroupsThenKnockout, 3);
    assert!(matches!(
        generate_groups(&store, tid, 2),
        Err(TournamentError::InsufficientParticipants { required: 4, actual: 3 })
    ));
}

#[test]
fn second_group_generation_is_rejected() {
    let (store, tid, _) = tournament_with(TournamentFormat::GroupsThenKnockout, 8);
    generate_groups(&store, tid, 2).unwrap();
    assert!(matches!(
        generate_groups(&store, tid, 2),
        Err(TournamentError::AlreadyGenerated)
    ));
}
