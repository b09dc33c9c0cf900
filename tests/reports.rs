//! Integration tests for the cross-tournament player report.

use tennis_tournament_web::{
    generate_bracket, generate_championship, player_report, report_match_result, MatchFormat,
    MemoryStore, Participant, Phase, SetScore, Side, Tournament, TournamentFormat, TournamentId,
    TournamentStore,
};

fn knockout_with(store: &MemoryStore, names: &[&str]) -> TournamentId {
    let t = Tournament::new(
        "Open",
        TournamentFormat::SingleElimination,
        MatchFormat::BestOf3,
        32,
    );
    let tid = t.id;
    store.insert_tournament(t);
    for (i, name) in names.iter().enumerate() {
        store.insert_participant(Participant::new(tid, *name, Some(i as u32 + 1)));
    }
    tid
}

fn straight_sets() -> Vec<SetScore> {
    vec![
        SetScore::new(1, 6, 2, None).unwrap(),
        SetScore::new(2, 6, 3, None).unwrap(),
    ]
}

#[test]
fn empty_platform_reports_nothing() {
    let store = MemoryStore::new();
    let report = player_report(&store);
    assert_eq!(report.overview.total_tournaments, 0);
    assert_eq!(report.overview.total_matches, 0);
    assert!(report.player_rankings.is_empty());
}

#[test]
fn champion_and_win_rates_from_a_finished_knockout() {
    let store = MemoryStore::new();
    let tid = knockout_with(&store, &["Anna", "Bea"]);
    let matches = generate_bracket(&store, tid).unwrap();
    report_match_result(&store, matches[0].id, straight_sets(), None).unwrap();
    assert_eq!(store.tournament(tid).unwrap().phase, Phase::Completed);

    let report = player_report(&store);
    assert_eq!(report.overview.total_tournaments, 1);
    assert_eq!(report.overview.completed_tournaments, 1);
    assert_eq!(report.overview.completed_matches, 1);

    let anna = report
        .player_rankings
        .iter()
        .find(|r| r.player_name == "Anna")
        .unwrap();
    assert_eq!(anna.tournaments_won, 1);
    assert_eq!((anna.matches_won, anna.matches_lost), (1, 0));
    assert_eq!(anna.win_rate, 100.0);

    let bea = report
        .player_rankings
        .iter()
        .find(|r| r.player_name == "Bea")
        .unwrap();
    assert_eq!(bea.tournaments_won, 0);
    assert_eq!(bea.win_rate, 0.0);
    // Winner ranks above loser.
    assert_eq!(report.player_rankings[0].player_name, "Anna");
}

#[test]
fn players_aggregate_across_tournaments_by_name() {
    let store = MemoryStore::new();
    for _ in 0..2 {
        let tid = knockout_with(&store, &["Anna", "Bea"]);
        let matches = generate_bracket(&store, tid).unwrap();
        report_match_result(&store, matches[0].id, straight_sets(), None).unwrap();
    }
    let report = player_report(&store);
    let anna = report
        .player_rankings
        .iter()
        .find(|r| r.player_name == "Anna")
        .unwrap();
    assert_eq!(anna.tournaments_played, 2);
    assert_eq!(anna.tournaments_won, 2);
    assert_eq!(anna.matches_won, 2);
}

#[test]
fn round_robin_champion_is_the_table_leader() {
    let store = MemoryStore::new();
    let t = Tournament::new(
        "Campionato",
        TournamentFormat::RoundRobin,
        MatchFormat::BestOf3,
        16,
    );
    let tid = t.id;
    store.insert_tournament(t);
    for name in ["Anna", "Bea", "Carla"] {
        store.insert_participant(Participant::new(tid, name, None));
    }
    let matches = generate_championship(&store, tid).unwrap();
    for m in &matches {
        let home = m.player(Side::Home).unwrap();
        report_match_result(&store, m.id, vec![], Some(home)).unwrap();
    }
    assert_eq!(store.tournament(tid).unwrap().phase, Phase::Completed);

    let report = player_report(&store);
    let champions: u32 = report.player_rankings.iter().map(|r| r.tournaments_won).sum();
    assert_eq!(champions, 1);
}

#[test]
fn win_rate_stays_within_bounds() {
    let store = MemoryStore::new();
    let tid = knockout_with(&store, &["Anna", "Bea", "Carla", "Dora"]);
    let matches = generate_bracket(&store, tid).unwrap();
    // Play only round one; the tournament stays open.
    for m in matches.iter().filter(|m| m.round == 1) {
        report_match_result(&store, m.id, straight_sets(), None).unwrap();
    }
    let report = player_report(&store);
    assert_eq!(report.player_rankings.len(), 4);
    for row in &report.player_rankings {
        assert!((0.0..=100.0).contains(&row.win_rate), "{}", row.player_name);
        assert_eq!(row.tournaments_won, 0);
    }
}
