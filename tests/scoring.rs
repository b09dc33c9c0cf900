//! Integration tests for scoring: set validation, winner determination,
//! result reporting and the transitions that follow.

use tennis_tournament_web::{
    generate_bracket, report_match_result, MatchFormat, MatchStatus, MemoryStore, Participant,
    ParticipantId, Phase, SetScore, TiebreakScore, Tournament, TournamentError, TournamentFormat,
    TournamentId, TournamentStore,
};
use uuid::Uuid;

fn single_elim(n: usize) -> (MemoryStore, TournamentId, Vec<ParticipantId>) {
    let store = MemoryStore::new();
    let t = Tournament::new(
        "Torneo Test",
        TournamentFormat::SingleElimination,
        MatchFormat::BestOf3,
        32,
    );
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

fn set(home: u32, away: u32) -> SetScore {
    SetScore::new(1, home, away, None).unwrap()
}

#[test]
fn regular_set_scores_are_accepted() {
    assert!(SetScore::new(1, 6, 0, None).is_ok());
    assert!(SetScore::new(1, 6, 4, None).is_ok());
    assert!(SetScore::new(1, 7, 5, None).is_ok());
    assert!(SetScore::new(1, 5, 7, None).is_ok());
}

#[test]
fn unfinished_or_impossible_sets_are_rejected() {
    for (h, a) in [(6, 5), (5, 4), (8, 6), (6, 6), (7, 4), (9, 7)] {
        assert!(
            matches!(SetScore::new(1, h, a, None), Err(TournamentError::InvalidScore(_))),
            "{}-{} should be invalid",
            h,
            a
        );
    }
}

#[test]
fn seven_six_requires_a_tiebreak() {
    assert!(matches!(
        SetScore::new(1, 7, 6, None),
        Err(TournamentError::InvalidScore(_))
    ));
    let tb = TiebreakScore {
        home_points: 7,
        away_points: 3,
    };
    assert!(SetScore::new(1, 7, 6, Some(tb)).is_ok());
}

#[test]
fn tiebreak_rules_are_enforced() {
    // Not enough points / lead.
    let short = TiebreakScore {
        home_points: 7,
        away_points: 6,
    };
    assert!(matches!(
        SetScore::new(1, 7, 6, Some(short)),
        Err(TournamentError::InvalidScore(_))
    ));
    // Extended tiebreak is fine.
    let extended = TiebreakScore {
        home_points: 10,
        away_points: 8,
    };
    assert!(SetScore::new(1, 7, 6, Some(extended)).is_ok());
    // Tiebreak winner must be the 7-game side.
    let wrong_side = TiebreakScore {
        home_points: 3,
        away_points: 7,
    };
    assert!(matches!(
        SetScore::new(1, 7, 6, Some(wrong_side)),
        Err(TournamentError::InvalidScore(_))
    ));
    // No tiebreak allowed outside 7-6.
    let stray = TiebreakScore {
        home_points: 7,
        away_points: 2,
    };
    assert!(matches!(
        SetScore::new(1, 6, 4, Some(stray)),
        Err(TournamentError::InvalidScore(_))
    ));
}

#[test]
fn best_of_three_completes_after_two_straight_sets() {
    let (store, tid, ids) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let m = report_match_result(&store, matches[0].id, vec![set(6, 4), set(6, 3)], None).unwrap();
    assert_eq!(m.status, MatchStatus::Completed);
    assert_eq!(m.sets.len(), 2);
    assert_eq!(m.winner, Some(ids[0]));
}

#[test]
fn extra_set_after_the_match_is_decided_is_rejected() {
    let (store, tid, _) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let result = report_match_result(
        &store,
        matches[0].id,
        vec![set(6, 4), set(6, 3), set(6, 2)],
        None,
    );
    assert!(matches!(result, Err(TournamentError::InvalidScore(_))));
}

#[test]
fn split_sets_have_no_winner() {
    let (store, tid, _) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let result = report_match_result(&store, matches[0].id, vec![set(6, 4), set(3, 6)], None);
    assert!(matches!(result, Err(TournamentError::NoWinnerInTennis)));
}

#[test]
fn completion_without_sets_or_winner_is_rejected() {
    let (store, tid, _) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let result = report_match_result(&store, matches[0].id, vec![], None);
    assert!(matches!(result, Err(TournamentError::NoWinnerInTennis)));
}

#[test]
fn walkover_completes_without_sets() {
    let (store, tid, ids) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let m = report_match_result(&store, matches[0].id, vec![], Some(ids[1])).unwrap();
    assert_eq!(m.status, MatchStatus::Walkover);
    assert_eq!(m.winner, Some(ids[1]));
    assert!(m.sets.is_empty());
}

#[test]
fn claimed_winner_must_match_the_scores() {
    let (store, tid, ids) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    let result = report_match_result(
        &store,
        matches[0].id,
        vec![set(6, 4), set(6, 3)],
        Some(ids[1]),
    );
    assert!(matches!(result, Err(TournamentError::InvalidScore(_))));
}

#[test]
fn unknown_match_is_not_found() {
    let (store, tid, _) = single_elim(2);
    generate_bracket(&store, tid).unwrap();
    let bogus = Uuid::new_v4();
    assert!(matches!(
        report_match_result(&store, bogus, vec![], None),
        Err(TournamentError::MatchNotFound(_))
    ));
}

#[test]
fn finished_match_cannot_be_scored_again() {
    let (store, tid, ids) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    report_match_result(&store, matches[0].id, vec![], Some(ids[0])).unwrap();
    let result = report_match_result(&store, matches[0].id, vec![set(6, 4), set(6, 3)], None);
    assert!(matches!(result, Err(TournamentError::MatchAlreadyCompleted)));
}

#[test]
fn winning_the_final_completes_the_tournament() {
    let (store, tid, _) = single_elim(2);
    let matches = generate_bracket(&store, tid).unwrap();
    report_match_result(&store, matches[0].id, vec![set(6, 4), set(6, 3)], None).unwrap();
    assert_eq!(store.tournament(tid).unwrap().phase, Phase::Completed);
}
