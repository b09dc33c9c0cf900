//! Result reporting: tennis score validation, winner determination, and the
//! match/tournament state transitions that follow a result.

use crate::models::{
    MatchFormat, MatchId, MatchStatus, ParticipantId, Phase, SetScore, Side, Slot, TennisMatch,
    Tournament, TournamentError, TournamentFormat,
};
use crate::storage::TournamentStore;

/// Determine the winning side of a sequence of valid sets under the given
/// match format. The match is over as soon as one side has won
/// `sets_to_win` sets; extra sets after that point are rejected, and a
/// sequence where neither side got there has no winner (tennis has no draws).
pub fn decide_winner(format: MatchFormat, sets: &[SetScore]) -> Result<Side, TournamentError> {
    let needed = format.sets_to_win();
    let mut home = 0usize;
    let mut away = 0usize;

    for (i, set) in sets.iter().enumerate() {
        if home >= needed || away >= needed {
            return Err(TournamentError::InvalidScore(format!(
                "set {} recorded after the match was already decided",
                i + 1
            )));
        }
        match set.winner() {
            Side::Home => home += 1,
            Side::Away => away += 1,
        }
    }

    if home >= needed {
        Ok(Side::Home)
    } else if away >= needed {
        Ok(Side::Away)
    } else {
        Err(TournamentError::NoWinnerInTennis)
    }
}

/// Report the result of a match.
///
/// With one or more sets the winner is derived from the scores; an explicit
/// `winner_id` may accompany them but must agree with the derived winner.
/// With zero sets an explicit `winner_id` records a walkover (forfeit); zero
/// sets and no winner is a completion without a winner and is rejected.
///
/// Completing a match writes the winner into the linked next-round slot (for
/// knockout schedules) and, when this was the last open match of the
/// tournament, moves the tournament to its terminal phase.
pub fn report_match_result(
    store: &dyn TournamentStore,
    match_id: MatchId,
    sets: Vec<SetScore>,
    winner_id: Option<ParticipantId>,
) -> Result<TennisMatch, TournamentError> {
    let mut m = store
        .match_by_id(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.is_finished() {
        return Err(TournamentError::MatchAlreadyCompleted);
    }

    let home = m.player(Side::Home).ok_or_else(|| {
        TournamentError::InvalidScore("home opponent is not decided yet".into())
    })?;
    let away = m.player(Side::Away).ok_or_else(|| {
        TournamentError::InvalidScore("away opponent is not decided yet".into())
    })?;

    let tournament = store
        .tournament(m.tournament_id)
        .ok_or(TournamentError::TournamentNotFound(m.tournament_id))?;

    if sets.is_empty() {
        // Walkover path: designated winner, no set validation.
        let winner = winner_id.ok_or(TournamentError::NoWinnerInTennis)?;
        if winner != home && winner != away {
            return Err(TournamentError::InvalidScore(
                "winner is not one of the match participants".into(),
            ));
        }
        m.winner = Some(winner);
        m.status = MatchStatus::Walkover;
        log::debug!("match {} decided by walkover for {}", m.id, winner);
    } else {
        let side = decide_winner(tournament.match_format, &sets)?;
        let derived = match side {
            Side::Home => home,
            Side::Away => away,
        };
        if let Some(claimed) = winner_id {
            if claimed != derived {
                return Err(TournamentError::InvalidScore(
                    "reported winner does not match the set scores".into(),
                ));
            }
        }
        m.sets = sets;
        m.winner = Some(derived);
        m.status = MatchStatus::Completed;
        log::debug!("match {} completed, winner {}", m.id, derived);
    }

    store.update_match(m.clone());
    propagate_winner(store, &m);
    finalize_tournament(store, &tournament, &m);

    Ok(m)
}

/// Write the winner of a finished match into the placeholder slot of the match
/// it feeds. The only cross-match mutation in the whole engine.
pub(crate) fn propagate_winner(store: &dyn TournamentStore, finished: &TennisMatch) {
    let (next_id, side) = match finished.next_match {
        Some(link) => link,
        None => return,
    };
    let winner = match finished.winner {
        Some(w) => w,
        None => return,
    };
    let mut next = match store.match_by_id(next_id) {
        Some(m) => m,
        None => return,
    };
    match side {
        Side::Home => next.home = Slot::Player(winner),
        Side::Away => next.away = Slot::Player(winner),
    }
    store.update_match(next);
}

/// Explicit terminal transition: the final of a knockout, or the last result
/// of a round-robin championship, completes the tournament.
fn finalize_tournament(store: &dyn TournamentStore, tournament: &Tournament, finished: &TennisMatch) {
    let done = match tournament.format {
        TournamentFormat::SingleElimination | TournamentFormat::GroupsThenKnockout => {
            tournament.phase == Phase::Knockout
                && finished.group_id.is_none()
                && finished.next_match.is_none()
        }
        TournamentFormat::RoundRobin => {
            tournament.phase == Phase::GroupStage
                && store
                    .matches(tournament.id)
                    .iter()
                    .all(|m| m.is_finished())
        }
    };
    if done && store.try_advance_phase(tournament.id, tournament.phase, Phase::Completed) {
        log::info!("tournament {} completed", tournament.id);
    }
}
