//! Standings: aggregate finished matches into a ranked table with
//! deterministic tiebreaks.

use std::collections::HashMap;

use crate::models::{
    GroupId, MatchStatus, Participant, ParticipantId, Side, StandingRow, TennisMatch,
    TournamentError, TournamentId,
};
use crate::storage::TournamentStore;

/// Standings for a whole tournament.
pub fn tournament_standings(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<StandingRow>, TournamentError> {
    store
        .tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    let participants = store.participants(tournament_id);
    let matches = store.matches(tournament_id);
    Ok(compute_standings(&participants, &matches))
}

/// Standings for one group: scoped to the group's participants and matches.
pub fn group_standings(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
    group_id: GroupId,
) -> Result<Vec<StandingRow>, TournamentError> {
    let group = store
        .group(group_id)
        .ok_or(TournamentError::GroupNotFound(group_id))?;
    let participants: Vec<Participant> = store
        .participants(tournament_id)
        .into_iter()
        .filter(|p| group.participant_ids.contains(&p.id))
        .collect();
    let matches: Vec<TennisMatch> = store
        .matches(tournament_id)
        .into_iter()
        .filter(|m| m.group_id == Some(group_id))
        .collect();
    Ok(compute_standings(&participants, &matches))
}

/// Pure aggregation + ranking over a set of matches.
///
/// Rank order: matches won descending, then — among participants tied on
/// wins — head-to-head when exactly two are tied and have met, then set
/// difference, then game difference, then participant id. The result is a
/// total order: the same input always produces the same table.
pub fn compute_standings(
    participants: &[Participant],
    matches: &[TennisMatch],
) -> Vec<StandingRow> {
    let mut rows: HashMap<ParticipantId, StandingRow> = participants
        .iter()
        .map(|p| (p.id, StandingRow::new(p.id, p.name.clone())))
        .collect();

    for m in matches {
        if !m.is_finished() {
            continue;
        }
        let winner = match m.winner {
            Some(w) => w,
            None => continue,
        };
        let home = m.player(Side::Home);
        let away = m.player(Side::Away);
        let loser = match (home, away) {
            (Some(h), _) if h != winner => home,
            (_, Some(a)) if a != winner => away,
            _ => None,
        };

        if let Some(row) = rows.get_mut(&winner) {
            row.played += 1;
            row.won += 1;
        }
        // A bye walkover has no loser to debit.
        if let Some(l) = loser {
            if let Some(row) = rows.get_mut(&l) {
                row.played += 1;
                row.lost += 1;
            }
        }

        // Walkovers carry no set or game counts.
        if m.status != MatchStatus::Completed {
            continue;
        }
        let (home_id, away_id) = match (home, away) {
            (Some(h), Some(a)) => (h, a),
            _ => continue,
        };
        for set in &m.sets {
            let (home_sets, away_sets) = match set.winner() {
                Side::Home => (1, 0),
                Side::Away => (0, 1),
            };
            if let Some(row) = rows.get_mut(&home_id) {
                row.sets_won += home_sets;
                row.sets_lost += away_sets;
                row.games_won += set.home_games;
                row.games_lost += set.away_games;
            }
            if let Some(row) = rows.get_mut(&away_id) {
                row.sets_won += away_sets;
                row.sets_lost += home_sets;
                row.games_won += set.away_games;
                row.games_lost += set.home_games;
            }
        }
    }

    let mut table: Vec<StandingRow> = rows.into_values().collect();
    // Primary key plus a deterministic base order before tiebreak passes.
    table.sort_by(|a, b| {
        b.won
            .cmp(&a.won)
            .then_with(|| a.participant_id.cmp(&b.participant_id))
    });

    apply_tiebreaks(&mut table, matches);

    for (i, row) in table.iter_mut().enumerate() {
        row.rank = i as u32 + 1;
    }
    table
}

/// Reorder each run of win-tied rows: set difference, game difference, id —
/// and for a two-way tie, the head-to-head result overrides everything.
fn apply_tiebreaks(table: &mut [StandingRow], matches: &[TennisMatch]) {
    let mut start = 0;
    while start < table.len() {
        let mut end = start + 1;
        while end < table.len() && table[end].won == table[start].won {
            end += 1;
        }

        let tied = &mut table[start..end];
        tied.sort_by(|a, b| {
            b.set_difference()
                .cmp(&a.set_difference())
                .then_with(|| b.game_difference().cmp(&a.game_difference()))
                .then_with(|| a.participant_id.cmp(&b.participant_id))
        });
        if tied.len() == 2 {
            if let Some(winner) =
                head_to_head(matches, tied[0].participant_id, tied[1].participant_id)
            {
                if winner == tied[1].participant_id {
                    tied.swap(0, 1);
                }
            }
        }

        start = end;
    }
}

/// Winner of the finished match between `a` and `b`, if they have played.
fn head_to_head(
    matches: &[TennisMatch],
    a: ParticipantId,
    b: ParticipantId,
) -> Option<ParticipantId> {
    matches.iter().find_map(|m| {
        if !m.is_finished() {
            return None;
        }
        let home = m.player(Side::Home)?;
        let away = m.player(Side::Away)?;
        if (home == a && away == b) || (home == b && away == a) {
            m.winner
        } else {
            None
        }
    })
}
