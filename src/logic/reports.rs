//! Cross-tournament player statistics, rolled up from the per-tournament
//! standings aggregation. Read-only.

use std::collections::HashMap;

use crate::logic::standings::compute_standings;
use crate::models::{
    Phase, PlayerRankingRow, PlayerReport, ReportOverview, StandingRow, TennisMatch, Tournament,
    TournamentFormat,
};
use crate::storage::TournamentStore;

/// Build the platform-wide player report: per-player totals across every
/// tournament they entered, plus championship counts and an overview.
/// Players are keyed by roster name, since each tournament has its own
/// participant rows.
pub fn player_report(store: &dyn TournamentStore) -> PlayerReport {
    let tournaments = store.tournaments();
    let mut overview = ReportOverview {
        total_tournaments: tournaments.len() as u32,
        ..ReportOverview::default()
    };
    let mut totals: HashMap<String, PlayerRankingRow> = HashMap::new();

    for tournament in &tournaments {
        if tournament.phase == Phase::Completed {
            overview.completed_tournaments += 1;
        }
        let participants = store.participants(tournament.id);
        let matches = store.matches(tournament.id);
        overview.total_matches += matches.len() as u32;
        overview.completed_matches += matches.iter().filter(|m| m.is_finished()).count() as u32;

        let table = compute_standings(&participants, &matches);
        let champion = champion_of(tournament, &matches, &table);

        for row in table {
            let entry = totals
                .entry(row.name.clone())
                .or_insert_with(|| PlayerRankingRow {
                    player_name: row.name.clone(),
                    tournaments_played: 0,
                    tournaments_won: 0,
                    matches_won: 0,
                    matches_lost: 0,
                    sets_won: 0,
                    sets_lost: 0,
                    games_won: 0,
                    games_lost: 0,
                    win_rate: 0.0,
                });
            entry.tournaments_played += 1;
            entry.matches_won += row.won;
            entry.matches_lost += row.lost;
            entry.sets_won += row.sets_won;
            entry.sets_lost += row.sets_lost;
            entry.games_won += row.games_won;
            entry.games_lost += row.games_lost;
            if champion.as_deref() == Some(row.name.as_str()) {
                entry.tournaments_won += 1;
            }
        }
    }

    let mut player_rankings: Vec<PlayerRankingRow> = totals.into_values().collect();
    for row in &mut player_rankings {
        let finished = row.matches_won + row.matches_lost;
        row.win_rate = if finished == 0 {
            0.0
        } else {
            row.matches_won as f64 * 100.0 / finished as f64
        };
    }
    player_rankings.sort_by(|a, b| {
        b.matches_won
            .cmp(&a.matches_won)
            .then_with(|| {
                b.win_rate
                    .partial_cmp(&a.win_rate)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.player_name.cmp(&b.player_name))
    });

    PlayerReport {
        overview,
        player_rankings,
    }
}

/// Name of the tournament champion, when decided: winner of the knockout
/// final, or the table leader of a completed round-robin championship.
fn champion_of(
    tournament: &Tournament,
    matches: &[TennisMatch],
    table: &[StandingRow],
) -> Option<String> {
    if tournament.phase != Phase::Completed {
        return None;
    }
    match tournament.format {
        TournamentFormat::SingleElimination | TournamentFormat::GroupsThenKnockout => {
            let final_match = matches
                .iter()
                .find(|m| m.group_id.is_none() && m.next_match.is_none())?;
            let winner = final_match.winner?;
            table
                .iter()
                .find(|r| r.participant_id == winner)
                .map(|r| r.name.clone())
        }
        TournamentFormat::RoundRobin => table.first().map(|r| r.name.clone()),
    }
}
