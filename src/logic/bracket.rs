//! Single-elimination bracket generation: snake seed placement, byes for the
//! top seeds, placeholder links between rounds.

use crate::models::{
    round_label, seed_order, MatchStatus, ParticipantId, Phase, Side, Slot, TennisMatch,
    TournamentError, TournamentFormat, TournamentId,
};
use crate::storage::TournamentStore;

/// Generate the knockout schedule for a `SingleElimination` tournament.
///
/// The roster is ordered by seed (unseeded participants follow, in enrollment
/// order), padded to a power of two with byes, and laid out so that seed 1
/// meets seed P in round one, seed 2 meets seed P-1, and so on recursively:
/// the top seeds cannot meet before the final. Exactly P-1 matches are
/// created. The phase guard makes generation a one-time operation.
pub fn generate_bracket(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<TennisMatch>, TournamentError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    if tournament.format != TournamentFormat::SingleElimination {
        return Err(TournamentError::InvalidTournamentType);
    }

    let mut roster = store.participants(tournament_id);
    if roster.len() < 2 {
        return Err(TournamentError::InsufficientParticipants {
            required: 2,
            actual: roster.len(),
        });
    }
    seed_order(&mut roster);
    let entrants: Vec<ParticipantId> = roster.iter().map(|p| p.id).collect();

    let matches = build_knockout(tournament_id, &entrants);

    // Guarded transition: only one caller creates the schedule.
    if !store.try_advance_phase(tournament_id, Phase::Enrollment, Phase::Knockout) {
        return Err(TournamentError::AlreadyGenerated);
    }
    store.insert_matches(matches.clone());
    log::info!(
        "generated bracket for tournament {}: {} entrants, {} matches",
        tournament_id,
        entrants.len(),
        matches.len()
    );
    Ok(matches)
}

/// Build a complete single-elimination schedule for an already seed-ordered
/// entrant list (strongest first). Shared by bracket generation and group
/// advancement.
pub(crate) fn build_knockout(
    tournament_id: TournamentId,
    entrants: &[ParticipantId],
) -> Vec<TennisMatch> {
    let p = entrants.len().next_power_of_two();
    let total_rounds = p.trailing_zeros();

    // Position i of the bracket holds the seed seeding_positions(p)[i]; seeds
    // beyond the entrant count are byes, which therefore land on the top seeds.
    let slots: Vec<Slot> = seeding_positions(p)
        .into_iter()
        .map(|seed| match entrants.get(seed - 1) {
            Some(&id) => Slot::Player(id),
            None => Slot::Bye,
        })
        .collect();

    let mut rounds: Vec<Vec<TennisMatch>> = Vec::with_capacity(total_rounds as usize);

    let first: Vec<TennisMatch> = slots
        .chunks(2)
        .map(|pair| {
            TennisMatch::new(
                tournament_id,
                1,
                round_label(p / 2, 1),
                pair[0],
                pair[1],
            )
        })
        .collect();
    rounds.push(first);

    for round in 2..=total_rounds {
        let matches_in_round = p >> round;
        let prev_start = rounds.len() - 1;
        let mut current = Vec::with_capacity(matches_in_round);
        for j in 0..matches_in_round {
            let feeder_home = rounds[prev_start][2 * j].id;
            let feeder_away = rounds[prev_start][2 * j + 1].id;
            let m = TennisMatch::new(
                tournament_id,
                round,
                round_label(matches_in_round, round),
                Slot::WinnerOf(feeder_home),
                Slot::WinnerOf(feeder_away),
            );
            rounds[prev_start][2 * j].next_match = Some((m.id, Side::Home));
            rounds[prev_start][2 * j + 1].next_match = Some((m.id, Side::Away));
            current.push(m);
        }
        rounds.push(current);
    }

    resolve_byes(&mut rounds);
    rounds.into_iter().flatten().collect()
}

/// A round-one match against a bye is never played: finalize it as a walkover
/// for the present side and write that participant into the next round's slot.
fn resolve_byes(rounds: &mut [Vec<TennisMatch>]) {
    let first_round = 0;
    for i in 0..rounds[first_round].len() {
        let winner = match (rounds[first_round][i].home, rounds[first_round][i].away) {
            (Slot::Player(id), Slot::Bye) | (Slot::Bye, Slot::Player(id)) => id,
            _ => continue,
        };
        rounds[first_round][i].winner = Some(winner);
        rounds[first_round][i].status = MatchStatus::Walkover;

        if let Some((next_id, side)) = rounds[first_round][i].next_match {
            for m in rounds.iter_mut().flatten() {
                if m.id == next_id {
                    match side {
                        Side::Home => m.home = Slot::Player(winner),
                        Side::Away => m.away = Slot::Player(winner),
                    }
                    break;
                }
            }
        }
    }
}

/// Seed numbers (1-based) in bracket position order for a field of `p`
/// (a power of two). Built by repeated halving: the field of size 2n pairs
/// each seed s of the size-n layout with its complement 2n+1-s, which keeps
/// seeds 1 and 2 in opposite halves at every depth.
fn seeding_positions(p: usize) -> Vec<usize> {
    let mut layout = vec![1usize];
    while layout.len() < p {
        let size = layout.len() * 2;
        let mut next = Vec::with_capacity(size);
        for &s in &layout {
            next.push(s);
            next.push(size + 1 - s);
        }
        layout = next;
    }
    layout
}
