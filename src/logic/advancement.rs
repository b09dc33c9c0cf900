//! Group stage to knockout: select qualifiers from the group tables, seed them
//! across groups, and hand them to the bracket generator.

use crate::logic::bracket::build_knockout;
use crate::logic::standings::group_standings;
use crate::models::{
    ParticipantId, Phase, TennisMatch, TournamentError, TournamentFormat, TournamentId,
};
use crate::storage::TournamentStore;

/// A group-stage qualifier carrying its seeding hints.
#[derive(Clone, Copy, Debug)]
struct Qualifier {
    id: ParticipantId,
    /// In-group finishing position, 0 = group winner.
    rank: usize,
    /// Index of the originating group.
    group: usize,
}

/// Transition a `GroupsThenKnockout` tournament from its group stage into the
/// knockout phase.
///
/// Requires every group match to be finished. Takes the top
/// `qualifiers_per_group` of each group's standings, orders them rank-major
/// (all group winners first, then all runners-up, ...), nudges the order so no
/// first-round pairing is a same-group rematch where another equal-rank
/// qualifier can take the slot, and generates the bracket. The phase guard
/// makes this a one-time transition.
pub fn advance_from_groups(
    store: &dyn TournamentStore,
    tournament_id: TournamentId,
) -> Result<Vec<TennisMatch>, TournamentError> {
    let tournament = store
        .tournament(tournament_id)
        .ok_or(TournamentError::TournamentNotFound(tournament_id))?;
    if tournament.format != TournamentFormat::GroupsThenKnockout {
        return Err(TournamentError::InvalidTournamentType);
    }
    match tournament.phase {
        Phase::GroupStage => {}
        Phase::Enrollment => return Err(TournamentError::GroupStageIncomplete),
        Phase::Knockout | Phase::Completed => return Err(TournamentError::AlreadyGenerated),
    }

    let mut groups = store.groups(tournament_id);
    groups.sort_by(|a, b| a.name.cmp(&b.name));

    let group_matches: Vec<_> = store
        .matches(tournament_id)
        .into_iter()
        .filter(|m| m.group_id.is_some())
        .collect();
    if group_matches.is_empty() || group_matches.iter().any(|m| !m.is_finished()) {
        return Err(TournamentError::GroupStageIncomplete);
    }

    let per_group = tournament.group_config().qualifiers_per_group.max(1);
    let mut tiers: Vec<Vec<Qualifier>> = vec![Vec::new(); per_group];
    for (g, group) in groups.iter().enumerate() {
        let table = group_standings(store, tournament_id, group.id)?;
        for (rank, row) in table.into_iter().take(per_group).enumerate() {
            tiers[rank].push(Qualifier {
                id: row.participant_id,
                rank,
                group: g,
            });
        }
    }
    let mut order: Vec<Qualifier> = tiers.into_iter().flatten().collect();
    if order.len() < 2 {
        return Err(TournamentError::InsufficientParticipants {
            required: 2,
            actual: order.len(),
        });
    }
    avoid_same_group_pairings(&mut order);

    let entrants: Vec<ParticipantId> = order.iter().map(|q| q.id).collect();
    let matches = build_knockout(tournament_id, &entrants);

    if !store.try_advance_phase(tournament_id, Phase::GroupStage, Phase::Knockout) {
        return Err(TournamentError::AlreadyGenerated);
    }
    store.insert_matches(matches.clone());
    log::info!(
        "advanced tournament {} to knockout: {} qualifiers from {} groups",
        tournament_id,
        entrants.len(),
        groups.len()
    );
    Ok(matches)
}

/// First-round opponents are the complementary seeds (seed s meets seed
/// P+1-s). Where such a pairing would rematch a group, swap the lower seed
/// with another qualifier of the same rank whose move breaks the rematch
/// without creating a new one. When no such swap exists the pairing stands.
fn avoid_same_group_pairings(order: &mut [Qualifier]) {
    let p = order.len().next_power_of_two();
    for i in 0..order.len() {
        let j = p - 1 - i;
        if j >= order.len() || j <= i {
            continue;
        }
        if order[i].group != order[j].group {
            continue;
        }
        for k in 0..order.len() {
            if k == j || k == i || order[k].rank != order[j].rank {
                continue;
            }
            let partner = p - 1 - k;
            let breaks_here = order[k].group != order[i].group;
            let safe_there = partner >= order.len()
                || partner == i
                || order[partner].group != order[j].group;
            if breaks_here && safe_there {
                order.swap(j, k);
                break;
            }
        }
    }
}
