//! Tournament engine logic: scheduling, scoring, standings, advancement,
//! reporting.

mod advancement;
mod bracket;
mod reports;
mod round_robin;
mod scoring;
mod standings;

pub use advancement::advance_from_groups;
pub use bracket::generate_bracket;
pub use reports::player_report;
pub use round_robin::{generate_championship, generate_groups};
pub use scoring::{decide_winner, report_match_result};
pub use standings::{compute_standings, group_standings, tournament_standings};
