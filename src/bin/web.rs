//! Single binary JSON API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default; override with env: HOST, PORT.
//!
//! The enrollment endpoints (create tournament, enroll participant) stand in
//! for the surrounding booking platform that normally supplies rosters.

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use tennis_tournament_web::{
    advance_from_groups, generate_bracket, generate_championship, generate_groups,
    group_standings, player_report, report_match_result, tournament_standings, GroupConfig,
    GroupId, MatchFormat, MatchId, MemoryStore, Participant, SetScore, TiebreakScore, Tournament,
    TournamentError, TournamentFormat, TournamentId, TournamentStore,
};

type AppState = Data<MemoryStore>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    format: TournamentFormat,
    #[serde(default)]
    match_format: MatchFormat,
    #[serde(default = "default_capacity")]
    capacity: usize,
    num_groups: Option<usize>,
    qualifiers_per_group: Option<usize>,
}

fn default_capacity() -> usize {
    32
}

#[derive(Deserialize)]
struct EnrollBody {
    name: String,
    seed: Option<u32>,
}

#[derive(Deserialize)]
struct GroupsBody {
    num_groups: usize,
}

#[derive(Deserialize)]
struct TiebreakBody {
    home_points: u32,
    away_points: u32,
}

#[derive(Deserialize)]
struct SetBody {
    home_games: u32,
    away_games: u32,
    tiebreak: Option<TiebreakBody>,
}

#[derive(Deserialize)]
struct ResultBody {
    #[serde(default)]
    sets: Vec<SetBody>,
    winner_id: Option<uuid::Uuid>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and group id.
#[derive(Deserialize)]
struct TournamentGroupPath {
    id: TournamentId,
    group_id: GroupId,
}

#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Map a domain error to an HTTP response with a JSON error body.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::MatchNotFound(_)
        | TournamentError::TournamentNotFound(_)
        | TournamentError::GroupNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::AlreadyGenerated | TournamentError::MatchAlreadyCompleted => {
            HttpResponse::Conflict().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-tournament-web",
    })
}

/// Create a tournament (enrollment phase; client stores the id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let mut tournament = Tournament::new(
        body.name.trim(),
        body.format,
        body.match_format,
        body.capacity,
    );
    if body.format == TournamentFormat::GroupsThenKnockout {
        let defaults = GroupConfig::default();
        tournament.group_config = Some(GroupConfig {
            num_groups: body.num_groups.unwrap_or(defaults.num_groups),
            qualifiers_per_group: body
                .qualifiers_per_group
                .unwrap_or(defaults.qualifiers_per_group),
        });
    }
    state.insert_tournament(tournament.clone());
    HttpResponse::Ok().json(tournament)
}

/// Get a tournament with its roster, groups and matches.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.tournament(path.id) {
        Some(tournament) => HttpResponse::Ok().json(serde_json::json!({
            "tournament": tournament,
            "participants": state.participants(path.id),
            "groups": state.groups(path.id),
            "matches": state.matches(path.id),
        })),
        None => error_response(&TournamentError::TournamentNotFound(path.id)),
    }
}

/// Enroll a participant (optional seed rank).
#[post("/api/tournaments/{id}/participants")]
async fn api_enroll_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<EnrollBody>,
) -> HttpResponse {
    let tournament = match state.tournament(path.id) {
        Some(t) => t,
        None => return error_response(&TournamentError::TournamentNotFound(path.id)),
    };
    let roster = state.participants(tournament.id);
    if roster.len() >= tournament.capacity {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament is full" }));
    }
    if body
        .seed
        .is_some_and(|s| roster.iter().any(|p| p.seed == Some(s)))
    {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Seed already taken" }));
    }
    let participant = Participant::new(tournament.id, body.name.trim(), body.seed);
    state.insert_participant(participant.clone());
    HttpResponse::Ok().json(participant)
}

/// Generate the single-elimination bracket.
#[post("/api/tournaments/{id}/bracket")]
async fn api_generate_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match generate_bracket(state.get_ref(), path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Split the roster into groups and generate each group's round-robin.
#[post("/api/tournaments/{id}/groups")]
async fn api_generate_groups(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<GroupsBody>,
) -> HttpResponse {
    match generate_groups(state.get_ref(), path.id, body.num_groups) {
        Ok((groups, matches)) => HttpResponse::Ok().json(serde_json::json!({
            "groups": groups,
            "matches": matches,
        })),
        Err(e) => error_response(&e),
    }
}

/// Generate the all-play-all championship schedule.
#[post("/api/tournaments/{id}/championship")]
async fn api_generate_championship(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match generate_championship(state.get_ref(), path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Advance a group-stage tournament into its knockout phase.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match advance_from_groups(state.get_ref(), path.id) {
        Ok(matches) => HttpResponse::Ok().json(matches),
        Err(e) => error_response(&e),
    }
}

/// Report a match result: sets (validated as tennis scores) or a walkover.
#[put("/api/matches/{id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let mut sets = Vec::with_capacity(body.sets.len());
    for (i, s) in body.sets.iter().enumerate() {
        let tiebreak = s.tiebreak.as_ref().map(|tb| TiebreakScore {
            home_points: tb.home_points,
            away_points: tb.away_points,
        });
        match SetScore::new(i as u32 + 1, s.home_games, s.away_games, tiebreak) {
            Ok(set) => sets.push(set),
            Err(e) => return error_response(&e),
        }
    }
    match report_match_result(state.get_ref(), path.id, sets, body.winner_id) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(&e),
    }
}

/// Standings for the whole tournament.
#[get("/api/tournaments/{id}/standings")]
async fn api_tournament_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match tournament_standings(state.get_ref(), path.id) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => error_response(&e),
    }
}

/// Standings for one group.
#[get("/api/tournaments/{id}/groups/{group_id}/standings")]
async fn api_group_standings(state: AppState, path: Path<TournamentGroupPath>) -> HttpResponse {
    match group_standings(state.get_ref(), path.id, path.group_id) {
        Ok(table) => HttpResponse::Ok().json(table),
        Err(e) => error_response(&e),
    }
}

/// Cross-tournament player statistics.
#[get("/api/reports/players")]
async fn api_player_report(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(player_report(state.get_ref()))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(MemoryStore::new());

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_enroll_participant)
            .service(api_generate_bracket)
            .service(api_generate_groups)
            .service(api_generate_championship)
            .service(api_advance)
            .service(api_report_result)
            .service(api_tournament_standings)
            .service(api_group_standings)
            .service(api_player_report)
    })
    .bind(bind)?
    .run()
    .await
}
