use anyhow::{Context, Result};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use football_dashboard::charts::{self, Bar};
use football_dashboard::config::{league_name, Credentials, LEAGUES};
use football_dashboard::export::to_csv_string;
use football_dashboard::models::{
    MatchRow, OddsQuoteRow, OutcomeQuote, PlayerPerformance, PlayerRow, StandingRow, TeamRow,
};
use football_dashboard::nav::{NavEvent, NavState, Page};
use football_dashboard::normalize::matches::upcoming;
use football_dashboard::normalize::odds::quote_rows;
use football_dashboard::{
    load_league_tables, load_odds, load_performance, load_squad, DataHub, LeagueTables,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

// Custom filters for formatting
mod filters {
    pub fn price(value: &f64) -> ::askama::Result<String> {
        Ok(format!("{value:.2}"))
    }
}

type SharedHub = Arc<DataHub>;

/// Query parameters every page accepts; each handler folds them into a
/// fresh `NavState` so rendering never depends on server-side session
/// state.
#[derive(Debug, Default, Deserialize)]
struct NavQuery {
    league: Option<String>,
    team: Option<u64>,
    player: Option<String>,
    game: Option<usize>,
    bookmaker: Option<String>,
}

fn nav_state(page: Page, query: &NavQuery) -> NavState {
    let mut state = NavState::default().apply(NavEvent::GoTo(page));
    if let Some(league) = &query.league {
        state = state.apply(NavEvent::SelectLeague(league.clone()));
    }
    if let Some(team) = query.team {
        state = state.apply(NavEvent::SelectTeam(team));
    }
    state
}

struct LeagueOption {
    name: &'static str,
    code: &'static str,
    selected: bool,
}

struct TeamOption {
    id: u64,
    name: String,
    selected: bool,
}

struct NavLink {
    title: &'static str,
    href: String,
    active: bool,
}

/// Sidebar context shared by every page template.
struct NavContext {
    current_path: String,
    league_code: String,
    league_name: String,
    leagues: Vec<LeagueOption>,
    teams: Vec<TeamOption>,
    links: Vec<NavLink>,
    warnings: Vec<String>,
}

fn nav_context(state: &NavState, tables: &LeagueTables) -> NavContext {
    let query_suffix = match state.team_id {
        Some(id) => format!("league={}&team={id}", state.league),
        None => format!("league={}", state.league),
    };

    NavContext {
        current_path: state.page.path(),
        league_code: state.league.clone(),
        league_name: league_name(&state.league).unwrap_or("Unknown").to_string(),
        leagues: LEAGUES
            .iter()
            .map(|&(name, code)| LeagueOption {
                name,
                code,
                selected: code == state.league,
            })
            .collect(),
        teams: tables
            .teams
            .iter()
            .map(|t| TeamOption {
                id: t.id,
                name: t.name.clone(),
                selected: state.team_id == Some(t.id),
            })
            .collect(),
        links: Page::ALL
            .iter()
            .map(|page| NavLink {
                title: page.title(),
                href: format!("{}?{query_suffix}", page.path()),
                active: *page == state.page,
            })
            .collect(),
        warnings: tables.warnings.clone(),
    }
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    nav: NavContext,
    team_count: usize,
    match_count: usize,
}

#[derive(Template)]
#[template(path = "teams.html")]
struct TeamsTemplate {
    nav: NavContext,
    rows: Vec<TeamRow>,
    founded: Vec<Bar>,
}

#[derive(Template)]
#[template(path = "standings.html")]
struct StandingsTemplate {
    nav: NavContext,
    rows: Vec<StandingRow>,
    points: Vec<Bar>,
}

#[derive(Template)]
#[template(path = "matches.html")]
struct MatchesTemplate {
    nav: NavContext,
    rows: Vec<MatchRow>,
    goals: Vec<Bar>,
}

#[derive(Template)]
#[template(path = "players.html")]
struct PlayersTemplate {
    nav: NavContext,
    team_id: u64,
    team_name: String,
    rows: Vec<PlayerRow>,
    positions: Vec<Bar>,
    ages: Vec<Bar>,
    nationalities: Vec<Bar>,
}

struct PlayerOption {
    name: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "performance.html")]
struct PerformanceTemplate {
    nav: NavContext,
    team_id: u64,
    team_name: String,
    players: Vec<PlayerOption>,
    performance: Option<PlayerPerformance>,
    ambiguity_note: String,
}

#[derive(Template)]
#[template(path = "upcoming.html")]
struct UpcomingTemplate {
    nav: NavContext,
    rows: Vec<MatchRow>,
    dates: Vec<Bar>,
}

struct GameOption {
    index: usize,
    label: String,
    selected: bool,
}

struct BookmakerOption {
    title: String,
    selected: bool,
}

#[derive(Template)]
#[template(path = "odds.html")]
struct OddsTemplate {
    nav: NavContext,
    games: Vec<GameOption>,
    bookmakers: Vec<BookmakerOption>,
    game_label: String,
    outcomes: Vec<OutcomeQuote>,
    outcome_bars: Vec<Bar>,
    price_hist: Vec<Bar>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

async fn home(State(hub): State<SharedHub>, Query(query): Query<NavQuery>) -> impl IntoResponse {
    let state = nav_state(Page::Home, &query);
    let tables = load_league_tables(&hub, &state.league).await;

    HtmlTemplate(HomeTemplate {
        team_count: tables.teams.len(),
        match_count: tables.matches.len(),
        nav: nav_context(&state, &tables),
    })
}

async fn teams(State(hub): State<SharedHub>, Query(query): Query<NavQuery>) -> impl IntoResponse {
    let state = nav_state(Page::TeamData, &query);
    let tables = load_league_tables(&hub, &state.league).await;

    let founded: Vec<f64> = tables
        .teams
        .iter()
        .filter_map(|t| t.founded.map(f64::from))
        .collect();

    HtmlTemplate(TeamsTemplate {
        founded: charts::histogram(&founded, 20),
        rows: tables.teams.clone(),
        nav: nav_context(&state, &tables),
    })
}

async fn standings(
    State(hub): State<SharedHub>,
    Query(query): Query<NavQuery>,
) -> impl IntoResponse {
    let state = nav_state(Page::Standings, &query);
    let tables = load_league_tables(&hub, &state.league).await;

    let points = charts::bars(
        tables
            .standings
            .iter()
            .map(|r| (r.team.clone(), f64::from(r.points)))
            .collect(),
    );

    HtmlTemplate(StandingsTemplate {
        points,
        rows: tables.standings.clone(),
        nav: nav_context(&state, &tables),
    })
}

async fn matches(State(hub): State<SharedHub>, Query(query): Query<NavQuery>) -> impl IntoResponse {
    let state = nav_state(Page::Matches, &query);
    let tables = load_league_tables(&hub, &state.league).await;

    let goals: Vec<f64> = tables
        .matches
        .iter()
        .flat_map(|m| [m.score_home, m.score_away])
        .flatten()
        .map(f64::from)
        .collect();

    HtmlTemplate(MatchesTemplate {
        goals: charts::histogram(&goals, 10),
        rows: tables.matches.clone(),
        nav: nav_context(&state, &tables),
    })
}

async fn upcoming_matches(
    State(hub): State<SharedHub>,
    Query(query): Query<NavQuery>,
) -> impl IntoResponse {
    let state = nav_state(Page::UpcomingMatches, &query);
    let tables = load_league_tables(&hub, &state.league).await;

    let rows = upcoming(&tables.matches);
    let dates: Vec<_> = rows.iter().filter_map(|m| m.date).collect();

    HtmlTemplate(UpcomingTemplate {
        dates: charts::date_histogram(&dates),
        rows,
        nav: nav_context(&state, &tables),
    })
}

/// Team id to use for squad pages: the explicit selection, or the first
/// team of the league (matching the sidebar default).
fn effective_team(state: &NavState, tables: &LeagueTables) -> Option<u64> {
    state.team_id.or_else(|| tables.teams.first().map(|t| t.id))
}

fn team_display_name(tables: &LeagueTables, team_id: u64) -> String {
    tables
        .teams
        .iter()
        .find(|t| t.id == team_id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("team {team_id}"))
}

async fn players(State(hub): State<SharedHub>, Query(query): Query<NavQuery>) -> impl IntoResponse {
    let state = nav_state(Page::PlayerData, &query);
    let mut tables = load_league_tables(&hub, &state.league).await;

    let Some(team_id) = effective_team(&state, &tables) else {
        return HtmlTemplate(PlayersTemplate {
            team_id: 0,
            team_name: "no team selected".to_string(),
            rows: Vec::new(),
            positions: Vec::new(),
            ages: Vec::new(),
            nationalities: Vec::new(),
            nav: nav_context(&state, &tables),
        })
        .into_response();
    };
    let state = state.apply(NavEvent::SelectTeam(team_id));

    let (squad, warnings) = load_squad(&hub, team_id).await;
    tables.warnings.extend(warnings);

    let ages: Vec<f64> = squad.iter().filter_map(|p| p.age.map(f64::from)).collect();

    HtmlTemplate(PlayersTemplate {
        team_id,
        team_name: team_display_name(&tables, team_id),
        positions: charts::value_counts(squad.iter().map(|p| p.position.clone())),
        ages: charts::histogram(&ages, 10),
        nationalities: charts::value_counts(squad.iter().map(|p| p.nationality.clone())),
        rows: squad,
        nav: nav_context(&state, &tables),
    })
    .into_response()
}

async fn performance(
    State(hub): State<SharedHub>,
    Query(query): Query<NavQuery>,
) -> impl IntoResponse {
    let state = nav_state(Page::PlayerPerformance, &query);
    let mut tables = load_league_tables(&hub, &state.league).await;

    let Some(team_id) = effective_team(&state, &tables) else {
        return HtmlTemplate(PerformanceTemplate {
            team_id: 0,
            team_name: "no team selected".to_string(),
            players: Vec::new(),
            performance: None,
            ambiguity_note: String::new(),
            nav: nav_context(&state, &tables),
        })
        .into_response();
    };
    let state = state.apply(NavEvent::SelectTeam(team_id));

    let (squad, warnings) = load_squad(&hub, team_id).await;
    tables.warnings.extend(warnings);

    // Default to the first squad member, like the sidebar selector.
    let selected = query
        .player
        .clone()
        .or_else(|| squad.first().map(|p| p.name.clone()));

    let (lookup, note) = match &selected {
        Some(name) => {
            let (lookup, warnings) = load_performance(&hub, name).await;
            tables.warnings.extend(warnings);
            let note = if lookup.is_ambiguous() {
                format!(
                    "{} players matched \"{name}\"; statistics shown for the first.",
                    lookup.candidates.len()
                )
            } else {
                String::new()
            };
            (lookup, note)
        }
        None => (Default::default(), String::new()),
    };

    HtmlTemplate(PerformanceTemplate {
        team_id,
        team_name: team_display_name(&tables, team_id),
        players: squad
            .iter()
            .map(|p| PlayerOption {
                selected: Some(&p.name) == selected.as_ref(),
                name: p.name.clone(),
            })
            .collect(),
        performance: lookup.performance,
        ambiguity_note: note,
        nav: nav_context(&state, &tables),
    })
    .into_response()
}

async fn odds(State(hub): State<SharedHub>, Query(query): Query<NavQuery>) -> impl IntoResponse {
    let state = nav_state(Page::OddsData, &query);
    let mut tables = load_league_tables(&hub, &state.league).await;

    let (games, warnings) = load_odds(&hub).await;
    tables.warnings.extend(warnings);

    let selected_game = query.game.unwrap_or(0).min(games.len().saturating_sub(1));
    let (game_label, bookmakers, outcomes) = match games.get(selected_game) {
        Some(game) => {
            let selected_bookmaker = query
                .bookmaker
                .as_deref()
                .and_then(|title| game.bookmakers.iter().position(|b| b.title == title))
                .unwrap_or(0);
            let outcomes = game
                .bookmakers
                .get(selected_bookmaker)
                .map(|b| b.outcomes.clone())
                .unwrap_or_default();
            let bookmakers = game
                .bookmakers
                .iter()
                .enumerate()
                .map(|(i, b)| BookmakerOption {
                    title: b.title.clone(),
                    selected: i == selected_bookmaker,
                })
                .collect();
            (game.label(), bookmakers, outcomes)
        }
        None => (String::new(), Vec::new(), Vec::new()),
    };

    let prices: Vec<f64> = games
        .iter()
        .flat_map(|g| &g.bookmakers)
        .flat_map(|b| &b.outcomes)
        .map(|o| o.price)
        .collect();

    HtmlTemplate(OddsTemplate {
        games: games
            .iter()
            .enumerate()
            .map(|(index, game)| GameOption {
                index,
                label: game.label(),
                selected: index == selected_game,
            })
            .collect(),
        bookmakers,
        game_label,
        outcome_bars: charts::bars(
            outcomes
                .iter()
                .map(|o| (o.name.clone(), o.price))
                .collect(),
        ),
        price_hist: charts::histogram(&prices, 10),
        outcomes,
        nav: nav_context(&state, &tables),
    })
}

fn csv_response(filename: &str, body: String) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

async fn export_table(
    State(hub): State<SharedHub>,
    Path(table): Path<String>,
    Query(query): Query<NavQuery>,
) -> Response {
    let state = nav_state(Page::Home, &query);

    let csv = match table.as_str() {
        "teams.csv" => {
            let tables = load_league_tables(&hub, &state.league).await;
            to_csv_string(TeamRow::COLUMNS, &tables.teams)
        }
        "standings.csv" => {
            let tables = load_league_tables(&hub, &state.league).await;
            to_csv_string(StandingRow::COLUMNS, &tables.standings)
        }
        "matches.csv" => {
            let tables = load_league_tables(&hub, &state.league).await;
            to_csv_string(MatchRow::COLUMNS, &tables.matches)
        }
        "players.csv" => {
            let tables = load_league_tables(&hub, &state.league).await;
            match effective_team(&state, &tables) {
                Some(team_id) => {
                    let (squad, _) = load_squad(&hub, team_id).await;
                    to_csv_string(PlayerRow::COLUMNS, &squad)
                }
                None => to_csv_string::<PlayerRow>(PlayerRow::COLUMNS, &[]),
            }
        }
        "odds.csv" => {
            let (games, _) = load_odds(&hub).await;
            to_csv_string(OddsQuoteRow::COLUMNS, &quote_rows(&games))
        }
        _ => return (StatusCode::NOT_FOUND, "unknown table").into_response(),
    };

    match csv {
        Ok(body) => csv_response(&table, body),
        Err(err) => {
            tracing::error!(%err, table, "CSV export failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "export failed").into_response()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let credentials = Credentials::from_env()?;
    let hub = Arc::new(DataHub::new(credentials)?);

    let app = Router::new()
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(home))
        .route("/teams", get(teams))
        .route("/standings", get(standings))
        .route("/matches", get(matches))
        .route("/players", get(players))
        .route("/performance", get(performance))
        .route("/upcoming", get(upcoming_matches))
        .route("/odds", get(odds))
        .route("/export/:table", get(export_table))
        .with_state(hub);

    let addr = "127.0.0.1:3000";
    tracing::info!("dashboard listening on http://{addr}");
    println!("Football dashboard running at http://{addr}");
    println!("Press Ctrl+C to stop");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .await
        .context("server terminated")?;

    Ok(())
}
