use anyhow::{bail, Result};
use clap::Parser;
use football_dashboard::config::{is_known_league, league_name, Credentials, DEFAULT_LEAGUE};
use football_dashboard::export::save_csv;
use football_dashboard::models::{MatchRow, OddsQuoteRow, PlayerRow, StandingRow, TeamRow};
use football_dashboard::normalize::matches::upcoming;
use football_dashboard::normalize::odds::quote_rows;
use football_dashboard::{load_league_tables, load_odds, load_performance, load_squad, DataHub};
use std::path::PathBuf;

/// Football analysis dashboard, terminal edition.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// League code: PL, PD, SA, BL1, FL1, DED, PPL, BSA
    #[arg(long, default_value = DEFAULT_LEAGUE)]
    league: String,

    /// Team id to show squad data for
    #[arg(long)]
    team: Option<u64>,

    /// Player name to look up season statistics for
    #[arg(long)]
    player: Option<String>,

    /// Also fetch bookmaker odds
    #[arg(long)]
    odds: bool,

    /// Write every printed table to CSV files
    #[arg(long)]
    save_csv: bool,

    /// Directory for CSV output
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    if !is_known_league(&args.league) {
        bail!("unknown league code: {}", args.league);
    }
    let league_display = league_name(&args.league).unwrap_or(&args.league);

    let credentials = Credentials::from_env()?;
    let hub = DataHub::new(credentials)?;

    println!("Football Analysis Dashboard - {league_display}\n");

    let tables = load_league_tables(&hub, &args.league).await;
    for warning in &tables.warnings {
        eprintln!("warning: {warning}");
    }

    println!("STANDINGS\n");
    if tables.standings.is_empty() {
        println!("No standings data available.");
    } else {
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4}",
            "#", "Team", "P", "W", "D", "L", "Pts"
        );
        for row in &tables.standings {
            println!(
                "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>4}",
                row.position, row.team, row.played_games, row.won, row.draw, row.lost, row.points
            );
        }
    }

    println!("\nTEAMS\n");
    if tables.teams.is_empty() {
        println!("No team data available.");
    } else {
        for team in &tables.teams {
            println!(
                "{:<28} founded {:<6} coach {} ({})",
                team.name,
                team.founded_display(),
                team.coach_name,
                team.coach_nationality
            );
        }
    }

    println!("\nUPCOMING MATCHES\n");
    let scheduled = upcoming(&tables.matches);
    if scheduled.is_empty() {
        println!("No match data available.");
    } else {
        for m in &scheduled {
            println!("{}  {} vs {}", m.date_display(), m.home_team, m.away_team);
        }
    }

    let mut squad: Vec<PlayerRow> = Vec::new();
    if let Some(team_id) = args.team {
        let (players, warnings) = load_squad(&hub, team_id).await;
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }

        println!("\nSQUAD (team {team_id})\n");
        if players.is_empty() {
            println!("No player data available.");
        } else {
            for player in &players {
                println!(
                    "{:<28} {:<16} age {:<4} {}",
                    player.name,
                    player.position,
                    player.age_display(),
                    player.nationality
                );
            }
        }
        squad = players;
    }

    if let Some(name) = &args.player {
        let (lookup, warnings) = load_performance(&hub, name).await;
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }

        println!("\nPLAYER PERFORMANCE\n");
        match &lookup.performance {
            None => println!("No performance data available for this player."),
            Some(perf) => {
                if lookup.is_ambiguous() {
                    println!(
                        "Note: {} players matched \"{name}\", showing the first.",
                        lookup.candidates.len()
                    );
                }
                println!("Name:           {}", perf.name);
                println!("Age:            {}", perf.age_display());
                println!("Nationality:    {}", perf.nationality);
                println!("Team:           {}", perf.team);
                println!("Position:       {}", perf.position);
                println!("Appearances:    {}", perf.appearances);
                println!("Minutes played: {}", perf.minutes_played);
                println!("Goals:          {}", perf.goals);
                println!("Assists:        {}", perf.assists);
                println!("Shots total:    {}", perf.shots_total);
                println!("Passes total:   {}", perf.passes_total);
                println!("Yellow cards:   {}", perf.yellow_cards);
                println!("Red cards:      {}", perf.red_cards);
            }
        }
    }

    let mut odds_table: Vec<OddsQuoteRow> = Vec::new();
    if args.odds {
        let (games, warnings) = load_odds(&hub).await;
        for warning in &warnings {
            eprintln!("warning: {warning}");
        }

        println!("\nODDS\n");
        if games.is_empty() {
            println!("No odds data available.");
        } else {
            for game in &games {
                println!("{}", game.label());
                for bookmaker in &game.bookmakers {
                    let quotes: Vec<String> = bookmaker
                        .outcomes
                        .iter()
                        .map(|o| format!("{} {:.2}", o.name, o.price))
                        .collect();
                    println!("  {:<20} {}", bookmaker.title, quotes.join(" | "));
                }
            }
        }
        odds_table = quote_rows(&games);
    }

    if args.save_csv {
        save_csv(
            TeamRow::COLUMNS,
            &tables.teams,
            &args.out_dir.join("teams.csv"),
        )?;
        save_csv(
            StandingRow::COLUMNS,
            &tables.standings,
            &args.out_dir.join("standings.csv"),
        )?;
        save_csv(
            MatchRow::COLUMNS,
            &tables.matches,
            &args.out_dir.join("matches.csv"),
        )?;
        if !squad.is_empty() {
            save_csv(
                PlayerRow::COLUMNS,
                &squad,
                &args.out_dir.join("players.csv"),
            )?;
        }
        if !odds_table.is_empty() {
            save_csv(
                OddsQuoteRow::COLUMNS,
                &odds_table,
                &args.out_dir.join("odds.csv"),
            )?;
        }
        println!("\nSaved CSV files to {}", args.out_dir.display());
    }

    Ok(())
}
