use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the team table for a league.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: u64,
    pub name: String,
    pub founded: Option<u32>,
    pub venue: String,
    pub website: String,
    pub coach_name: String,
    pub coach_nationality: String,
    pub contract_start: String,
    pub contract_until: String,
    pub area_name: String,
    pub area_code: String,
    pub area_flag: String,
    pub area_id: Option<u64>,
}

impl TeamRow {
    /// Column schema, stable even for a rowless table. Order matches the
    /// struct fields so CSV headers line up with serialized records.
    pub const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "founded",
        "venue",
        "website",
        "coach_name",
        "coach_nationality",
        "contract_start",
        "contract_until",
        "area_name",
        "area_code",
        "area_flag",
        "area_id",
    ];

    pub fn founded_display(&self) -> String {
        match self.founded {
            Some(year) => year.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// One row of a league table, in upstream order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub position: u32,
    pub team: String,
    #[serde(rename = "playedGames")]
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: i32,
}

impl StandingRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "position",
        "team",
        "playedGames",
        "won",
        "draw",
        "lost",
        "points",
    ];
}

/// Match lifecycle as reported by Football-Data.org.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Suspended,
    Postponed,
    Cancelled,
    Awarded,
    #[serde(other)]
    Unknown,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Awarded => "AWARDED",
            MatchStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One match of a competition. Scores stay empty until the match is played.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub home_team: String,
    pub away_team: String,
    pub score_home: Option<u32>,
    pub score_away: Option<u32>,
    pub status: MatchStatus,
    pub date: Option<DateTime<Utc>>,
}

impl MatchRow {
    pub const COLUMNS: &'static [&'static str] = &[
        "home_team",
        "away_team",
        "score_home",
        "score_away",
        "status",
        "date",
    ];

    pub fn score_display(&self) -> String {
        match (self.score_home, self.score_away) {
            (Some(h), Some(a)) => format!("{h} - {a}"),
            _ => "-".to_string(),
        }
    }

    pub fn date_display(&self) -> String {
        match self.date {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// One squad member of a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub name: String,
    pub position: String,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: String,
    pub age: Option<u32>,
}

impl PlayerRow {
    pub const COLUMNS: &'static [&'static str] =
        &["name", "position", "date_of_birth", "nationality", "age"];

    pub fn age_display(&self) -> String {
        match self.age {
            Some(age) => age.to_string(),
            None => "N/A".to_string(),
        }
    }

    pub fn birth_display(&self) -> String {
        match self.date_of_birth {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Cumulative season counters for one player, from API-Sports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerPerformance {
    pub name: String,
    pub age: Option<u32>,
    pub nationality: String,
    pub team: String,
    pub position: String,
    pub appearances: u32,
    pub minutes_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub shots_total: u32,
    pub passes_total: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
}

impl PlayerPerformance {
    pub fn age_display(&self) -> String {
        match self.age {
            Some(age) => age.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// Result of a free-text player search. The first hit's statistics are
/// surfaced, but every matched name is kept so ambiguous lookups stay
/// visible to the caller.
#[derive(Debug, Clone, Default)]
pub struct PerformanceLookup {
    pub performance: Option<PlayerPerformance>,
    pub candidates: Vec<String>,
}

impl PerformanceLookup {
    pub fn is_empty(&self) -> bool {
        self.performance.is_none()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.candidates.len() > 1
    }
}

/// Outcome/price pair quoted by a bookmaker (decimal odds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeQuote {
    pub name: String,
    pub price: f64,
}

/// All outcomes one bookmaker quotes for a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmakerOdds {
    pub title: String,
    pub outcomes: Vec<OutcomeQuote>,
}

/// One upcoming match with quotes from many bookmakers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsGame {
    pub home_team: String,
    pub away_team: String,
    pub bookmakers: Vec<BookmakerOdds>,
}

impl OddsGame {
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}

/// Flat odds table: one row per (match, bookmaker, outcome).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsQuoteRow {
    #[serde(rename = "match")]
    pub match_label: String,
    pub bookmaker: String,
    pub outcome: String,
    pub price: f64,
}

impl OddsQuoteRow {
    pub const COLUMNS: &'static [&'static str] = &["match", "bookmaker", "outcome", "price"];
}
