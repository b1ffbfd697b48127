//! Navigation state: which page is shown and which league/team is selected.
//!
//! State is a plain value handed to the renderer on every interaction;
//! transitions happen only through [`NavState::apply`].

use crate::config::{is_known_league, DEFAULT_LEAGUE};

/// The eight dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    TeamData,
    Standings,
    Matches,
    PlayerData,
    PlayerPerformance,
    UpcomingMatches,
    OddsData,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::TeamData,
        Page::Standings,
        Page::Matches,
        Page::PlayerData,
        Page::PlayerPerformance,
        Page::UpcomingMatches,
        Page::OddsData,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::TeamData => "Team Data",
            Page::Standings => "Standings",
            Page::Matches => "Matches",
            Page::PlayerData => "Player Data",
            Page::PlayerPerformance => "Player Performance",
            Page::UpcomingMatches => "Upcoming Matches",
            Page::OddsData => "Odds Data",
        }
    }

    /// Stable identifier used for routes and active-page highlighting.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::TeamData => "teams",
            Page::Standings => "standings",
            Page::Matches => "matches",
            Page::PlayerData => "players",
            Page::PlayerPerformance => "performance",
            Page::UpcomingMatches => "upcoming",
            Page::OddsData => "odds",
        }
    }

    pub fn path(self) -> String {
        match self {
            Page::Home => "/".to_string(),
            other => format!("/{}", other.slug()),
        }
    }
}

/// User actions that change the navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    GoTo(Page),
    SelectLeague(String),
    SelectTeam(u64),
}

/// Current page plus league/team selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub page: Page,
    pub league: String,
    pub team_id: Option<u64>,
}

impl Default for NavState {
    fn default() -> Self {
        Self {
            page: Page::Home,
            league: DEFAULT_LEAGUE.to_string(),
            team_id: None,
        }
    }
}

impl NavState {
    /// Apply one user event. Unknown league codes are ignored; switching
    /// league drops the team selection since team ids are league-scoped.
    pub fn apply(mut self, event: NavEvent) -> Self {
        match event {
            NavEvent::GoTo(page) => self.page = page,
            NavEvent::SelectLeague(code) => {
                if is_known_league(&code) {
                    if code != self.league {
                        self.team_id = None;
                    }
                    self.league = code;
                }
            }
            NavEvent::SelectTeam(id) => self.team_id = Some(id),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_home_premier_league() {
        let state = NavState::default();
        assert_eq!(state.page, Page::Home);
        assert_eq!(state.league, "PL");
        assert_eq!(state.team_id, None);
    }

    #[test]
    fn page_slugs_are_unique() {
        let mut slugs: Vec<_> = Page::ALL.iter().map(|p| p.slug()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), 8);
    }

    #[test]
    fn switching_league_clears_the_team() {
        let state = NavState::default()
            .apply(NavEvent::SelectTeam(57))
            .apply(NavEvent::SelectLeague("PD".to_string()));
        assert_eq!(state.league, "PD");
        assert_eq!(state.team_id, None);
    }

    #[test]
    fn reselecting_the_same_league_keeps_the_team() {
        let state = NavState::default()
            .apply(NavEvent::SelectTeam(57))
            .apply(NavEvent::SelectLeague("PL".to_string()));
        assert_eq!(state.team_id, Some(57));
    }

    #[test]
    fn unknown_league_codes_are_ignored() {
        let state = NavState::default().apply(NavEvent::SelectLeague("ZZ".to_string()));
        assert_eq!(state.league, "PL");
    }

    #[test]
    fn go_to_changes_only_the_page() {
        let state = NavState::default()
            .apply(NavEvent::SelectTeam(61))
            .apply(NavEvent::GoTo(Page::Standings));
        assert_eq!(state.page, Page::Standings);
        assert_eq!(state.team_id, Some(61));
    }
}
