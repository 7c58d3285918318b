//! Read-only reference data: players, team pace and defense-vs-position
//!
//! Loaded once per process from a data directory and shared by reference
//! between requests and worker threads.

mod team;
mod defense;
pub mod loader;

pub use team::{TeamPace, assign_pace_ranks, league_average_pace, normalize_team};
pub use defense::{DefenseTable, normalize_position};
pub use loader::{
    load_team_pace, load_team_pace_from_reader, load_defense_factors, load_defense_factors_from_reader,
    TEAM_PACE_FILE, DEFENSE_FILE,
};
pub use crate::projection::DefenseFactors;

use std::path::{Path, PathBuf};

use log::info;

use crate::error::DataError;
use crate::player::{self, PlayerRecord, PLAYERS_FILE};

/// Default path to the data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "POINTS_DATA_DIR";

/// Data directory from `POINTS_DATA_DIR`, falling back to `data`
pub fn data_dir_from_env() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

/// Lookups the projection service needs from reference data
pub trait ReferenceSource {
    /// Player by exact case-insensitive name
    fn player(&self, name: &str) -> Option<&PlayerRecord>;

    /// Pace entry by case-insensitive team code
    fn team_pace(&self, team: &str) -> Option<&TeamPace>;

    /// League-wide average pace; 0.0 when unknown
    fn league_average_pace(&self) -> f64;

    /// Defense factors for a team/position pair, `None` when there is no row
    fn defense_factors(&self, team: &str, position: &str) -> Option<DefenseFactors>;

    /// Player names containing `query`, for autocomplete
    fn search_players(&self, query: &str, limit: usize) -> Vec<&str>;
}

/// All reference tables held in memory
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    players: Vec<PlayerRecord>,
    teams: Vec<TeamPace>,
    defense: DefenseTable,
    league_average_pace: f64,
}

impl ReferenceData {
    /// Build from already-loaded tables. Team ranks are recomputed.
    pub fn new(players: Vec<PlayerRecord>, mut teams: Vec<TeamPace>, defense: DefenseTable) -> Self {
        for team in teams.iter_mut() {
            team.team = normalize_team(&team.team);
        }
        assign_pace_ranks(&mut teams);
        let league_average_pace = league_average_pace(&teams);
        Self {
            players,
            teams,
            defense,
            league_average_pace,
        }
    }

    /// Load every table from the directory named by `POINTS_DATA_DIR` (or `data`)
    pub fn load_default() -> Result<Self, DataError> {
        Self::load_from(&data_dir_from_env())
    }

    /// Load every table from a specific directory
    pub fn load_from(dir: &Path) -> Result<Self, DataError> {
        let data = Self::new(
            player::load_players(dir.join(PLAYERS_FILE))?,
            load_team_pace(&dir.join(TEAM_PACE_FILE))?,
            load_defense_factors(&dir.join(DEFENSE_FILE))?,
        );
        info!(
            "reference data ready: {} players, {} teams, league pace {:.2}",
            data.players.len(),
            data.teams.len(),
            data.league_average_pace
        );
        Ok(data)
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn teams(&self) -> &[TeamPace] {
        &self.teams
    }
}

impl ReferenceSource for ReferenceData {
    fn player(&self, name: &str) -> Option<&PlayerRecord> {
        player::find_player(&self.players, name)
    }

    fn team_pace(&self, team: &str) -> Option<&TeamPace> {
        let code = normalize_team(team);
        self.teams.iter().find(|t| t.team == code)
    }

    fn league_average_pace(&self) -> f64 {
        self.league_average_pace
    }

    fn defense_factors(&self, team: &str, position: &str) -> Option<DefenseFactors> {
        self.defense.get(team, position)
    }

    fn search_players(&self, query: &str, limit: usize) -> Vec<&str> {
        player::search_players(&self.players, query, limit)
    }
}
