//! Load players from players.json

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::search::normalize_name;
use super::PlayerRecord;
use crate::error::DataError;

/// File name of the player table inside the data directory
pub const PLAYERS_FILE: &str = "players.json";

/// Names are compared after `normalize_name`, so each lookup resolves to one record
fn parse_players<R: Read>(reader: R, source: &str) -> Result<Vec<PlayerRecord>, DataError> {
    let players: Vec<PlayerRecord> = serde_json::from_reader(reader).map_err(|e| DataError::Json {
        path: source.to_string(),
        source: e,
    })?;

    let mut seen = HashSet::with_capacity(players.len());
    for player in &players {
        if !seen.insert(normalize_name(&player.name)) {
            return Err(DataError::DuplicatePlayer {
                path: source.to_string(),
                name: player.name.clone(),
            });
        }
    }
    Ok(players)
}

/// Load all players from a JSON file
pub fn load_players<P: AsRef<Path>>(path: P) -> Result<Vec<PlayerRecord>, DataError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let file = File::open(path).map_err(|e| DataError::Io {
        path: display.clone(),
        source: e,
    })?;

    let players = parse_players(BufReader::new(file), &display)?;
    info!("loaded {} players from {}", players.len(), display);
    Ok(players)
}

/// Load players from any reader (e.g., string buffer, network stream)
pub fn load_players_from_reader<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, DataError> {
    parse_players(reader, "<reader>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_load_bundled_players() {
        let players = load_players(data_dir().join(PLAYERS_FILE)).expect("Failed to load players");
        assert!(players.len() >= 10);
        assert!(players.iter().all(|p| !p.name.is_empty() && !p.team.is_empty()));
    }

    #[test]
    fn test_load_from_reader_with_missing_rate() {
        let json = r#"[
            {"name": "Test Guard", "team": "bos", "position": "PG", "season_average": 18.2,
             "fga_per36": 15.5, "fta_per36": 4.0, "two_point_pct": 0.52,
             "three_point_pct": 0.37, "free_throw_pct": 0.88, "three_point_attempt_rate": 0.45},
            {"name": "No Threes", "team": "MIA", "position": "C",
             "fga_per36": 11.0, "fta_per36": 6.0, "two_point_pct": 0.6,
             "free_throw_pct": 0.7, "three_point_attempt_rate": 0.0}
        ]"#;
        let players = load_players_from_reader(json.as_bytes()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].season_average, Some(18.2));
        assert_eq!(players[0].rates.field_goal_attempts_per36, Some(15.5));
        assert!(players[0].validated_rates().is_ok());

        assert_eq!(players[1].season_average, None);
        assert_eq!(players[1].rates.three_point_pct, None);
        let err = players[1].validated_rates().unwrap_err();
        assert_eq!(err.field(), "three_point_pct");
    }

    #[test]
    fn test_malformed_json_is_a_data_error() {
        let err = load_players_from_reader("[{\"name\": ".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Json { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected_case_insensitively() {
        let json = r#"[
            {"name": "Jalen Williams", "team": "OKC", "position": "SG"},
            {"name": " jalen williams", "team": "DEN", "position": "SF"}
        ]"#;
        let err = load_players_from_reader(json.as_bytes()).unwrap_err();
        match err {
            DataError::DuplicatePlayer { name, .. } => assert_eq!(name, " jalen williams"),
            other => panic!("expected DuplicatePlayer, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_players(data_dir().join("no_such_file.json")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
