//! CSV-based reference table loader
//!
//! Loads team pace and defense-vs-position tables from the data directory.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::info;
use serde::Deserialize;

use crate::error::DataError;
use crate::projection::DefenseFactors;
use super::defense::DefenseTable;
use super::team::{assign_pace_ranks, normalize_team, TeamPace};

/// File name of the pace table inside the data directory
pub const TEAM_PACE_FILE: &str = "team_pace.csv";

/// File name of the defense-vs-position table inside the data directory
pub const DEFENSE_FILE: &str = "defense_vs_position.csv";

/// Raw CSV row matching team_pace.csv columns
#[derive(Debug, Deserialize)]
struct PaceRow {
    team: String,
    pace: f64,
}

/// Raw CSV row matching defense_vs_position.csv columns
#[derive(Debug, Deserialize)]
struct DefenseRow {
    team: String,
    position: String,
    fga_factor: f64,
    fta_factor: f64,
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

/// Iterate rows as (line number, typed row)
fn read_rows<R, T>(reader: R, source: &str) -> Result<Vec<(u64, T)>, DataError>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let csv_err = |e: csv::Error| DataError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers: StringRecord = reader.headers().map_err(csv_err)?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: T = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push((line, row));
    }
    Ok(rows)
}

fn positive_factor(value: f64, column: &str, source: &str, line: u64) -> Result<f64, DataError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DataError::InvalidValue {
            path: source.to_string(),
            line,
            message: format!("{} must be a positive number, got {}", column, value),
        })
    }
}

fn parse_team_pace<R: Read>(reader: R, source: &str) -> Result<Vec<TeamPace>, DataError> {
    let mut teams = Vec::new();
    for (line, row) in read_rows::<_, PaceRow>(reader, source)? {
        let pace = positive_factor(row.pace, "pace", source, line)?;
        teams.push(TeamPace {
            team: normalize_team(&row.team),
            pace,
            rank: 0,
        });
    }
    assign_pace_ranks(&mut teams);
    Ok(teams)
}

fn parse_defense<R: Read>(reader: R, source: &str) -> Result<DefenseTable, DataError> {
    let mut table = DefenseTable::new();
    for (line, row) in read_rows::<_, DefenseRow>(reader, source)? {
        let factors = DefenseFactors {
            fga_factor: positive_factor(row.fga_factor, "fga_factor", source, line)?,
            fta_factor: positive_factor(row.fta_factor, "fta_factor", source, line)?,
        };
        table.insert(&row.team, &row.position, factors);
    }
    Ok(table)
}

/// Load team pace from CSV (`team,pace`) and rank the teams
pub fn load_team_pace(path: &Path) -> Result<Vec<TeamPace>, DataError> {
    let teams = parse_team_pace(open(path)?, &path.display().to_string())?;
    info!("loaded pace for {} teams from {}", teams.len(), path.display());
    Ok(teams)
}

/// Load team pace from any reader
pub fn load_team_pace_from_reader<R: Read>(reader: R) -> Result<Vec<TeamPace>, DataError> {
    parse_team_pace(reader, "<reader>")
}

/// Load defense-vs-position factors from CSV (`team,position,fga_factor,fta_factor`)
pub fn load_defense_factors(path: &Path) -> Result<DefenseTable, DataError> {
    let table = parse_defense(open(path)?, &path.display().to_string())?;
    info!("loaded {} defense-vs-position rows from {}", table.len(), path.display());
    Ok(table)
}

/// Load defense-vs-position factors from any reader
pub fn load_defense_factors_from_reader<R: Read>(reader: R) -> Result<DefenseTable, DataError> {
    parse_defense(reader, "<reader>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_load_bundled_tables() {
        let teams = load_team_pace(&data_dir().join(TEAM_PACE_FILE)).expect("Failed to load pace");
        assert_eq!(teams.len(), 30);
        assert!(teams.iter().any(|t| t.rank == 1));
        assert!(teams.iter().all(|t| t.pace > 90.0 && t.pace < 110.0));

        let defense = load_defense_factors(&data_dir().join(DEFENSE_FILE)).expect("Failed to load defense");
        assert!(!defense.is_empty());
    }

    #[test]
    fn test_pace_from_reader() {
        let csv = "team,pace\nbos, 98.5\nIND,103.1\n";
        let teams = load_team_pace_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(teams[0].team, "BOS");
        assert_eq!(teams[0].rank, 2);
        assert_eq!(teams[1].rank, 1);
    }

    #[test]
    fn test_non_positive_pace_rejected() {
        let csv = "team,pace\nBOS,98.5\nIND,0\n";
        let err = load_team_pace_from_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataError::InvalidValue { line, message, .. } => {
                assert_eq!(line, 3);
                assert!(message.contains("pace"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_pace_is_csv_error() {
        let csv = "team,pace\nBOS,fast\n";
        assert!(matches!(
            load_team_pace_from_reader(csv.as_bytes()),
            Err(DataError::Csv { .. })
        ));
    }

    #[test]
    fn test_defense_from_reader() {
        let csv = "team,position,fga_factor,fta_factor\nBOS,PG,0.96,0.92\nbos,c,1.05,1.10\n";
        let table = load_defense_factors_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("BOS", "C").unwrap().fta_factor, 1.10);

        let bad = "team,position,fga_factor,fta_factor\nBOS,PG,-1,0.92\n";
        assert!(matches!(
            load_defense_factors_from_reader(bad.as_bytes()),
            Err(DataError::InvalidValue { .. })
        ));
    }
}
