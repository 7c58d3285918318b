//! Batch projections for a full game-day slate
//!
//! Reads matchups from CSV, projects them in parallel against shared
//! reference data, and writes one output row per input row. A row that
//! fails keeps its place in the output with the error message filled in.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, Trim, Writer};
use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use crate::api::{ProjectionQuery, ProjectionService};
use crate::error::DataError;
use crate::reference::ReferenceSource;

/// One output row; projection columns are empty when `error` is set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlateRow {
    pub player_name: String,
    pub opponent_team: String,
    pub player_position: Option<String>,
    pub projected_minutes: String,
    pub usage_adjustment: String,
    pub projected_points: Option<f64>,
    pub projected_fga: Option<f64>,
    pub projected_fta: Option<f64>,
    pub two_pointers: Option<f64>,
    pub three_pointers: Option<f64>,
    pub free_throws: Option<f64>,
    pub pace_adjustment: Option<f64>,
    pub error: Option<String>,
}

impl SlateRow {
    fn from_query(query: &ProjectionQuery) -> Self {
        Self {
            player_name: query.player_name.clone(),
            opponent_team: query.opponent_team.clone(),
            player_position: query.player_position.clone(),
            projected_minutes: query.projected_minutes.clone(),
            usage_adjustment: query.usage_adjustment.clone(),
            projected_points: None,
            projected_fga: None,
            projected_fta: None,
            two_pointers: None,
            three_pointers: None,
            free_throws: None,
            pace_adjustment: None,
            error: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn parse_slate<R: Read>(reader: R, source: &str) -> Result<Vec<ProjectionQuery>, DataError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let entry: ProjectionQuery = result.map_err(|e| DataError::Csv {
            path: source.to_string(),
            source: e,
        })?;
        entries.push(entry);
    }
    Ok(entries)
}

/// Load a slate CSV (`player_name,opponent_team,projected_minutes,usage_adjustment[,player_position]`)
pub fn load_slate(path: &Path) -> Result<Vec<ProjectionQuery>, DataError> {
    let file = File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_slate(file, &path.display().to_string())
}

/// Load a slate from any reader
pub fn load_slate_from_reader<R: Read>(reader: R) -> Result<Vec<ProjectionQuery>, DataError> {
    parse_slate(reader, "<reader>")
}

/// Project every entry in parallel. Output order matches input order.
pub fn run_slate<S>(service: &ProjectionService<S>, entries: &[ProjectionQuery]) -> Vec<SlateRow>
where
    S: ReferenceSource + Sync,
{
    let rows: Vec<SlateRow> = entries
        .par_iter()
        .map(|query| {
            let mut row = SlateRow::from_query(query);
            match service.project(query) {
                Ok(response) => {
                    let p = response.projection;
                    row.player_position = Some(response.inputs.player_position);
                    row.projected_points = Some(p.projected_points);
                    row.projected_fga = Some(p.breakdown.projected_fga);
                    row.projected_fta = Some(p.breakdown.projected_fta);
                    row.two_pointers = Some(p.breakdown.two_pointers);
                    row.three_pointers = Some(p.breakdown.three_pointers);
                    row.free_throws = Some(p.breakdown.free_throws);
                    row.pace_adjustment = Some(p.breakdown.pace_adjustment);
                }
                Err(err) => {
                    warn!("slate row {} vs {} skipped: {}", query.player_name, query.opponent_team, err);
                    row.error = Some(err.to_string());
                }
            }
            row
        })
        .collect();

    let failed = rows.iter().filter(|r| r.is_error()).count();
    info!("projected {} slate rows ({} failed)", rows.len(), failed);
    rows
}

/// Write slate results as CSV to any writer
pub fn write_slate_results_to_writer<W: Write>(writer: W, rows: &[SlateRow]) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write slate results to a CSV file
pub fn write_slate_results(path: &Path, rows: &[SlateRow]) -> Result<(), DataError> {
    let file = File::create(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_slate_results_to_writer(file, rows).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}
