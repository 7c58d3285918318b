//! Project every matchup in a slate CSV and write the results
//!
//! Usage: run_slate <slate.csv> [--output results.csv] [--data-dir data]

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use points_projection::{
    reference::{DATA_DIR_ENV, DEFAULT_DATA_PATH},
    slate::{load_slate, run_slate, write_slate_results},
    ProjectionEngine, ProjectionService, ReferenceData,
};

#[derive(Parser)]
#[command(name = "run_slate")]
#[command(about = "Batch point projections for a slate of matchups")]
struct Args {
    /// CSV with player_name,opponent_team,projected_minutes,usage_adjustment[,player_position]
    slate: PathBuf,

    /// Where to write the results CSV
    #[arg(short, long, default_value = "slate_projections.csv")]
    output: PathBuf,

    /// Reference data directory
    #[arg(short, long, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let data = ReferenceData::load_from(&args.data_dir)
        .with_context(|| format!("loading reference data from {}", args.data_dir.display()))?;
    let entries = load_slate(&args.slate)
        .with_context(|| format!("reading slate {}", args.slate.display()))?;
    println!("Loaded {} matchups in {:?}", entries.len(), start.elapsed());

    let service = ProjectionService::new(data, ProjectionEngine::default());

    let proj_start = Instant::now();
    let rows = run_slate(&service, &entries);
    println!("Projected in {:?}", proj_start.elapsed());

    println!("{:<26} {:>4} {:>4} {:>6} {:>6} {:>6}", "Player", "Opp", "Pos", "Min", "FGA", "Pts");
    println!("{}", "-".repeat(58));
    for row in &rows {
        match (&row.error, row.projected_points) {
            (None, Some(points)) => println!(
                "{:<26} {:>4} {:>4} {:>6} {:>6.1} {:>6.1}",
                row.player_name,
                row.opponent_team,
                row.player_position.as_deref().unwrap_or(""),
                row.projected_minutes,
                row.projected_fga.unwrap_or_default(),
                points,
            ),
            (Some(err), _) => println!("{:<26} {:>4}  error: {}", row.player_name, row.opponent_team, err),
            (None, None) => {}
        }
    }

    write_slate_results(&args.output, &rows)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("\nResults written to: {}", args.output.display());

    Ok(())
}
