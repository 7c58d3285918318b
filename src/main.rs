//! Points Projection CLI
//!
//! Project one player's points against one opponent, or search player names

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use points_projection::{
    reference::{DATA_DIR_ENV, DEFAULT_DATA_PATH},
    ProjectionEngine, ProjectionQuery, ProjectionService, ReferenceData,
};

#[derive(Parser)]
#[command(name = "points-projection")]
#[command(about = "Projected points for a player in an upcoming game")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding players.json, team_pace.csv and defense_vs_position.csv
    #[arg(short, long, global = true, env = DATA_DIR_ENV, default_value = DEFAULT_DATA_PATH)]
    data_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Project points for one player against one opponent
    Project {
        /// Full player name (case-insensitive)
        #[arg(short, long)]
        player: String,

        /// Opponent team code, e.g. BOS
        #[arg(short, long)]
        opponent: String,

        /// Projected minutes (0 < minutes <= 48)
        #[arg(short, long)]
        minutes: String,

        /// Usage multiplier (0 < usage <= 5)
        #[arg(short, long, default_value = "1.0")]
        usage: String,

        /// Position used for defense-vs-position (defaults to the player's own)
        #[arg(long)]
        position: Option<String>,

        /// Print the JSON response body instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List player names containing the given text
    Search {
        query: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data = ReferenceData::load_from(&cli.data_dir)
        .with_context(|| format!("loading reference data from {}", cli.data_dir.display()))?;
    let service = ProjectionService::new(data, ProjectionEngine::default());

    match cli.command {
        Command::Project { player, opponent, minutes, usage, position, json } => {
            let query = ProjectionQuery {
                player_name: player,
                opponent_team: opponent,
                projected_minutes: minutes,
                usage_adjustment: usage,
                player_position: position,
            };
            let response = service.project(&query)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            let p = &response.projection;
            println!("{} ({}, {}) vs {}", response.player.name, response.player.team,
                response.inputs.player_position, response.opponent.team);
            if let Some(avg) = response.player.season_average {
                println!("  Season Average: {:.1}", avg);
            }
            println!("  Opponent Pace:  {:.1} (rank {})", response.opponent.pace, response.opponent.pace_rank);
            println!("  Minutes: {}  Usage: {}", response.inputs.projected_minutes, response.inputs.usage_adjustment);
            println!("  Pace Adj: {:.2}  DvP FGA: {:.2}  DvP FTA: {:.2}",
                p.breakdown.pace_adjustment, response.opponent.dvp_fga_factor, response.opponent.dvp_fta_factor);
            println!();
            println!("{:>14} {:>8} {:>8}", "", "Att", "Pts");
            println!("{}", "-".repeat(32));
            println!("{:>14} {:>8.1} {:>8.1}", "Two-pointers", p.attempts.two_point_attempts, p.breakdown.two_pointers);
            println!("{:>14} {:>8.1} {:>8.1}", "Three-pointers", p.attempts.three_point_attempts, p.breakdown.three_pointers);
            println!("{:>14} {:>8.1} {:>8.1}", "Free throws", p.attempts.free_throw_attempts, p.breakdown.free_throws);
            println!("{}", "-".repeat(32));
            println!("{:>14} {:>8} {:>8.1}", "Total", "", p.projected_points);
        }
        Command::Search { query } => {
            for name in service.search(&query).players {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
