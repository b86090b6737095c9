//! Ratings CLI
//!
//! Rate tournaments, print leaderboards and create a config file.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratings_cli::{config, current_standings, generate_reports, output};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ratings", version, about = "Elo ratings for head-to-head tournaments")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rate all tournaments and write the reports
    Run {
        #[command(flatten)]
        rating: RatingArgs,

        /// Root directory for reports
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the overall leaderboard
    Leaderboard {
        #[command(flatten)]
        rating: RatingArgs,

        /// Only list active players
        #[arg(long)]
        active: bool,

        /// Output JSON instead of table
        #[arg(long)]
        json: bool,
    },
    /// Create a default config file
    Init,
}

#[derive(clap::Args)]
struct RatingArgs {
    /// Directory with one JSON file per tournament
    #[arg(long)]
    logs: Option<PathBuf>,

    /// Rating moved per point played
    #[arg(long)]
    rating_per_point: Option<f64>,

    /// Days after a tag's last tournament that still count as active
    #[arg(long)]
    window_days: Option<i64>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => {
            config::create_default_config(&cli.config)?;
            println!("Created config at {}", cli.config.display());
        }
        Commands::Run { rating, out } => {
            let cfg = config::load_config(&cli.config)?;
            let settings = cfg.elo_settings(rating.rating_per_point)?;
            let window = cfg.activity_window(rating.window_days)?;
            let logs = cfg.log_dir(rating.logs);
            let root = cfg.output_root(out);

            let written = generate_reports(&logs, &root, &settings, window)?;
            println!(
                "Wrote {} report files under {}",
                written.len(),
                root.join("ratings").display()
            );
        }
        Commands::Leaderboard {
            rating,
            active,
            json,
        } => {
            let cfg = config::load_config(&cli.config)?;
            let settings = cfg.elo_settings(rating.rating_per_point)?;
            let window = cfg.activity_window(rating.window_days)?;
            let logs = cfg.log_dir(rating.logs);

            let (ratings, active_players) = current_standings(&logs, &settings, window)?;
            if ratings.is_empty() {
                println!("No tournament data found in {}", logs.display());
                return Ok(());
            }
            let active_set: HashSet<_> = active_players.into_iter().collect();
            if json {
                let text = output::leaderboard_json(&ratings, &active_set, active)
                    .context("serializing leaderboard")?;
                println!("{text}");
            } else {
                output::print_leaderboard(&ratings, &active_set, active);
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
