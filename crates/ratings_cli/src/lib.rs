//! Ratings runner
//!
//! Reads a directory of tournament files, replays them through the rating
//! ledgers and writes the reports to disk.
//!
//! # Usage
//!
//! ```bash
//! # Rate every tournament in ./logs and write ./ratings/elo/...
//! cargo run -p ratings_cli -- run --logs logs --out .
//!
//! # Show the current overall leaderboard
//! cargo run -p ratings_cli -- leaderboard --active
//! ```

pub mod config;
pub mod ingest;
pub mod output;

use anyhow::{Context, Result};
use ratings::{
    active_players, calculate_ratings, replay, unique_players, ActivityWindow, EloSettings,
    Player, Rating, Season,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Read `logs`, calculate every report and write them under `root`.
pub fn generate_reports(
    logs: &Path,
    root: &Path,
    settings: &EloSettings,
    window: ActivityWindow,
) -> Result<Vec<PathBuf>> {
    let tournaments = ingest::read_tournaments(logs)
        .with_context(|| format!("loading tournaments from {}", logs.display()))?;
    info!(
        tournaments = tournaments.len(),
        players = unique_players(&tournaments).len(),
        "tournaments loaded"
    );

    let reports = calculate_ratings(&tournaments, settings, window).context("calculating ratings")?;
    let written = output::write_reports(root, &reports)?;
    Ok(written)
}

/// Overall ratings after the last tournament, with the active players
pub fn current_standings(
    logs: &Path,
    settings: &EloSettings,
    window: ActivityWindow,
) -> Result<(Vec<Rating>, Vec<Player>)> {
    let tournaments = ingest::read_tournaments(logs)
        .with_context(|| format!("loading tournaments from {}", logs.display()))?;

    let engine = replay(&tournaments, settings).context("calculating ratings")?;
    Ok((
        engine.overall().snapshot_ratings(),
        active_players(window, &tournaments),
    ))
}
