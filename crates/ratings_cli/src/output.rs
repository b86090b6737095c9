//! Report files and terminal output

use ratings::{report, LedgerReport, Player, Rating, RatingReports};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const RANKING_FILE: &str = "rating.csv";
pub const ACTIVE_RANKING_FILE: &str = "rating_active.csv";
pub const PROGRESSION_FILE: &str = "history.csv";
pub const PLAYERS_DIR: &str = "players";

#[derive(Debug, Error)]
#[error("failed to write {}: {source}", .path.display())]
pub struct OutputError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Directory that receives the reports of one rating system
pub fn system_dir(root: &Path, system: &str) -> PathBuf {
    root.join("ratings").join(system)
}

/// Write every report under `<root>/ratings/<system>/`.
///
/// Files written before a failure stay on disk.
pub fn write_reports(root: &Path, reports: &RatingReports) -> Result<Vec<PathBuf>, OutputError> {
    let base = system_dir(root, &reports.system);
    let mut written = Vec::new();
    for ledger in reports.overall.iter().chain(&reports.seasons) {
        write_ledger(&base.join(&ledger.label), ledger, &mut written)?;
    }
    info!(files = written.len(), dir = %base.display(), "reports written");
    Ok(written)
}

fn write_ledger(dir: &Path, ledger: &LedgerReport, written: &mut Vec<PathBuf>) -> Result<(), OutputError> {
    write_file(&dir.join(RANKING_FILE), &ledger.ranking, written)?;
    if let Some(active) = &ledger.active_ranking {
        write_file(&dir.join(ACTIVE_RANKING_FILE), active, written)?;
    }
    write_file(&dir.join(PROGRESSION_FILE), &ledger.progression, written)?;

    let players = dir.join(PLAYERS_DIR);
    let mut used = HashSet::new();
    for player in &ledger.players {
        let stem = unique_stem(file_name(&player.player), &mut used);
        write_file(&players.join(format!("{stem}.csv")), &player.ledger, written)?;
    }
    debug!(ledger = %ledger.label, players = ledger.players.len(), "ledger written");
    Ok(())
}

fn write_file(path: &Path, contents: &str, written: &mut Vec<PathBuf>) -> Result<(), OutputError> {
    let wrap = |source| OutputError {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(wrap)?;
    }
    std::fs::write(path, contents).map_err(wrap)?;
    written.push(path.to_path_buf());
    Ok(())
}

/// Player display name made safe for use as a file name
pub fn file_name(player: &Player) -> String {
    player
        .to_string()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}

/// `stem`, or `stem (N)` when an earlier player already sanitized to it
fn unique_stem(stem: String, used: &mut HashSet<String>) -> String {
    if used.insert(stem.clone()) {
        return stem;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{stem} ({n})");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[derive(Debug, Serialize)]
struct LeaderboardRow {
    rank: usize,
    player: String,
    rating: f64,
    active: bool,
}

fn leaderboard_rows(ratings: &[Rating], active: &HashSet<Player>, active_only: bool) -> Vec<LeaderboardRow> {
    ratings
        .iter()
        .filter(|r| !active_only || active.contains(&r.player))
        .enumerate()
        .map(|(i, r)| LeaderboardRow {
            rank: i + 1,
            player: r.player.to_string(),
            rating: r.value,
            active: active.contains(&r.player),
        })
        .collect()
}

/// Print leaderboard to stdout
pub fn print_leaderboard(ratings: &[Rating], active: &HashSet<Player>, active_only: bool) {
    println!("\n=== Leaderboard ===");
    println!("{:>4}  {:<30} {:>10} {:>7}", "#", "Player", "Rating", "Active");
    println!("{}", "-".repeat(56));
    for row in leaderboard_rows(ratings, active, active_only) {
        println!(
            "{:>4}  {:<30} {:>10} {:>7}",
            row.rank,
            row.player,
            report::format_rating(row.rating),
            if row.active { "yes" } else { "" }
        );
    }
    println!();
}

/// Leaderboard as pretty JSON
pub fn leaderboard_json(
    ratings: &[Rating],
    active: &HashSet<Player>,
    active_only: bool,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&leaderboard_rows(ratings, active, active_only))
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod output_tests;
