//! Reading canonical tournament records
//!
//! One JSON file per tournament; the file stem is the tournament name.
//!
//! ```json
//! {
//!   "header": { "date": "2015-03-14", "tags": ["Msk"], "end_of_season": true },
//!   "matches": [
//!     { "player1": "Petrov Ivan", "player2": "Sidorov Oleg",
//!       "games": [ { "score1": 2, "score2": 0 } ] }
//!   ]
//! }
//! ```

use chrono::NaiveDate;
use ratings::{Game, Match, Player, RatingError, Tournament};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const TOURNAMENT_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: missing header field `{field}`", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: invalid date `{value}`", .path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: RatingError,
    },

    #[error("{} has no file name", .0.display())]
    Unnamed(PathBuf),
}

#[derive(Debug, Deserialize)]
struct TournamentFile {
    header: Header,
    #[serde(default)]
    matches: Vec<MatchEntry>,
}

#[derive(Debug, Deserialize)]
struct Header {
    date: Option<String>,
    tags: Option<Vec<String>>,
    #[serde(default)]
    end_of_season: bool,
}

#[derive(Debug, Deserialize)]
struct MatchEntry {
    player1: String,
    player2: String,
    #[serde(default)]
    games: Vec<Game>,
}

/// Read one tournament file
pub fn read_tournament(path: &Path) -> Result<Tournament, IngestError> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestError::Unnamed(path.to_path_buf()))?;
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_tournament(name, &text, path)
}

/// Parse a tournament record. `path` is only used in error messages.
pub fn parse_tournament(name: &str, text: &str, path: &Path) -> Result<Tournament, IngestError> {
    let file: TournamentFile = serde_json::from_str(text).map_err(|source| IngestError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let date_text = file.header.date.ok_or_else(|| IngestError::MissingField {
        path: path.to_path_buf(),
        field: "date",
    })?;
    let date = NaiveDate::parse_from_str(date_text.trim(), "%Y-%m-%d").map_err(|_| {
        IngestError::InvalidDate {
            path: path.to_path_buf(),
            value: date_text.clone(),
        }
    })?;
    let tags = match file.header.tags {
        Some(tags) if !tags.is_empty() => tags,
        _ => {
            return Err(IngestError::MissingField {
                path: path.to_path_buf(),
                field: "tags",
            })
        }
    };

    let mut matches = Vec::with_capacity(file.matches.len());
    for entry in file.matches {
        let m = Match::new(
            Player::from_full_name(&entry.player1),
            Player::from_full_name(&entry.player2),
            entry.games,
        );
        // Byes and unplayed matches carry no rating information
        if m.total_points() == Some(0) {
            debug!(tournament = name, player1 = %m.player1, player2 = %m.player2, "skipping 0-0 match");
            continue;
        }
        matches.push(m);
    }

    Tournament::new(name, date, tags, matches, file.header.end_of_season).map_err(|source| {
        IngestError::Invalid {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Tournament files in `dir`, sorted by path
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == TOURNAMENT_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Every tournament in `dir`, oldest first. Same-day tournaments keep file order.
pub fn read_tournaments(dir: &Path) -> Result<Vec<Tournament>, IngestError> {
    let mut tournaments = list_files(dir)?
        .iter()
        .map(|path| read_tournament(path))
        .collect::<Result<Vec<_>, _>>()?;
    tournaments.sort_by_key(|t| t.date);
    debug!(count = tournaments.len(), dir = %dir.display(), "tournaments loaded");
    Ok(tournaments)
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod ingest_tests;
