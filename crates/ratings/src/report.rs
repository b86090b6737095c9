//! Report rendering
//!
//! Every report is a comma-separated table with CRLF line endings. Ratings
//! are printed with three digits after the point.

use std::collections::HashSet;

use crate::error::{RatingError, Result};
use crate::history::{History, MatchRecord, PlayerHistory};
use crate::player::Player;
use crate::store::Rating;

/// Digits after the decimal point in every rendered rating
pub const RATING_PRECISION: usize = 3;

pub const RANKING_HEADER: [&str; 3] = ["rank", "player", "rating"];

pub const PLAYER_LEDGER_HEADER: [&str; 5] = [
    "rating_change",
    "score",
    "opponent_score",
    "opponent",
    "opponent_rating_change",
];

pub fn format_rating(value: f64) -> String {
    format!("{:.*}", RATING_PRECISION, value)
}

/// Positive changes get an explicit `+`; zero and negatives print as-is.
pub fn format_delta(delta: f64) -> String {
    if delta > 0.0 {
        format!("+{}", format_rating(delta))
    } else {
        format_rating(delta)
    }
}

/// `(1000.000 +16.000)`
pub fn format_rating_change(rating: f64, delta: f64) -> String {
    format!("({} {})", format_rating(rating), format_delta(delta))
}

/// Numbered ranking table for an already sorted list of ratings
pub fn ranking_table(ratings: &[Rating]) -> Result<String> {
    let mut table = Table::new();
    table.row(RANKING_HEADER)?;
    for (i, rating) in ratings.iter().enumerate() {
        table.row([
            (i + 1).to_string(),
            rating.player.to_string(),
            format_rating(rating.value),
        ])?;
    }
    table.finish()
}

/// Final ranking of every player who played at least one match.
///
/// With `allow` set, only those players are listed and ranks are renumbered.
/// Returns `None` when no tournament has been recorded.
pub fn final_ranking(history: &History, allow: Option<&HashSet<Player>>) -> Result<Option<String>> {
    let Some(ratings) = history.final_ratings() else {
        return Ok(None);
    };
    let rows: Vec<Rating> = ratings
        .iter()
        .filter(|r| history.has_matches(&r.player))
        .filter(|r| allow.map_or(true, |set| set.contains(&r.player)))
        .cloned()
        .collect();
    ranking_table(&rows).map(Some)
}

/// Leaderboard over time: one column per tournament, one row per rank.
///
/// The number of rows is the size of the final snapshot; earlier tournaments
/// with fewer ranked players leave their lower cells empty.
pub fn progression_matrix(history: &History) -> Result<Option<String>> {
    let Some(last) = history.final_ratings() else {
        return Ok(None);
    };
    let entries = history.entries();

    let mut table = Table::new();
    let header: Vec<&str> = std::iter::once("")
        .chain(entries.iter().map(|e| e.tournament.as_str()))
        .collect();
    table.row(header)?;

    for row in 0..last.len() {
        let mut cells = Vec::with_capacity(entries.len() + 1);
        cells.push((row + 1).to_string());
        for entry in entries {
            cells.push(match entry.ratings.get(row) {
                Some(rating) => format!("{}:{}", rating.player, format_rating(rating.value)),
                None => String::new(),
            });
        }
        table.row(cells)?;
    }
    table.finish().map(Some)
}

/// One player's matches, a `<tournament>,,,,` line before each tournament
pub fn player_ledger(history: &PlayerHistory) -> Result<String> {
    let mut table = Table::new();
    table.row(PLAYER_LEDGER_HEADER)?;
    for block in &history.tournaments {
        let mut separator = vec![block.tournament.clone()];
        separator.resize(PLAYER_LEDGER_HEADER.len(), String::new());
        table.row(separator)?;
        for record in &block.records {
            table.row(match_row(record))?;
        }
    }
    table.finish()
}

fn match_row(record: &MatchRecord) -> [String; 5] {
    [
        format_rating_change(record.rating, record.delta),
        record.score.to_string(),
        record.opponent_score.to_string(),
        record.opponent.to_string(),
        format_rating_change(record.opponent_rating, record.opponent_delta),
    ]
}

/// In-memory CSV writer
struct Table {
    writer: csv::Writer<Vec<u8>>,
}

impl Table {
    fn new() -> Self {
        let writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::CRLF)
            .flexible(true)
            .from_writer(Vec::new());
        Self { writer }
    }

    fn row<I, T>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(cells)
            .map_err(|e| RatingError::Render(e.to_string()))
    }

    fn finish(self) -> Result<String> {
        let bytes = self
            .writer
            .into_inner()
            .map_err(|e| RatingError::Render(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| RatingError::Render(e.to_string()))
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
