//! Active-player detection
//!
//! Activity is judged per tag against the tag's own most recent tournament,
//! not against today's date: a player is active when, for some tag they have
//! played under, their last appearance is within `window` of the last
//! tournament carrying that tag.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::error::{RatingError, Result};
use crate::player::Player;
use crate::types::Tournament;

/// Validated recency window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityWindow(Duration);

impl ActivityWindow {
    /// About six months
    pub const DEFAULT_DAYS: i64 = 183;

    pub fn new(window: Duration) -> Result<Self> {
        if window <= Duration::zero() {
            return Err(RatingError::InvalidWindow {
                days: window.num_days(),
            });
        }
        Ok(Self(window))
    }

    pub fn days(days: i64) -> Result<Self> {
        let window = Duration::try_days(days).ok_or(RatingError::InvalidWindow { days })?;
        Self::new(window)
    }

    pub fn duration(&self) -> Duration {
        self.0
    }
}

impl Default for ActivityWindow {
    fn default() -> Self {
        Self(Duration::days(Self::DEFAULT_DAYS))
    }
}

/// Per-player last appearance under each tag
#[derive(Debug)]
struct Attendance {
    player: Player,
    last_played: HashMap<String, NaiveDate>,
}

/// Players active in at least one tag, in order of first appearance.
///
/// Tournaments are expected in ascending date order, but the latest date is
/// taken with `max` so a misordered input does not shrink a tag's window.
pub fn active_players(window: ActivityWindow, tournaments: &[Tournament]) -> Vec<Player> {
    let mut last_occurrence: HashMap<&str, NaiveDate> = HashMap::new();
    let mut attendance: Vec<Attendance> = Vec::new();
    let mut index: HashMap<Player, usize> = HashMap::new();

    for tournament in tournaments {
        for tag in &tournament.tags {
            bump(last_occurrence.entry(tag.as_str()).or_insert(tournament.date), tournament.date);
        }
        for player in &tournament.players {
            let slot = *index.entry(player.clone()).or_insert_with(|| {
                attendance.push(Attendance {
                    player: player.clone(),
                    last_played: HashMap::new(),
                });
                attendance.len() - 1
            });
            for tag in &tournament.tags {
                bump(
                    attendance[slot]
                        .last_played
                        .entry(tag.clone())
                        .or_insert(tournament.date),
                    tournament.date,
                );
            }
        }
    }

    attendance
        .into_iter()
        .filter(|a| {
            a.last_played.iter().any(|(tag, played)| {
                last_occurrence
                    .get(tag.as_str())
                    .is_some_and(|&last| is_recent(*played, last, window))
            })
        })
        .map(|a| a.player)
        .collect()
}

/// Strictly later than `last - window`
fn is_recent(played: NaiveDate, last: NaiveDate, window: ActivityWindow) -> bool {
    match last.checked_sub_signed(window.duration()) {
        Some(cutoff) => played > cutoff,
        None => true,
    }
}

fn bump(slot: &mut NaiveDate, date: NaiveDate) {
    if date > *slot {
        *slot = date;
    }
}

#[cfg(test)]
#[path = "active_tests.rs"]
mod active_tests;
