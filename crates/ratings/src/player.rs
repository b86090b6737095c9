//! Player identity
//!
//! A player is identified by two name parts. The order of the parts does not
//! matter: "Ivan Petrov" and "Petrov Ivan" are the same player.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    first: String,
    second: String,
}

impl Player {
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Build a player from a "First Second" string as it appears in logs.
    ///
    /// The name is split at the first space. Any further spaces are dropped
    /// and `ё` is folded to `е`, so spelling variants collapse to one player.
    pub fn from_full_name(full_name: &str) -> Self {
        let (first, second) = full_name
            .trim()
            .split_once(' ')
            .unwrap_or((full_name.trim(), ""));
        Self::new(normalize_part(first), normalize_part(second))
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Both parts with the alphabetically larger one first
    fn canonical(&self) -> (&str, &str) {
        if self.first < self.second {
            (&self.second, &self.first)
        } else {
            (&self.first, &self.second)
        }
    }
}

fn normalize_part(part: &str) -> String {
    part.chars()
        .filter(|c| *c != ' ')
        .map(|c| match c {
            'ё' => 'е',
            'Ё' => 'Е',
            other => other,
        })
        .collect()
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Player {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Player {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.second.is_empty() {
            write!(f, "{}", self.first)
        } else {
            write!(f, "{} {}", self.first, self.second)
        }
    }
}

#[cfg(test)]
#[path = "player_tests.rs"]
mod player_tests;
