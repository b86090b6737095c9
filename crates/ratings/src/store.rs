//! Rating storage for one ledger

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::player::Player;

/// A player's rating at some point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Rating {
    pub player: Player,
    pub value: f64,
}

/// Maps players to their current rating.
///
/// Players are created lazily on first lookup and never removed. Insertion
/// order is kept so that equal ratings rank in order of first appearance.
#[derive(Debug, Clone)]
pub struct RatingStore {
    start_rating: f64,
    ratings: Vec<Rating>,
    index: HashMap<Player, usize>,
}

impl RatingStore {
    pub fn new(start_rating: f64) -> Self {
        Self {
            start_rating,
            ratings: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get or initialize rating for a player
    pub fn get(&mut self, player: &Player) -> f64 {
        *self.entry(player)
    }

    pub fn set(&mut self, player: &Player, value: f64) {
        *self.entry(player) = value;
    }

    /// The spelling `player` was first stored under. Initializes the player.
    pub fn resolve(&mut self, player: &Player) -> Player {
        let slot = self.slot(player);
        self.ratings[slot].player.clone()
    }

    /// Does not initialize the player
    pub fn contains(&self, player: &Player) -> bool {
        self.index.contains_key(player)
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// All ratings, highest first
    pub fn all_ratings(&self) -> Vec<Rating> {
        let mut result = self.ratings.clone();
        // sort_by is stable: ties keep first-seen order
        result.sort_by(|a, b| b.value.total_cmp(&a.value));
        result
    }

    fn entry(&mut self, player: &Player) -> &mut f64 {
        let slot = self.slot(player);
        &mut self.ratings[slot].value
    }

    fn slot(&mut self, player: &Player) -> usize {
        if let Some(&slot) = self.index.get(player) {
            return slot;
        }
        self.ratings.push(Rating {
            player: player.clone(),
            value: self.start_rating,
        });
        let slot = self.ratings.len() - 1;
        self.index.insert(player.clone(), slot);
        slot
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
