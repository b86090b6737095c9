//! Canonical tournament records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RatingError, Result};
use crate::player::Player;

/// Result of a single game
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Game {
    pub score1: u32,
    pub score2: u32,
}

impl Game {
    pub fn new(score1: u32, score2: u32) -> Self {
        Self { score1, score2 }
    }
}

/// A best-of-N match between two players
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub player1: Player,
    pub player2: Player,
    pub games: Vec<Game>,
}

impl Match {
    pub fn new(player1: Player, player2: Player, games: Vec<Game>) -> Self {
        Self {
            player1,
            player2,
            games,
        }
    }

    /// Aggregate score of both sides over all games, `None` on overflow
    pub fn score(&self) -> Option<(u32, u32)> {
        self.games.iter().try_fold((0u32, 0u32), |(a, b), game| {
            Some((a.checked_add(game.score1)?, b.checked_add(game.score2)?))
        })
    }

    pub fn total_points(&self) -> Option<u32> {
        let (a, b) = self.score()?;
        a.checked_add(b)
    }
}

/// One tournament as produced by log ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
    pub matches: Vec<Match>,
    /// Sorted and deduplicated
    pub players: Vec<Player>,
    /// Closes the current season once processed
    pub end_of_season: bool,
}

impl Tournament {
    /// Build a tournament, deriving its player set from the matches.
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        tags: Vec<String>,
        matches: Vec<Match>,
        end_of_season: bool,
    ) -> Result<Self> {
        let mut players: Vec<Player> = matches
            .iter()
            .flat_map(|m| [m.player1.clone(), m.player2.clone()])
            .collect();
        players.sort();
        players.dedup();

        let tournament = Self {
            name: name.into(),
            date,
            tags,
            matches,
            players,
            end_of_season,
        };
        tournament.validate()?;
        Ok(tournament)
    }

    /// Check that the record is usable by the ledgers
    pub fn validate(&self) -> Result<()> {
        if self.tags.is_empty() {
            return Err(RatingError::MissingTag(self.name.clone()));
        }
        for m in &self.matches {
            self.match_score(m)?;
            for player in [&m.player1, &m.player2] {
                if !self.has_player(player) {
                    return Err(RatingError::UnknownPlayer {
                        tournament: self.name.clone(),
                        player: player.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Score of a match in this tournament. Both sides and their sum must fit
    /// in a `u32`.
    pub fn match_score(&self, m: &Match) -> Result<(u32, u32)> {
        match (m.score(), m.total_points()) {
            (Some(score), Some(_)) => Ok(score),
            _ => Err(RatingError::ScoreOverflow {
                tournament: self.name.clone(),
                player_a: m.player1.to_string(),
                player_b: m.player2.to_string(),
            }),
        }
    }

    pub fn has_player(&self, player: &Player) -> bool {
        self.players.contains(player)
    }
}

/// All distinct players across the tournaments, in order of first appearance
pub fn unique_players(tournaments: &[Tournament]) -> Vec<Player> {
    let mut seen = std::collections::HashSet::new();
    tournaments
        .iter()
        .flat_map(|t| t.players.iter())
        .filter(|p| seen.insert((*p).clone()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
