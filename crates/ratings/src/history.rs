//! Per-ledger history: rating snapshots and player match records

use serde::Serialize;
use std::collections::HashMap;

use crate::player::Player;
use crate::store::Rating;

/// One match seen from one player's side
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MatchRecord {
    pub tournament: String,
    pub player: Player,
    pub rating: f64,
    pub delta: f64,
    pub score: u32,
    pub opponent_score: u32,
    pub opponent: Player,
    pub opponent_rating: f64,
    pub opponent_delta: f64,
}

impl MatchRecord {
    /// The same match from the opponent's side
    pub fn mirrored(&self) -> Self {
        Self {
            tournament: self.tournament.clone(),
            player: self.opponent.clone(),
            rating: self.opponent_rating,
            delta: self.opponent_delta,
            score: self.opponent_score,
            opponent_score: self.score,
            opponent: self.player.clone(),
            opponent_rating: self.rating,
            opponent_delta: self.delta,
        }
    }
}

/// A player's matches within one tournament
#[derive(Debug, Clone, Serialize)]
pub struct TournamentBlock {
    pub tournament: String,
    pub records: Vec<MatchRecord>,
}

/// All of a player's matches in chronological order
#[derive(Debug, Clone, Serialize)]
pub struct PlayerHistory {
    pub player: Player,
    pub tournaments: Vec<TournamentBlock>,
}

impl PlayerHistory {
    pub fn match_count(&self) -> usize {
        self.tournaments.iter().map(|t| t.records.len()).sum()
    }
}

/// Ratings after a tournament closed
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub tournament: String,
    pub ratings: Vec<Rating>,
}

/// Records collected while a tournament is open
#[derive(Debug, Clone)]
pub struct TournamentHistory {
    name: String,
    players: Vec<PlayerHistory>,
    index: HashMap<Player, usize>,
}

impl TournamentHistory {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            players: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_record(&mut self, record: MatchRecord) {
        let slot = slot_for(&mut self.players, &mut self.index, &record.player);
        let blocks = &mut self.players[slot].tournaments;
        match blocks.last_mut() {
            Some(block) => block.records.push(record),
            None => blocks.push(TournamentBlock {
                tournament: self.name.clone(),
                records: vec![record],
            }),
        }
    }
}

/// Append-only history of one ledger
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    players: Vec<PlayerHistory>,
    index: HashMap<Player, usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a closed tournament: its snapshot and every player's block.
    pub fn record_tournament(&mut self, tournament: TournamentHistory, ratings: Vec<Rating>) {
        self.entries.push(HistoryEntry {
            tournament: tournament.name,
            ratings,
        });
        for pending in tournament.players {
            let slot = slot_for(&mut self.players, &mut self.index, &pending.player);
            self.players[slot].tournaments.extend(pending.tournaments);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Players in order of their first match
    pub fn players(&self) -> &[PlayerHistory] {
        &self.players
    }

    pub fn player(&self, player: &Player) -> Option<&PlayerHistory> {
        self.index.get(player).map(|&slot| &self.players[slot])
    }

    pub fn has_matches(&self, player: &Player) -> bool {
        self.player(player).is_some_and(|h| h.match_count() > 0)
    }

    /// Snapshot taken after the most recent tournament
    pub fn final_ratings(&self) -> Option<&[Rating]> {
        self.entries.last().map(|e| e.ratings.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn slot_for(
    players: &mut Vec<PlayerHistory>,
    index: &mut HashMap<Player, usize>,
    player: &Player,
) -> usize {
    if let Some(&slot) = index.get(player) {
        return slot;
    }
    players.push(PlayerHistory {
        player: player.clone(),
        tournaments: Vec::new(),
    });
    index.insert(player.clone(), players.len() - 1);
    players.len() - 1
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
