//! Elo rating calculation and tracking
//!
//! Ratings move by `points * rating_per_point * (actual - expected)`, so a
//! 10-8 match moves ratings more than a 2-0 one even when the share of
//! points is similar.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{RatingError, Result};
use crate::history::{History, MatchRecord, TournamentHistory};
use crate::ledger::{RatingSystem, Season, TournamentLedger};
use crate::player::Player;
use crate::store::{Rating, RatingStore};

/// Default starting rating for new players
pub const DEFAULT_START_RATING: f64 = 1000.0;

/// Rating moved per point played (higher = more volatile)
pub const DEFAULT_RATING_PER_POINT: f64 = 16.0;

pub const DEFAULT_LOGISTIC_BASE: f64 = 10.0;

pub const DEFAULT_LOGISTIC_DENOMINATOR: f64 = 400.0;

/// Parameters of the Elo curve. All values are strictly positive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawEloSettings")]
pub struct EloSettings {
    start_rating: f64,
    rating_per_point: f64,
    logistic_base: f64,
    logistic_denominator: f64,
}

#[derive(Deserialize)]
struct RawEloSettings {
    start_rating: f64,
    rating_per_point: f64,
    logistic_base: f64,
    logistic_denominator: f64,
}

impl TryFrom<RawEloSettings> for EloSettings {
    type Error = RatingError;

    fn try_from(raw: RawEloSettings) -> Result<Self> {
        Self::new(
            raw.start_rating,
            raw.rating_per_point,
            raw.logistic_base,
            raw.logistic_denominator,
        )
    }
}

impl EloSettings {
    pub fn new(
        start_rating: f64,
        rating_per_point: f64,
        logistic_base: f64,
        logistic_denominator: f64,
    ) -> Result<Self> {
        for (name, value) in [
            ("start_rating", start_rating),
            ("rating_per_point", rating_per_point),
            ("logistic_base", logistic_base),
            ("logistic_denominator", logistic_denominator),
        ] {
            // Written this way round so NaN is rejected too
            if !(value > 0.0) {
                return Err(RatingError::InvalidSettings { name, value });
            }
        }
        Ok(Self {
            start_rating,
            rating_per_point,
            logistic_base,
            logistic_denominator,
        })
    }

    /// Classic chess curve (base 10, 400 points) starting at 1000
    pub fn standard(rating_per_point: f64) -> Result<Self> {
        Self::new(
            DEFAULT_START_RATING,
            rating_per_point,
            DEFAULT_LOGISTIC_BASE,
            DEFAULT_LOGISTIC_DENOMINATOR,
        )
    }

    pub fn start_rating(&self) -> f64 {
        self.start_rating
    }

    pub fn rating_per_point(&self) -> f64 {
        self.rating_per_point
    }

    pub fn logistic_base(&self) -> f64 {
        self.logistic_base
    }

    pub fn logistic_denominator(&self) -> f64 {
        self.logistic_denominator
    }
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            start_rating: DEFAULT_START_RATING,
            rating_per_point: DEFAULT_RATING_PER_POINT,
            logistic_base: DEFAULT_LOGISTIC_BASE,
            logistic_denominator: DEFAULT_LOGISTIC_DENOMINATOR,
        }
    }
}

/// Expected share of points for a player rated `rating` against `opponent_rating`
pub fn expected_score(rating: f64, opponent_rating: f64, settings: &EloSettings) -> f64 {
    let diff = (opponent_rating - rating) / settings.logistic_denominator;
    1.0 / (1.0 + settings.logistic_base.powf(diff))
}

/// Rating change for the first player. The opponent moves by the negation.
pub fn rating_change(
    rating: f64,
    opponent_rating: f64,
    score_fraction: f64,
    change_factor: f64,
    settings: &EloSettings,
) -> f64 {
    change_factor * (score_fraction - expected_score(rating, opponent_rating, settings))
}

/// Elo implementation of [`RatingSystem`]
#[derive(Debug, Clone, Default)]
pub struct EloSystem {
    settings: EloSettings,
}

impl EloSystem {
    pub fn new(settings: EloSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EloSettings {
        &self.settings
    }
}

impl RatingSystem for EloSystem {
    fn name(&self) -> &str {
        "elo"
    }

    fn new_season(&self) -> Box<dyn Season> {
        Box::new(EloSeason::new(self.settings))
    }
}

/// One Elo ledger
#[derive(Debug, Clone)]
pub struct EloSeason {
    settings: EloSettings,
    ratings: RatingStore,
    history: History,
}

impl EloSeason {
    pub fn new(settings: EloSettings) -> Self {
        Self {
            settings,
            ratings: RatingStore::new(settings.start_rating),
            history: History::new(),
        }
    }

    /// Concrete counterpart of [`Season::open_tournament`]
    pub fn tournament(&mut self, name: &str) -> EloTournament<'_> {
        EloTournament {
            settings: &self.settings,
            ratings: &mut self.ratings,
            history: &mut self.history,
            pending: TournamentHistory::new(name),
        }
    }

    pub fn ratings(&self) -> &RatingStore {
        &self.ratings
    }
}

impl Season for EloSeason {
    fn open_tournament(&mut self, name: &str) -> Box<dyn TournamentLedger + '_> {
        Box::new(self.tournament(name))
    }

    fn snapshot_ratings(&self) -> Vec<Rating> {
        self.ratings.all_ratings()
    }

    fn history(&self) -> &History {
        &self.history
    }
}

/// An open tournament borrowing an [`EloSeason`]
pub struct EloTournament<'a> {
    settings: &'a EloSettings,
    ratings: &'a mut RatingStore,
    history: &'a mut History,
    pending: TournamentHistory,
}

impl EloTournament<'_> {
    /// Update ratings after a match
    pub fn add_match(
        &mut self,
        player_a: &Player,
        player_b: &Player,
        score_a: u32,
        score_b: u32,
    ) -> Result<f64> {
        let total = score_a
            .checked_add(score_b)
            .ok_or_else(|| RatingError::ScoreOverflow {
                tournament: self.pending.name().to_string(),
                player_a: player_a.to_string(),
                player_b: player_b.to_string(),
            })?;
        if total == 0 {
            return Err(RatingError::DegenerateMatch {
                tournament: self.pending.name().to_string(),
                player_a: player_a.to_string(),
                player_b: player_b.to_string(),
            });
        }

        // Records use the stored spelling so a report names each player once
        let player_a = &self.ratings.resolve(player_a);
        let player_b = &self.ratings.resolve(player_b);
        let rating_a = self.ratings.get(player_a);
        let rating_b = self.ratings.get(player_b);
        let total = f64::from(total);
        let change = rating_change(
            rating_a,
            rating_b,
            f64::from(score_a) / total,
            total * self.settings.rating_per_point,
            self.settings,
        );

        let record = MatchRecord {
            tournament: self.pending.name().to_string(),
            player: player_a.clone(),
            rating: rating_a,
            delta: change,
            score: score_a,
            opponent_score: score_b,
            opponent: player_b.clone(),
            opponent_rating: rating_b,
            opponent_delta: -change,
        };
        let mirrored = record.mirrored();
        self.pending.add_record(record);
        self.pending.add_record(mirrored);
        self.ratings.set(player_a, rating_a + change);
        self.ratings.set(player_b, rating_b - change);

        trace!(
            tournament = self.pending.name(),
            %player_a,
            %player_b,
            score_a,
            score_b,
            change,
            "match applied"
        );
        Ok(change)
    }

    pub fn close(self) {
        let snapshot = self.ratings.all_ratings();
        self.history.record_tournament(self.pending, snapshot);
    }
}

impl TournamentLedger for EloTournament<'_> {
    fn add_match(
        &mut self,
        player_a: &Player,
        player_b: &Player,
        score_a: u32,
        score_b: u32,
    ) -> Result<f64> {
        EloTournament::add_match(self, player_a, player_b, score_a, score_b)
    }

    fn close(self: Box<Self>) {
        EloTournament::close(*self)
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
