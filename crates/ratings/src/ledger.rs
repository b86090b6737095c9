//! Rating system abstraction
//!
//! A [`RatingSystem`] produces [`Season`]s. A season owns its rating store and
//! history; tournaments are applied to it through a short-lived
//! [`TournamentLedger`] handle that borrows the season until it is closed.

use crate::error::Result;
use crate::history::History;
use crate::player::Player;
use crate::store::Rating;

/// Trait implemented by every rating algorithm.
///
/// Elo is the only implementation today; the engine only talks to this
/// trait so another algorithm can be dropped in without touching it.
pub trait RatingSystem {
    /// Short identifier, used as the report directory name
    fn name(&self) -> &str;

    /// A fresh ledger with every player at the start rating
    fn new_season(&self) -> Box<dyn Season>;
}

/// One ledger: a rating store plus the history accumulated in it.
pub trait Season {
    /// Start applying a tournament. The season cannot be used again until
    /// the returned handle is closed or dropped.
    fn open_tournament(&mut self, name: &str) -> Box<dyn TournamentLedger + '_>;

    /// Current ratings, highest first
    fn snapshot_ratings(&self) -> Vec<Rating>;

    fn history(&self) -> &History;
}

/// An open tournament inside a season.
///
/// Dropping the handle without calling [`TournamentLedger::close`] keeps the
/// rating changes but records nothing in the history.
pub trait TournamentLedger {
    /// Apply one match and return the rating change of `player_a`.
    fn add_match(
        &mut self,
        player_a: &Player,
        player_b: &Player,
        score_a: u32,
        score_b: u32,
    ) -> Result<f64>;

    /// Snapshot the ratings into the season history.
    fn close(self: Box<Self>);
}
