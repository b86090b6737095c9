//! Errors raised by the rating ledgers

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RatingError>;

/// Fatal failures of a rating run. None of them are retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingError {
    /// A settings parameter was zero, negative or NaN
    #[error("invalid Elo settings: {name} must be positive, got {value}")]
    InvalidSettings { name: &'static str, value: f64 },

    /// The active-player window was not a positive duration
    #[error("invalid activity window: {days} days")]
    InvalidWindow { days: i64 },

    /// Both sides scored nothing, so the score fraction is undefined
    #[error("degenerate match in {tournament}: {player_a} vs {player_b} scored 0-0")]
    DegenerateMatch {
        tournament: String,
        player_a: String,
        player_b: String,
    },

    /// Summed game scores do not fit in a `u32`
    #[error("score overflow in {tournament}: {player_a} vs {player_b}")]
    ScoreOverflow {
        tournament: String,
        player_a: String,
        player_b: String,
    },

    /// A match references a player the tournament does not list
    #[error("player {player} is not registered in tournament {tournament}")]
    UnknownPlayer { tournament: String, player: String },

    /// Every tournament needs at least one grouping tag
    #[error("tournament {0} has no tags")]
    MissingTag(String),

    #[error("failed to render report: {0}")]
    Render(String),
}
