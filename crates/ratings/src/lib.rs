//! Tournament ratings
//!
//! This crate provides:
//! - Elo ratings for best-of-N matches, scaled by points played
//! - An overall ledger plus seasonal ledgers that reset at marked tournaments
//! - Ranking, rating-progression and per-player history reports
//! - Detection of players still active in their tournament series
//!
//! # Usage
//!
//! ```no_run
//! use ratings::{calculate_ratings, ActivityWindow, EloSettings, Tournament};
//!
//! # fn load() -> Vec<Tournament> { Vec::new() }
//! let tournaments = load(); // sorted by date
//! let reports = calculate_ratings(&tournaments, &EloSettings::default(), ActivityWindow::default())?;
//! if let Some(overall) = reports.overall {
//!     print!("{}", overall.ranking);
//! }
//! # Ok::<(), ratings::RatingError>(())
//! ```

mod active;
mod elo;
mod engine;
mod error;
mod history;
mod ledger;
mod player;
pub mod report;
mod store;
mod types;

pub use active::*;
pub use elo::*;
pub use engine::*;
pub use error::*;
pub use history::*;
pub use ledger::*;
pub use player::*;
pub use store::*;
pub use types::*;
