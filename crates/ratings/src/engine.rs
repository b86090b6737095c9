//! Replays tournaments through an overall ledger and a chain of seasons

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::active::{active_players, ActivityWindow};
use crate::elo::{EloSettings, EloSystem};
use crate::error::Result;
use crate::history::History;
use crate::ledger::{RatingSystem, Season};
use crate::player::Player;
use crate::report;
use crate::types::Tournament;

/// Drives one rating system over a date-ordered tournament stream.
///
/// Every match goes into the overall season and the current season. After a
/// tournament marked as ending the season, the current season is retired and
/// a fresh one takes its place; the overall season never resets.
pub struct Engine {
    system: Box<dyn RatingSystem>,
    overall: Box<dyn Season>,
    finished: Vec<Box<dyn Season>>,
    current: Box<dyn Season>,
}

impl Engine {
    pub fn new(system: Box<dyn RatingSystem>) -> Self {
        let overall = system.new_season();
        let current = system.new_season();
        Self {
            system,
            overall,
            finished: Vec::new(),
            current,
        }
    }

    pub fn elo(settings: EloSettings) -> Self {
        Self::new(Box::new(EloSystem::new(settings)))
    }

    pub fn name(&self) -> &str {
        self.system.name()
    }

    pub fn process_tournament(&mut self, tournament: &Tournament) -> Result<()> {
        debug!(
            tournament = %tournament.name,
            date = %tournament.date,
            matches = tournament.matches.len(),
            "processing tournament"
        );

        // Reject bad records before either ledger is touched
        tournament.validate()?;

        let mut overall = self.overall.open_tournament(&tournament.name);
        let mut seasonal = self.current.open_tournament(&tournament.name);
        for m in &tournament.matches {
            let (score_a, score_b) = tournament.match_score(m)?;
            overall.add_match(&m.player1, &m.player2, score_a, score_b)?;
            seasonal.add_match(&m.player1, &m.player2, score_a, score_b)?;
        }
        overall.close();
        seasonal.close();

        if tournament.end_of_season {
            let fresh = self.system.new_season();
            let done = std::mem::replace(&mut self.current, fresh);
            self.finished.push(done);
            info!(
                tournament = %tournament.name,
                season = self.finished.len(),
                "season closed"
            );
        }
        Ok(())
    }

    pub fn overall(&self) -> &dyn Season {
        self.overall.as_ref()
    }

    /// Seasons in order, the live one last
    pub fn seasons(&self) -> impl Iterator<Item = &dyn Season> + '_ {
        self.finished
            .iter()
            .chain(std::iter::once(&self.current))
            .map(|s| s.as_ref())
    }

    /// False while no tournament has closed a season
    pub fn has_distinct_seasons(&self) -> bool {
        !self.finished.is_empty()
    }

    /// Render all reports. Seasons that saw no tournament are skipped, and
    /// per-season reports are omitted entirely when there is only one season.
    pub fn reports(&self, active: &[Player]) -> Result<RatingReports> {
        let active: HashSet<Player> = active.iter().cloned().collect();
        let overall = LedgerReport::render("overall", self.overall.history(), Some(&active))?;

        let mut seasons = Vec::new();
        if self.has_distinct_seasons() {
            for (i, season) in self.seasons().enumerate() {
                let label = format!("season{}", i + 1);
                if let Some(report) = LedgerReport::render(&label, season.history(), None)? {
                    seasons.push(report);
                }
            }
        }

        Ok(RatingReports {
            system: self.name().to_string(),
            overall,
            seasons,
        })
    }
}

/// Rendered tables of one ledger
#[derive(Debug, Clone, Serialize)]
pub struct LedgerReport {
    /// `overall` or `season<N>`
    pub label: String,
    pub ranking: String,
    pub active_ranking: Option<String>,
    pub progression: String,
    pub players: Vec<PlayerReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerReport {
    pub player: Player,
    pub ledger: String,
}

impl LedgerReport {
    fn render(
        label: &str,
        history: &History,
        active: Option<&HashSet<Player>>,
    ) -> Result<Option<Self>> {
        let (Some(ranking), Some(progression)) = (
            report::final_ranking(history, None)?,
            report::progression_matrix(history)?,
        ) else {
            return Ok(None);
        };
        let active_ranking = match active {
            Some(set) => report::final_ranking(history, Some(set))?,
            None => None,
        };
        let players = history
            .players()
            .iter()
            .map(|h| -> Result<PlayerReport> {
                Ok(PlayerReport {
                    player: h.player.clone(),
                    ledger: report::player_ledger(h)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(Self {
            label: label.to_string(),
            ranking,
            active_ranking,
            progression,
            players,
        }))
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize)]
pub struct RatingReports {
    pub system: String,
    /// `None` when no tournament was processed
    pub overall: Option<LedgerReport>,
    pub seasons: Vec<LedgerReport>,
}

/// Replay `tournaments` through a fresh Elo engine.
///
/// `tournaments` must be sorted by date; a regression is logged but not
/// corrected.
pub fn replay(tournaments: &[Tournament], settings: &EloSettings) -> Result<Engine> {
    for pair in tournaments.windows(2) {
        if pair[1].date < pair[0].date {
            warn!(
                earlier = %pair[0].name,
                later = %pair[1].name,
                "tournaments are not in date order"
            );
        }
    }

    let mut engine = Engine::elo(*settings);
    for tournament in tournaments {
        engine.process_tournament(tournament)?;
    }
    Ok(engine)
}

/// Replay `tournaments` with Elo and render every report.
pub fn calculate_ratings(
    tournaments: &[Tournament],
    settings: &EloSettings,
    window: ActivityWindow,
) -> Result<RatingReports> {
    let active = active_players(window, tournaments);
    info!(
        tournaments = tournaments.len(),
        active = active.len(),
        "calculating ratings"
    );
    replay(tournaments, settings)?.reports(&active)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod engine_tests;
