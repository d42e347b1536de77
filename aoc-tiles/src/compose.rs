//! Solve-state composition
//!
//! Merges leaderboard snapshots with local solution evidence into per-year,
//! per-day star counts and contributing languages.

use crate::error::{BoxError, TilesError};
use crate::evidence::Language;
use crate::leaderboard::{DayScores, LeaderboardParser, LeaderboardSnapshot, RuntimeLookup};
use crate::policy::TileOptions;
use crate::{DAYS, LAST_DAY, MAX_STARS};
use itertools::{Itertools, iproduct};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Provider of raw leaderboard documents, keyed by year
pub trait LeaderboardSource {
    fn fetch(&self, year: u16) -> Result<String, BoxError>;
}

impl<F> LeaderboardSource for F
where
    F: Fn(u16) -> Result<String, BoxError>,
{
    fn fetch(&self, year: u16) -> Result<String, BoxError> {
        self(year)
    }
}

/// A language that attempted a day, with its code file if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySolution {
    pub language: String,
    pub code_file: Option<PathBuf>,
}

/// Composed state of one year
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearData {
    /// Leaderboard records; empty when the leaderboard was not needed
    pub day_to_scores: LeaderboardSnapshot,
    /// Attempting languages per day, in processing order
    pub day_to_solutions: BTreeMap<u8, Vec<DaySolution>>,
    /// Stars per day (0..=2)
    pub day_to_stars: BTreeMap<u8, u8>,
}

impl YearData {
    pub fn new(day_to_scores: LeaderboardSnapshot) -> Self {
        Self {
            day_to_scores,
            ..Self::default()
        }
    }

    /// Fold one language's view of a day into the running state
    ///
    /// Stars only ever upgrade. A single star on the last day counts as two, since its
    /// second star is granted without a puzzle.
    pub fn fold_day(&mut self, day: u8, solution: DaySolution, stars: u8) {
        let stars = match stars.min(MAX_STARS) {
            1 if day == LAST_DAY => MAX_STARS,
            stars => stars,
        };
        let current = self.day_to_stars.entry(day).or_insert(0);
        *current = (*current).max(stars);
        self.day_to_solutions.entry(day).or_default().push(solution);
    }

    /// Stars of a day, 0 when never attempted
    pub fn stars(&self, day: u8) -> u8 {
        self.day_to_stars.get(&day).copied().unwrap_or(0)
    }

    /// Languages that attempted a day
    pub fn solutions(&self, day: u8) -> &[DaySolution] {
        self.day_to_solutions
            .get(&day)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn scores(&self, day: u8) -> Option<&DayScores> {
        self.day_to_scores.get(day)
    }
}

/// Composed state of all years
#[derive(Debug, Default)]
pub struct SolveData {
    pub year_to_data: BTreeMap<u16, YearData>,
    /// Years whose leaderboard could not be fetched or parsed
    pub failures: BTreeMap<u16, TilesError>,
}

/// Builds [`SolveData`] from languages, years and the leaderboard
pub struct SolveStateComposer<'a> {
    options: TileOptions,
    source: Option<&'a dyn LeaderboardSource>,
    runtime_data: Option<&'a dyn RuntimeLookup>,
    parser: LeaderboardParser,
}

impl<'a> SolveStateComposer<'a> {
    pub fn new(options: TileOptions) -> Self {
        Self {
            options,
            source: None,
            runtime_data: None,
            parser: LeaderboardParser::new(),
        }
    }

    /// Set where leaderboard documents come from
    pub fn with_source(mut self, source: &'a dyn LeaderboardSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the runtimes shown with [`RightSide::Runtime`](crate::RightSide::Runtime)
    pub fn with_runtime_data(mut self, runtime_data: &'a dyn RuntimeLookup) -> Self {
        self.runtime_data = Some(runtime_data);
        self
    }

    /// Compose the solve state of every year any language attempted
    ///
    /// Each needed leaderboard is fetched once per year. A year whose leaderboard fails
    /// is recorded in [`SolveData::failures`] and left out; other years still compose.
    ///
    /// # Errors
    ///
    /// Returns an error before composing anything if the options need a leaderboard
    /// source or runtime data that was not provided.
    pub fn compose(
        &self,
        languages: &[Language],
        years: &[u16],
    ) -> Result<SolveData, TilesError> {
        let needs_leaderboard = self.options.needs_leaderboard();
        let source = match self.source {
            Some(source) => Some(source),
            None if needs_leaderboard => return Err(TilesError::MissingLeaderboardSource),
            None => None,
        };
        if self.options.uses_runtime() && self.runtime_data.is_none() {
            return Err(crate::LeaderboardError::MissingRuntimeData.into());
        }

        let years: Vec<u16> = years.iter().copied().unique().collect();
        let mut solve_data = SolveData::default();

        for &year in &years {
            if !languages.iter().any(|language| language.attempted_year(year)) {
                log::debug!("No solutions for {}, skipping", year);
                continue;
            }

            let snapshot = match source.filter(|_| needs_leaderboard) {
                Some(source) => match self.fetch_snapshot(source, year) {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        log::warn!("Skipping {}: {}", year, e);
                        solve_data.failures.insert(year, e);
                        continue;
                    }
                },
                None => LeaderboardSnapshot::empty(),
            };
            solve_data.year_to_data.insert(year, YearData::new(snapshot));
        }

        for (language, &year) in iproduct!(languages, &years) {
            let Some(year_data) = solve_data.year_to_data.get_mut(&year) else {
                continue;
            };

            for day in DAYS.filter(|&day| language.ran(year, day)) {
                let ranked_parts = year_data.scores(day).map_or(0, DayScores::ranked_parts);
                let stars = self
                    .options
                    .solved_when
                    .decide(ranked_parts, language.file_count(year, day));
                let solution = DaySolution {
                    language: language.name().to_string(),
                    code_file: language.code_file(year, day).map(PathBuf::from),
                };
                year_data.fold_day(day, solution, stars);
            }
            log::debug!("Folded {} into {}", language.name(), year);
        }

        Ok(solve_data)
    }

    fn fetch_snapshot(
        &self,
        source: &dyn LeaderboardSource,
        year: u16,
    ) -> Result<LeaderboardSnapshot, TilesError> {
        log::debug!("Fetching leaderboard for {}", year);
        let document = source
            .fetch(year)
            .map_err(|source| TilesError::Fetch { year, source })?;
        let snapshot = self.parser.parse(
            &document,
            year,
            self.options.uses_runtime(),
            self.runtime_data,
        )?;
        Ok(snapshot)
    }
}
