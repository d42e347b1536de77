//! Advent of Code progress tiles
//!
//! Builds the data behind a README progress board: how many stars each day earned,
//! which languages solved it, and what each day's tile shows.
//!
//! # Overview
//!
//! - [`LeaderboardParser`] turns a personal leaderboard document into a
//!   [`LeaderboardSnapshot`] of per-day [`DayScores`]
//! - [`SolvedWhen`] reconciles leaderboard ranks with local solution files
//! - [`SolveStateComposer`] folds every [`Language`] into per-year [`YearData`]
//! - [`YearAggregator`] totals each year, has tiles drawn by a [`TileDrawer`] and
//!   emits the [`Html`] fragment
//!
//! # Example
//!
//! ```
//! use aoc_tiles::{Language, SolveStateComposer, TileOptions};
//!
//! let rust = Language::new("Rust")
//!     .with_file(2023, 1, "2023/day_01/part1.rs")
//!     .with_file(2023, 1, "2023/day_01/part2.rs");
//!
//! // No session: stars come from local files only
//! let options = TileOptions::resolve(None, None, false);
//! let solve_data = SolveStateComposer::new(options)
//!     .compose(&[rust], &[2023])
//!     .unwrap();
//!
//! assert_eq!(solve_data.year_to_data[&2023].stars(1), 2);
//! ```

mod compose;
mod error;
mod evidence;
mod html;
mod leaderboard;
mod policy;
mod year;

use std::ops::RangeInclusive;

pub use compose::{DaySolution, LeaderboardSource, SolveData, SolveStateComposer, YearData};
pub use error::{BoxError, LeaderboardError, TilesError};
pub use evidence::Language;
pub use html::{Html, escape_text};
pub use leaderboard::{
    DayScores, FormatEra, LeaderboardParser, LeaderboardSnapshot, NO_STARS_SENTINEL, PartScore,
    RuntimeLookup, format_runtime,
};
pub use policy::{MAX_STARS, RightSide, ShowTotals, SolvedWhen, TileOptions};
pub use year::{Tile, TileDrawer, YearAggregator, add_total_header, total_possible_stars};

/// First Advent of Code year
pub const FIRST_YEAR: u16 = 2015;
/// Last puzzle day of a year
pub const LAST_DAY: u8 = 25;
/// Puzzle days of a year
pub const DAYS: RangeInclusive<u8> = 1..=LAST_DAY;
