//! Error types for the tiles library

use thiserror::Error;

/// Boxed error produced by a collaborator (fetcher, drawer)
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for parsing a leaderboard document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    /// Runtime substitution was requested without a runtime lookup
    #[error("Runtime data must be provided when runtimes are shown")]
    MissingRuntimeData,
    /// No table region between the era's start marker and the end marker
    #[error("Found no leaderboard table for year {year}")]
    TableNotFound { year: u16 },
    /// A table line did not start with a day number in 1..=25
    #[error("Invalid day in leaderboard line for year {year}: {line:?}")]
    InvalidDay { year: u16, line: String },
    /// A table line did not normalize to 3 or 6 score fields
    #[error("Number of score fields for {year} day {day} is {count}, expected 3 or 6")]
    FieldCount { year: u16, day: u8, count: usize },
}

/// Error type for composing and rendering solve state
#[derive(Debug, Error)]
pub enum TilesError {
    /// Leaderboard document could not be parsed
    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),
    /// The options need the leaderboard but no source was given
    #[error("A leaderboard source is required by the selected options")]
    MissingLeaderboardSource,
    /// Leaderboard document could not be fetched
    #[error("Failed to fetch leaderboard for {year}: {source}")]
    Fetch {
        year: u16,
        #[source]
        source: BoxError,
    },
    /// A tile could not be drawn
    #[error("Failed to draw tile for {year}/{day:02}: {source}")]
    Render {
        year: u16,
        day: u8,
        #[source]
        source: BoxError,
    },
}
