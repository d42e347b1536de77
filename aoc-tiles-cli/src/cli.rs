//! CLI argument parsing using clap

use aoc_tiles::{RightSide, ShowTotals, SolvedWhen};
use clap::{Parser, ValueEnum};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

static COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("color pattern is valid")
});

/// What each tile shows on its right side
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum RightSideArg {
    /// `time-and-rank` with a session cookie, `checkmark` without
    #[default]
    Auto,
    /// A checkmark for each solved part
    Checkmark,
    /// Time and rank on the leaderboard (requires a session cookie)
    #[value(alias = "time_and_rank")]
    TimeAndRank,
    /// Measured runtime of each part (requires a runtime file)
    Runtime,
}

impl RightSideArg {
    /// The concrete choice, `None` for auto
    pub fn choice(self) -> Option<RightSide> {
        match self {
            RightSideArg::Auto => None,
            RightSideArg::Checkmark => Some(RightSide::Checkmark),
            RightSideArg::TimeAndRank => Some(RightSide::TimeAndRank),
            RightSideArg::Runtime => Some(RightSide::Runtime),
        }
    }
}

/// When a part counts as solved
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SolvedWhenArg {
    /// `both` with a session cookie, `file-exists` without
    #[default]
    Auto,
    /// Ranked on the personal leaderboard
    #[value(alias = "on_leaderboard")]
    OnLeaderboard,
    /// A solution file exists locally
    #[value(alias = "file_exists")]
    FileExists,
    /// On the leaderboard or a file exists
    Either,
    /// On the leaderboard and a file exists
    Both,
}

impl SolvedWhenArg {
    /// The concrete choice, `None` for auto
    pub fn choice(self) -> Option<SolvedWhen> {
        match self {
            SolvedWhenArg::Auto => None,
            SolvedWhenArg::OnLeaderboard => Some(SolvedWhen::OnLeaderboard),
            SolvedWhenArg::FileExists => Some(SolvedWhen::FileExists),
            SolvedWhenArg::Either => Some(SolvedWhen::Either),
            SolvedWhenArg::Both => Some(SolvedWhen::Both),
        }
    }
}

/// Whether to add the all-years total header
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ShowTotalsArg {
    No,
    /// Only with stars in at least three years
    #[default]
    Auto,
    Yes,
}

impl From<ShowTotalsArg> for ShowTotals {
    fn from(arg: ShowTotalsArg) -> Self {
        match arg {
            ShowTotalsArg::No => ShowTotals::No,
            ShowTotalsArg::Auto => ShowTotals::Auto,
            ShowTotalsArg::Yes => ShowTotals::Yes,
        }
    }
}

/// Check a `#rgb` or `#rrggbb` color
fn parse_color(value: &str) -> Result<String, String> {
    if COLOR.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(format!("expected #rgb or #rrggbb, got {:?}", value))
    }
}

/// Advent of Code progress tiles for your README
#[derive(Parser, Debug)]
#[command(
    name = "aoc-tiles",
    about = "Render Advent of Code progress tiles into a README",
    version
)]
pub struct Args {
    /// What to display on the right side of each tile
    #[arg(long, value_enum, default_value = "auto")]
    pub what_to_show_on_right_side: RightSideArg,

    /// Condition to count a part as solved
    #[arg(long, value_enum, default_value = "auto")]
    pub count_as_solved_when: SolvedWhenArg,

    /// Add a header with the stars of all years
    #[arg(long, value_enum, default_value = "auto")]
    pub show_total_stars_for_all_years: ShowTotalsArg,

    /// Create tiles for all 25 days instead of up to the last solved day
    #[arg(long)]
    pub create_all_days: bool,

    /// Directory searched for solution files
    #[arg(long, default_value = ".")]
    pub solutions_dir: PathBuf,

    /// README whose tile section is replaced
    #[arg(long, default_value = "README.md")]
    pub readme_path: PathBuf,

    /// Working directory for tiles, session cookie and lock file
    #[arg(long, default_value = ".aoc_tiles")]
    pub aoc_tiles_dir: PathBuf,

    /// Directory the tile images are written to [default: <AOC_TILES_DIR>/tiles]
    #[arg(long)]
    pub image_dir: Option<PathBuf>,

    /// File holding the session cookie [default: <AOC_TILES_DIR>/session.cookie]
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// File with measured runtimes, one `year day part seconds` entry per line
    #[arg(long)]
    pub runtime_file: Option<PathBuf>,

    /// Only render these years (renders all found years if omitted)
    #[arg(short, long)]
    pub year: Vec<u16>,

    /// Width of each tile in the README
    #[arg(long, default_value = "161px")]
    pub tile_width_px: String,

    /// Text color
    #[arg(long, default_value = "#FFFFFF", value_parser = parse_color)]
    pub text_color: String,

    /// Background of days without stars
    #[arg(long, default_value = "#333333", value_parser = parse_color)]
    pub not_completed_color: String,

    /// Color of ranks within the top 100
    #[arg(long, default_value = "#FFDD00", value_parser = parse_color)]
    pub top100_color: String,

    /// Log progress in detail
    #[arg(short, long)]
    pub verbose: bool,
}
