//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use crate::svg::Palette;
use aoc_tiles::{ShowTotals, TileOptions};
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved runtime configuration
pub struct Config {
    /// Resolved star rule and right side, never `auto`
    pub options: TileOptions,
    /// When to add the total stars header above the years
    pub show_totals: ShowTotals,
    /// Render tiles up to day 25 even past the last solved day
    pub create_all_days: bool,
    /// Directory searched for solution files
    pub solutions_dir: PathBuf,
    /// README whose marked section receives the tiles
    pub readme_path: PathBuf,
    /// Tiles state directory (lock file, default session file and images)
    pub aoc_tiles_dir: PathBuf,
    /// Where tile SVGs are written
    pub image_dir: PathBuf,
    /// `year day part seconds` file, required to show runtimes
    pub runtime_file: Option<PathBuf>,
    /// Year filter (empty = all years)
    pub years: Vec<u16>,
    /// `width` attribute of every tile image
    pub tile_width: String,
    /// Tile text, not-completed and top-100 colors
    pub palette: Palette,
    /// Session cookie (zeroized on drop)
    pub session: Option<Zeroizing<String>>,
}

impl Config {
    /// Build config from CLI args, reading the session from env or file
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let aoc_tiles_dir = expand_tilde(&args.aoc_tiles_dir);
        let image_dir = match &args.image_dir {
            Some(dir) => expand_tilde(dir),
            None => aoc_tiles_dir.join("tiles"),
        };
        let session_file = match &args.session_file {
            Some(file) => expand_tilde(file),
            None => aoc_tiles_dir.join("session.cookie"),
        };

        let session = resolve_session(std::env::var(SESSION_ENV).ok(), &session_file)?;
        let options = TileOptions::resolve(
            args.count_as_solved_when.choice(),
            args.what_to_show_on_right_side.choice(),
            session.is_some(),
        );
        log::debug!(
            "Counting solved parts {:?}, right side shows {:?}",
            options.solved_when,
            options.right_side
        );

        let runtime_file = args.runtime_file.as_deref().map(expand_tilde);
        if options.uses_runtime() && runtime_file.is_none() {
            return Err(CliError::Config(
                "--runtime-file is required to show runtimes".to_string(),
            ));
        }

        Ok(Config {
            options,
            show_totals: args.show_total_stars_for_all_years.into(),
            create_all_days: args.create_all_days,
            solutions_dir: expand_tilde(&args.solutions_dir),
            readme_path: expand_tilde(&args.readme_path),
            aoc_tiles_dir,
            image_dir,
            runtime_file,
            years: args.year,
            tile_width: args.tile_width_px,
            palette: Palette {
                text: args.text_color,
                not_completed: args.not_completed_color,
                top100: args.top100_color,
            },
            session,
        })
    }

    /// Lock file whose presence means another run is in progress
    pub fn lock_path(&self) -> PathBuf {
        self.aoc_tiles_dir.join("running.lock")
    }

    /// Directory links in the README are relative to
    pub fn link_base(&self) -> PathBuf {
        match self.readme_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.get(2..).unwrap_or_default());
    }
    path.to_path_buf()
}

/// Session from the environment, else from the session file if it exists
///
/// Blank values count as no session.
fn resolve_session(
    env_session: Option<String>,
    session_file: &Path,
) -> Result<Option<Zeroizing<String>>, CliError> {
    let raw = match env_session {
        Some(session) => Zeroizing::new(session),
        None if session_file.is_file() => {
            log::debug!("Reading session from {}", session_file.display());
            Zeroizing::new(fs::read_to_string(session_file)?)
        }
        None => return Ok(None),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(Some(Zeroizing::new(trimmed.to_string())))
}
