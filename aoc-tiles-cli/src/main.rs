//! AOC Tiles - renders Advent of Code progress tiles into a README

mod cli;
mod config;
mod discovery;
mod error;
mod readme;
mod runtime;
mod source;
mod svg;

use aoc_http_client::AocClient;
use aoc_tiles::{Language, SolveStateComposer, YearAggregator};
use chrono::Utc;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use itertools::Itertools;
use source::HttpLeaderboardSource;
use svg::SvgTileDrawer;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise debug with `--verbose`, info without
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;

    let lock = config.lock_path();
    if lock.exists() {
        log::warn!(
            "AoC Tiles is already running, remove {} if this is not the case",
            lock.display()
        );
        return Ok(());
    }

    let languages = discovery::discover(&config.solutions_dir)?;
    let years = years_to_render(&languages, &config.years);
    if years.is_empty() {
        log::warn!("No solutions found in {}", config.solutions_dir.display());
    }

    let runtimes = config
        .runtime_file
        .as_deref()
        .map(runtime::load_runtimes)
        .transpose()?;
    let source = match &config.session {
        Some(session) => Some(HttpLeaderboardSource::new(
            AocClient::new()?,
            session.clone(),
        )),
        None => None,
    };

    let mut composer = SolveStateComposer::new(config.options);
    if let Some(source) = &source {
        composer = composer.with_source(source);
    }
    if let Some(runtimes) = &runtimes {
        composer = composer.with_runtime_data(runtimes);
    }
    let solve_data = composer.compose(&languages, &years)?;

    let drawer = SvgTileDrawer::new(config.options.right_side, config.palette.clone());
    let html = YearAggregator::new(&drawer, &config.image_dir, config.link_base())
        .tile_width(config.tile_width.as_str())
        .create_all_days(config.create_all_days)
        .render(&solve_data, config.show_totals, Utc::now())?;

    let fragment = html.to_string();
    if readme::update_readme(&config.readme_path, &fragment)? {
        log::info!("Updated {}", config.readme_path.display());
    } else {
        log::info!(
            "No {} ... {} section in {}, printing tiles",
            readme::BEGIN_MARKER,
            readme::END_MARKER,
            config.readme_path.display()
        );
        print!("{}", fragment);
    }

    if !solve_data.failures.is_empty() {
        log::warn!(
            "Leaderboard missing for {}",
            solve_data.failures.keys().join(", ")
        );
    }
    Ok(())
}

/// Years some language attempted, narrowed to `filter` unless it is empty
fn years_to_render(languages: &[Language], filter: &[u16]) -> Vec<u16> {
    languages
        .iter()
        .flat_map(Language::years)
        .filter(|year| filter.is_empty() || filter.contains(year))
        .sorted()
        .dedup()
        .collect()
}
