//! Per-year aggregation and markup emission

use crate::compose::{SolveData, YearData};
use crate::error::{BoxError, TilesError};
use crate::html::Html;
use crate::leaderboard::DayScores;
use crate::policy::ShowTotals;
use crate::{FIRST_YEAR, LAST_DAY};
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use itertools::Itertools;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Hours after midnight UTC at which a puzzle unlocks
const UNLOCK_HOUR_UTC: i64 = 5;

/// Everything a drawer needs for one day
#[derive(Debug, Clone, Copy)]
pub struct Tile<'a> {
    pub year: u16,
    pub day: u8,
    /// Distinct contributing languages, in processing order
    pub languages: &'a [String],
    pub scores: Option<&'a DayScores>,
    pub stars: u8,
}

/// Renders a tile image for one day
pub trait TileDrawer {
    /// File extension of the written tiles, without dot
    fn file_extension(&self) -> &str;

    fn draw_tile(&self, tile: &Tile<'_>, path: &Path) -> Result<(), BoxError>;
}

impl YearData {
    /// Sum of stars over all days
    pub fn total_stars(&self) -> u32 {
        self.day_to_stars.values().map(|&stars| u32::from(stars)).sum()
    }

    /// Languages present on every attempted day, sorted
    ///
    /// Empty when no single language covers the whole year.
    pub fn daily_languages(&self) -> Vec<String> {
        let mut common: Option<BTreeSet<&str>> = None;
        for solutions in self.day_to_solutions.values().filter(|s| !s.is_empty()) {
            let names: BTreeSet<&str> = solutions.iter().map(|s| s.language.as_str()).collect();
            common = Some(match common {
                None => names,
                Some(common) => common.intersection(&names).copied().collect(),
            });
        }
        common
            .unwrap_or_default()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Last day with at least one star, 0 if none
    pub fn last_solved_day(&self) -> u8 {
        self.day_to_stars
            .iter()
            .filter(|(_, stars)| **stars > 0)
            .map(|(day, _)| *day)
            .max()
            .unwrap_or(0)
    }
}

/// Stars released up to `now`, two per unlocked day since the first year
pub fn total_possible_stars(now: DateTime<Utc>) -> u32 {
    let unlocked = now - TimeDelta::hours(UNLOCK_HOUR_UTC);
    let current_year = unlocked.year();
    (i32::from(FIRST_YEAR)..=current_year)
        .map(|year| {
            let days = if year < current_year {
                u32::from(LAST_DAY)
            } else if unlocked.month() == 12 {
                unlocked.day().min(u32::from(LAST_DAY))
            } else {
                0
            };
            2 * days
        })
        .sum()
}

/// Emits the markup of composed years and has their tiles drawn
pub struct YearAggregator<'a> {
    drawer: &'a dyn TileDrawer,
    image_dir: PathBuf,
    link_base: PathBuf,
    tile_width: String,
    create_all_days: bool,
}

impl<'a> YearAggregator<'a> {
    /// Tiles go to `image_dir`; links are made relative to `link_base`
    pub fn new(
        drawer: &'a dyn TileDrawer,
        image_dir: impl Into<PathBuf>,
        link_base: impl Into<PathBuf>,
    ) -> Self {
        Self {
            drawer,
            image_dir: image_dir.into(),
            link_base: link_base.into(),
            tile_width: "161px".to_string(),
            create_all_days: false,
        }
    }

    pub fn tile_width(mut self, width: impl Into<String>) -> Self {
        self.tile_width = width.into();
        self
    }

    /// Render all days up to the last one instead of up to the last solved day
    pub fn create_all_days(mut self, create_all_days: bool) -> Self {
        self.create_all_days = create_all_days;
        self
    }

    /// Render every composed year, newest first, with the optional total header
    pub fn render(
        &self,
        solve_data: &SolveData,
        show_totals: ShowTotals,
        now: DateTime<Utc>,
    ) -> Result<Html, TilesError> {
        let mut html = Html::new();
        add_total_header(solve_data, &mut html, show_totals, now);
        for (&year, data) in solve_data.year_to_data.iter().rev() {
            self.render_year(year, data, &mut html)?;
        }
        Ok(html)
    }

    /// Render the header and tiles of one year
    pub fn render_year(
        &self,
        year: u16,
        data: &YearData,
        html: &mut Html,
    ) -> Result<(), TilesError> {
        log::info!("Generating tiles for {}", year);
        let mut header = format!("{} - {} ⭐", year, data.total_stars());
        let languages = data.daily_languages();
        if !languages.is_empty() {
            header.push_str(" - ");
            header.push_str(&languages.join("/"));
        }
        html.tag("h1", &[("align", "center")], |h| h.push(&header));

        let max_day = if self.create_all_days {
            LAST_DAY
        } else {
            data.last_solved_day()
        };
        if max_day == 0 {
            log::info!("{} has no solved days", year);
        }

        for day in 1..=max_day {
            self.render_day(year, day, data, html)?;
        }
        Ok(())
    }

    fn render_day(
        &self,
        year: u16,
        day: u8,
        data: &YearData,
        html: &mut Html,
    ) -> Result<(), TilesError> {
        let solutions = data.solutions(day);
        let languages: Vec<String> = solutions
            .iter()
            .map(|s| s.language.clone())
            .unique()
            .collect();

        let tile_path = self
            .image_dir
            .join(format!("{:04}", year))
            .join(format!("{:02}.{}", day, self.drawer.file_extension()));
        let tile = Tile {
            year,
            day,
            languages: &languages,
            scores: data.scores(day),
            stars: data.stars(day),
        };
        self.drawer
            .draw_tile(&tile, &tile_path)
            .map_err(|source| TilesError::Render { year, day, source })?;

        let src = self.link(&tile_path);
        let image = |h: &mut Html| {
            h.void_tag(
                "img",
                &[("src", src.as_str()), ("width", self.tile_width.as_str())],
            )
        };
        match solutions.first().and_then(|s| s.code_file.as_deref()) {
            Some(code_file) => {
                let href = self.link(code_file);
                html.tag("a", &[("href", href.as_str())], image);
            }
            None => image(html),
        }
        Ok(())
    }

    /// Path relative to the link base, with forward slashes
    ///
    /// Paths outside the link base get `..` segments. The path is kept as given if
    /// either side cannot be made absolute.
    fn link(&self, path: &Path) -> String {
        let relative = match (std::path::absolute(path), std::path::absolute(&self.link_base)) {
            (Ok(path), Ok(base)) => pathdiff::diff_paths(path, base),
            _ => None,
        };
        relative
            .as_deref()
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }
}

/// Add the all-years total header if `show_totals` asks for it
pub fn add_total_header(
    solve_data: &SolveData,
    html: &mut Html,
    show_totals: ShowTotals,
    now: DateTime<Utc>,
) {
    if !show_totals.shows(solve_data.year_to_data.len()) {
        return;
    }
    let total: u32 = solve_data
        .year_to_data
        .values()
        .map(YearData::total_stars)
        .sum();
    let possible = total_possible_stars(now);
    html.tag("h1", &[("align", "center")], |h| {
        h.push(format!("Advent of Code - {}/{} ⭐", total, possible))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::DaySolution;
    use chrono::TimeZone;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingDrawer {
        drawn: RefCell<Vec<(u16, u8, Vec<String>, u8, PathBuf)>>,
    }

    impl TileDrawer for RecordingDrawer {
        fn file_extension(&self) -> &str {
            "svg"
        }

        fn draw_tile(&self, tile: &Tile<'_>, path: &Path) -> Result<(), BoxError> {
            self.drawn.borrow_mut().push((
                tile.year,
                tile.day,
                tile.languages.to_vec(),
                tile.stars,
                path.to_path_buf(),
            ));
            Ok(())
        }
    }

    struct FailingDrawer;

    impl TileDrawer for FailingDrawer {
        fn file_extension(&self) -> &str {
            "svg"
        }

        fn draw_tile(&self, _tile: &Tile<'_>, _path: &Path) -> Result<(), BoxError> {
            Err("disk full".into())
        }
    }

    fn solution(language: &str, code_file: Option<&str>) -> DaySolution {
        DaySolution {
            language: language.to_string(),
            code_file: code_file.map(PathBuf::from),
        }
    }

    fn sample_year() -> YearData {
        let mut year = YearData::default();
        year.fold_day(1, solution("Rust", Some("/repo/2020/day_01.rs")), 2);
        year.fold_day(1, solution("Python", None), 1);
        year.fold_day(2, solution("Rust", Some("/repo/2020/day_02.rs")), 1);
        year.fold_day(2, solution("Rust", Some("/repo/2020/day_02b.rs")), 1);
        year.fold_day(4, solution("Python", None), 0);
        year
    }

    #[test]
    fn test_year_totals() {
        let year = sample_year();
        assert_eq!(year.total_stars(), 3);
        assert_eq!(year.last_solved_day(), 2);
        assert!(year.daily_languages().is_empty());
        assert_eq!(YearData::default().last_solved_day(), 0);
    }

    #[test]
    fn test_daily_languages_intersection() {
        let mut year = YearData::default();
        year.fold_day(1, solution("Rust", None), 2);
        year.fold_day(1, solution("Python", None), 2);
        year.fold_day(2, solution("Python", None), 2);
        year.fold_day(2, solution("Rust", None), 2);
        year.fold_day(3, solution("Rust", None), 1);
        year.day_to_solutions.insert(4, Vec::new());
        assert_eq!(year.daily_languages(), vec!["Rust".to_string()]);
    }

    #[test]
    fn test_total_possible_stars() {
        let new_year_2016 = Utc.with_ymd_and_hms(2016, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(total_possible_stars(new_year_2016), 50);

        let before_unlock = Utc.with_ymd_and_hms(2020, 12, 1, 4, 59, 0).unwrap();
        assert_eq!(total_possible_stars(before_unlock), 250);

        let after_unlock = Utc.with_ymd_and_hms(2020, 12, 1, 5, 0, 0).unwrap();
        assert_eq!(total_possible_stars(after_unlock), 252);

        let mid_summer = Utc.with_ymd_and_hms(2021, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(total_possible_stars(mid_summer), 300);
    }

    #[test]
    fn test_render_year_up_to_last_solved_day() {
        let drawer = RecordingDrawer::default();
        let aggregator = YearAggregator::new(&drawer, "/repo/.tiles/images", "/repo");
        let mut html = Html::new();

        aggregator.render_year(2020, &sample_year(), &mut html).unwrap();

        let drawn = drawer.drawn.borrow();
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].2, vec!["Rust".to_string(), "Python".to_string()]);
        assert_eq!(drawn[0].3, 2);
        assert_eq!(drawn[1].2, vec!["Rust".to_string()]);
        assert_eq!(drawn[1].4, PathBuf::from("/repo/.tiles/images/2020/02.svg"));

        let rendered = html.to_string();
        assert!(rendered.contains("2020 - 3 ⭐\n"));
        assert!(rendered.contains("<a href=\"2020/day_01.rs\">"));
        assert!(rendered.contains("<img src=\".tiles/images/2020/01.svg\" width=\"161px\" />"));
        assert!(!rendered.contains("03.svg"));
    }

    #[test]
    fn test_links_relative_to_readme_in_subdirectory() {
        let drawer = RecordingDrawer::default();
        let aggregator = YearAggregator::new(&drawer, ".aoc_tiles/tiles", "docs");
        let mut year = YearData::default();
        year.fold_day(1, solution("Rust", Some("./2020/day_01/main.rs")), 2);
        let mut html = Html::new();

        aggregator.render_year(2020, &year, &mut html).unwrap();

        let rendered = html.to_string();
        assert!(rendered.contains("<a href=\"../2020/day_01/main.rs\">"));
        assert!(rendered.contains("<img src=\"../.aoc_tiles/tiles/2020/01.svg\""));
    }

    #[test]
    fn test_render_all_days() {
        let drawer = RecordingDrawer::default();
        let aggregator = YearAggregator::new(&drawer, "/repo/.tiles/images", "/repo")
            .create_all_days(true)
            .tile_width("120px");
        let mut html = Html::new();

        aggregator.render_year(2020, &sample_year(), &mut html).unwrap();

        let drawn = drawer.drawn.borrow();
        assert_eq!(drawn.len(), 25);
        assert_eq!(drawn[2].3, 0);
        assert!(drawn[2].2.is_empty());
        let rendered = html.to_string();
        assert!(rendered.contains("<img src=\".tiles/images/2020/25.svg\" width=\"120px\" />"));
        // days without a code file are not linked
        assert_eq!(rendered.matches("<a href").count(), 2);
    }

    #[test]
    fn test_header_lists_daily_languages() {
        let drawer = RecordingDrawer::default();
        let aggregator = YearAggregator::new(&drawer, "/tiles", "/");
        let mut year = YearData::default();
        year.fold_day(1, solution("Rust", None), 2);
        year.fold_day(2, solution("Rust", None), 2);
        year.fold_day(2, solution("Go", None), 2);
        let mut html = Html::new();

        aggregator.render_year(2021, &year, &mut html).unwrap();
        assert!(html.to_string().contains("2021 - 4 ⭐ - Rust\n"));
    }

    #[test]
    fn test_render_failure_is_reported() {
        let aggregator = YearAggregator::new(&FailingDrawer, "/tiles", "/");
        let mut html = Html::new();
        let result = aggregator.render_year(2020, &sample_year(), &mut html);
        assert!(matches!(result, Err(TilesError::Render { year: 2020, day: 1, .. })));
    }

    #[test]
    fn test_total_header() {
        let mut solve_data = SolveData::default();
        for year in [2018, 2019, 2020] {
            solve_data.year_to_data.insert(year, sample_year());
        }
        let now = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        let mut html = Html::new();
        add_total_header(&solve_data, &mut html, ShowTotals::Auto, now);
        assert!(html.to_string().contains("Advent of Code - 9/300 ⭐"));

        solve_data.year_to_data.remove(&2018);
        let mut html = Html::new();
        add_total_header(&solve_data, &mut html, ShowTotals::Auto, now);
        assert!(html.is_empty());

        add_total_header(&solve_data, &mut html, ShowTotals::Yes, now);
        assert!(html.to_string().contains("Advent of Code - 6/300 ⭐"));
    }

    #[test]
    fn test_render_newest_year_first() {
        let drawer = RecordingDrawer::default();
        let aggregator = YearAggregator::new(&drawer, "/tiles", "/");
        let mut solve_data = SolveData::default();
        solve_data.year_to_data.insert(2019, sample_year());
        solve_data.year_to_data.insert(2020, sample_year());
        let now = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();

        let rendered = aggregator
            .render(&solve_data, ShowTotals::No, now)
            .unwrap()
            .to_string();
        let first_2020 = rendered.find("2020 - ").unwrap();
        let first_2019 = rendered.find("2019 - ").unwrap();
        assert!(first_2020 < first_2019);
    }
}
