//! Local solution discovery
//!
//! A file is a solution for (year, day) when its path below the solutions
//! directory contains a year `20xx` and a day segment such as `day_1`, `day01`
//! or `Day-1`, and its extension belongs to a known language.

use crate::error::CliError;
use aoc_tiles::{DAYS, Language};
use ignore::WalkBuilder;
use itertools::Itertools;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(20\d{2})(?:[^0-9]|$)").expect("year pattern is valid")
});
static DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)day[ _-]?0*(\d{1,2})(?:[^0-9]|$)").expect("day pattern is valid")
});

/// Extension, language name and display color
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("c", "C", "#555555"),
    ("clj", "Clojure", "#db5855"),
    ("cpp", "C++", "#f34b7d"),
    ("cc", "C++", "#f34b7d"),
    ("cs", "C#", "#178600"),
    ("dart", "Dart", "#00B4AB"),
    ("erl", "Erlang", "#B83998"),
    ("ex", "Elixir", "#6e4a7e"),
    ("exs", "Elixir", "#6e4a7e"),
    ("fs", "F#", "#b845fc"),
    ("gleam", "Gleam", "#ffaff3"),
    ("go", "Go", "#00ADD8"),
    ("hs", "Haskell", "#5e5086"),
    ("ipynb", "Jupyter Notebook", "#DA5B0B"),
    ("java", "Java", "#b07219"),
    ("jl", "Julia", "#a270ba"),
    ("js", "JavaScript", "#f1e05a"),
    ("kt", "Kotlin", "#A97BFF"),
    ("lua", "Lua", "#000080"),
    ("ml", "OCaml", "#ef7a08"),
    ("nim", "Nim", "#ffc200"),
    ("php", "PHP", "#4F5D95"),
    ("pl", "Perl", "#0298c3"),
    ("py", "Python", "#3572A5"),
    ("r", "R", "#198CE7"),
    ("rb", "Ruby", "#701516"),
    ("rs", "Rust", "#dea584"),
    ("scala", "Scala", "#c22d40"),
    ("sh", "Shell", "#89e051"),
    ("swift", "Swift", "#F05138"),
    ("ts", "TypeScript", "#3178c6"),
    ("zig", "Zig", "#ec915c"),
];

/// Language of a file extension (case-insensitive, without dot)
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(ext, _, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, name, _)| *name)
}

/// Display color of a language
pub fn language_color(language: &str) -> Option<&'static str> {
    LANGUAGES
        .iter()
        .find(|(_, name, _)| *name == language)
        .map(|(_, _, color)| *color)
}

/// Year and day named by a path relative to the solutions directory
fn year_and_day(relative: &str) -> Option<(u16, u8)> {
    let year = YEAR.captures(relative)?.get(1)?.as_str().parse::<u16>().ok()?;
    let day = DAY
        .captures_iter(relative)
        .last()?
        .get(1)?
        .as_str()
        .parse::<u8>()
        .ok()
        .filter(|day| DAYS.contains(day))?;
    Some((year, day))
}

/// Every file below `root`, skipping hidden and ignored paths
///
/// `.gitignore` files apply even outside of a git repository.
fn collect_files(root: &Path) -> Result<Vec<PathBuf>, CliError> {
    fs::metadata(root)?;
    let mut files = Vec::new();
    for entry in WalkBuilder::new(root).require_git(false).build() {
        let entry = entry?;
        if entry.file_type().is_some_and(|ty| ty.is_file()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Find solution files below `root`, grouped by language
///
/// Languages are returned in the order of their first file; files are visited in
/// path order, so the first file of a day is its code file.
pub fn discover(root: &Path) -> Result<Vec<Language>, CliError> {
    let files = collect_files(root)?;

    let mut languages: Vec<Language> = Vec::new();
    for path in files.into_iter().sorted() {
        let Some(language) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(language_for_extension)
        else {
            continue;
        };
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let Some((year, day)) = year_and_day(&relative.to_string_lossy()) else {
            continue;
        };

        log::debug!("{} solution for {}/{:02}: {}", language, year, day, path.display());
        match languages.iter_mut().find(|l| l.name() == language) {
            Some(existing) => existing.add_file(year, day, path),
            None => languages.push(Language::new(language).with_file(year, day, path)),
        }
    }

    log::info!(
        "Found solutions in {}",
        languages.iter().map(Language::name).join(", ")
    );
    Ok(languages)
}
