//! Local solution evidence per language

use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// A programming language and the days it has solutions for
///
/// A day counts as attempted ("ran") once it is marked or a file is added for it.
/// The file count per day is the secondary "solved" signal used by
/// [`SolvedWhen::FileExists`](crate::SolvedWhen::FileExists).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Language {
    name: String,
    ran: BTreeSet<(u16, u8)>,
    files: BTreeMap<(u16, u8), Vec<PathBuf>>,
}

impl Language {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ran: BTreeSet::new(),
            files: BTreeMap::new(),
        }
    }

    /// Display name, e.g. `Rust`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mark a day as attempted without adding a file
    pub fn mark_ran(&mut self, year: u16, day: u8) {
        self.ran.insert((year, day));
    }

    /// Add a solution file for a day, marking the day as attempted
    pub fn add_file(&mut self, year: u16, day: u8, path: impl Into<PathBuf>) {
        self.ran.insert((year, day));
        self.files.entry((year, day)).or_default().push(path.into());
    }

    /// Chaining variant of [`Language::add_file`]
    pub fn with_file(mut self, year: u16, day: u8, path: impl Into<PathBuf>) -> Self {
        self.add_file(year, day, path);
        self
    }

    /// Whether the day was attempted
    pub fn ran(&self, year: u16, day: u8) -> bool {
        self.ran.contains(&(year, day))
    }

    /// Whether any day of the year was attempted
    pub fn attempted_year(&self, year: u16) -> bool {
        self.ran.range((year, 0)..=(year, u8::MAX)).next().is_some()
    }

    /// Number of solution files for a day
    pub fn file_count(&self, year: u16, day: u8) -> usize {
        self.files.get(&(year, day)).map_or(0, Vec::len)
    }

    /// First solution file for a day, used as link target
    pub fn code_file(&self, year: u16, day: u8) -> Option<&Path> {
        self.files
            .get(&(year, day))
            .and_then(|files| files.first())
            .map(PathBuf::as_path)
    }

    /// Years with at least one attempted day, ascending
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.ran.iter().map(|(year, _)| *year).dedup()
    }
}
