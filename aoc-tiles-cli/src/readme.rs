//! README tile section replacement

use crate::error::CliError;
use std::fs;
use std::path::Path;

pub const BEGIN_MARKER: &str = "<!-- AOC TILES BEGIN -->";
pub const END_MARKER: &str = "<!-- AOC TILES END -->";

/// Replace the text between the markers with `fragment`
///
/// Returns `None` when the markers are missing or out of order.
pub fn replace_tiles(readme: &str, fragment: &str) -> Option<String> {
    let begin = readme.find(BEGIN_MARKER)? + BEGIN_MARKER.len();
    let end = begin + readme[begin..].find(END_MARKER)?;

    let mut updated = String::with_capacity(readme.len() + fragment.len());
    updated.push_str(&readme[..begin]);
    updated.push('\n');
    updated.push_str(fragment);
    if !fragment.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(&readme[end..]);
    Some(updated)
}

/// Write `fragment` into the README
///
/// Returns `false` when there is no README or it has no tile section.
pub fn update_readme(path: &Path, fragment: &str) -> Result<bool, CliError> {
    if !path.is_file() {
        return Ok(false);
    }
    let readme = fs::read_to_string(path)?;
    match replace_tiles(&readme, fragment) {
        Some(updated) => {
            if updated != readme {
                fs::write(path, updated)?;
            }
            Ok(true)
        }
        None => Ok(false),
    }
}
