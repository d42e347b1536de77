//! Runtime file loading
//!
//! One entry per line, `year day part seconds`, e.g. `2023 1 2 0.0042`.
//! Blank lines and lines starting with `#` are ignored.

use crate::error::CliError;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Runtimes keyed by (year, day, part)
pub type Runtimes = BTreeMap<(u16, u8, u8), Duration>;

/// Read and parse a runtime file
pub fn load_runtimes(path: &Path) -> Result<Runtimes, CliError> {
    let content = fs::read_to_string(path)?;
    let runtimes = parse_runtimes(&content).map_err(|(line, message)| CliError::RuntimeFile {
        path: path.to_path_buf(),
        line,
        message,
    })?;
    log::debug!("Loaded {} runtime(s) from {}", runtimes.len(), path.display());
    Ok(runtimes)
}

/// Parse runtime entries; errors carry the 1-based line number
fn parse_runtimes(content: &str) -> Result<Runtimes, (usize, String)> {
    let mut runtimes = Runtimes::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, runtime) = parse_entry(line).map_err(|message| (index + 1, message))?;
        runtimes.insert(key, runtime);
    }
    Ok(runtimes)
}

fn parse_entry(line: &str) -> Result<((u16, u8, u8), Duration), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [year, day, part, seconds] = fields.as_slice() else {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    };

    let year = year
        .parse::<u16>()
        .map_err(|_| format!("invalid year {:?}", year))?;
    let day = day
        .parse::<u8>()
        .ok()
        .filter(|day| aoc_tiles::DAYS.contains(day))
        .ok_or_else(|| format!("invalid day {:?}", day))?;
    let part = part
        .parse::<u8>()
        .ok()
        .filter(|part| matches!(part, 1 | 2))
        .ok_or_else(|| format!("invalid part {:?}", part))?;
    let runtime = seconds
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| format!("invalid seconds {:?}", seconds))?;

    Ok(((year, day, part), runtime))
}
