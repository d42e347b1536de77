//! Personal leaderboard parsing
//!
//! Turns the raw `/{year}/leaderboard/self` document into per-day score records.
//! The table layout changed in 2025, so the start marker and the column shape are
//! selected by [`FormatEra`].

use crate::error::LeaderboardError;
use regex::Regex;
use std::cell::OnceCell;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::Duration;

/// Phrase shown instead of a table when the participant has no stars for the year
pub const NO_STARS_SENTINEL: &str = "You haven't collected any stars... yet.";

const TABLE_END: &str = "</pre>";
const PLACEHOLDER: &str = "-";
const PART_FIELDS: usize = 3;

/// Table layout variants of the leaderboard document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatEra {
    /// Both parts listed with Time/Rank/Score columns
    Legacy,
    /// Only part 2 columns are listed by default
    PartTwoOnly,
}

impl FormatEra {
    /// First year using [`FormatEra::PartTwoOnly`]
    pub const CUTOFF_YEAR: u16 = 2025;

    /// Select the layout used by the given competition year
    pub fn for_year(year: u16) -> Self {
        if year < Self::CUTOFF_YEAR {
            FormatEra::Legacy
        } else {
            FormatEra::PartTwoOnly
        }
    }

    /// Regex source of the header line that opens the table body
    fn start_marker(self) -> &'static str {
        match self {
            FormatEra::Legacy => {
                r#"<span class="leaderboard-daydesc-both"> *Time *Rank *Score</span>\n"#
            }
            FormatEra::PartTwoOnly => r#"<span class="leaderboard-daydesc-both">-Part 2-</span>\n"#,
        }
    }

    fn table_regex(self) -> Regex {
        let pattern = format!(
            "(?s){}(.*?){}",
            self.start_marker(),
            regex::escape(TABLE_END)
        );
        Regex::new(&pattern).expect("table pattern is valid")
    }

    /// Bring a line's score fields into the legacy `[t1, r1, s1, t2, r2, s2]` shape
    fn normalize(self, fields: &mut Vec<Option<String>>) {
        match self {
            FormatEra::Legacy => {}
            FormatEra::PartTwoOnly => {
                // part 1 columns are not listed at all
                fields.splice(0..0, [None, None, None]);

                // a part 2 section without its time and rank columns
                let len = fields.len();
                if len > PART_FIELDS && len < 2 * PART_FIELDS {
                    fields.splice(len - 1..len - 1, [None, None]);
                }
            }
        }
    }
}

/// Time, rank and score of one part; each may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartScore {
    pub time: Option<String>,
    pub rank: Option<String>,
    pub score: Option<String>,
}

impl PartScore {
    fn from_fields(fields: &mut impl Iterator<Item = Option<String>>) -> Self {
        Self {
            time: fields.next().flatten(),
            rank: fields.next().flatten(),
            score: fields.next().flatten(),
        }
    }

    /// Number of fields that carry a value
    pub fn populated(&self) -> usize {
        [&self.time, &self.rank, &self.score]
            .into_iter()
            .filter(|f| f.is_some())
            .count()
    }

    /// Rank as a number, if present and numeric
    pub fn rank_value(&self) -> Option<u32> {
        self.rank.as_deref().and_then(|r| r.parse().ok())
    }
}

/// Leaderboard record for a single day
///
/// Part 1 is always present as a slot; part 2 only when the table line carried it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayScores {
    pub part1: PartScore,
    pub part2: Option<PartScore>,
}

impl DayScores {
    /// Build from a normalized field list of length 3 or 6
    fn from_fields(fields: Vec<Option<String>>) -> Option<Self> {
        let has_part2 = match fields.len() {
            PART_FIELDS => false,
            n if n == 2 * PART_FIELDS => true,
            _ => return None,
        };
        let mut fields = fields.into_iter();
        let part1 = PartScore::from_fields(&mut fields);
        let part2 = has_part2.then(|| PartScore::from_fields(&mut fields));
        Some(Self { part1, part2 })
    }

    /// Score record of part 1 or 2
    pub fn part(&self, part: u8) -> Option<&PartScore> {
        match part {
            1 => Some(&self.part1),
            2 => self.part2.as_ref(),
            _ => None,
        }
    }

    /// Number of field slots (3 or 6)
    pub fn field_slots(&self) -> usize {
        if self.part2.is_some() {
            2 * PART_FIELDS
        } else {
            PART_FIELDS
        }
    }

    /// Number of parts solved according to the leaderboard (rank present)
    pub fn ranked_parts(&self) -> u8 {
        u8::from(self.part1.rank.is_some())
            + u8::from(self.part2.as_ref().is_some_and(|p| p.rank.is_some()))
    }
}

/// Day → score record for one competition year
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardSnapshot {
    days: BTreeMap<u8, DayScores>,
}

impl LeaderboardSnapshot {
    /// Snapshot without any scored day
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, day: u8) -> Option<&DayScores> {
        self.days.get(&day)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Iterate over scored days in ascending order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &DayScores)> {
        self.days.iter().map(|(day, scores)| (*day, scores))
    }
}

impl FromIterator<(u8, DayScores)> for LeaderboardSnapshot {
    fn from_iter<I: IntoIterator<Item = (u8, DayScores)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Measured solution runtimes keyed by (year, day, part)
pub trait RuntimeLookup {
    fn runtime(&self, year: u16, day: u8, part: u8) -> Option<Duration>;
}

impl<S: BuildHasher> RuntimeLookup for HashMap<(u16, u8, u8), Duration, S> {
    fn runtime(&self, year: u16, day: u8, part: u8) -> Option<Duration> {
        self.get(&(year, day, part)).copied()
    }
}

impl RuntimeLookup for BTreeMap<(u16, u8, u8), Duration> {
    fn runtime(&self, year: u16, day: u8, part: u8) -> Option<Duration> {
        self.get(&(year, day, part)).copied()
    }
}

/// Format a runtime the way it is shown in place of the leaderboard time
pub fn format_runtime(runtime: Duration) -> String {
    format!("{:.3}", runtime.as_secs_f64())
}

/// Parser for leaderboard documents with cached table patterns
#[derive(Clone, Debug)]
pub struct LeaderboardParser {
    legacy_table: OnceCell<Regex>,
    part_two_table: OnceCell<Regex>,
}

impl LeaderboardParser {
    /// Create a new parser with uninitialized caches
    pub fn new() -> Self {
        Self {
            legacy_table: OnceCell::new(),
            part_two_table: OnceCell::new(),
        }
    }

    /// Get or compile the table pattern of an era
    fn table_regex(&self, era: FormatEra) -> &Regex {
        let cell = match era {
            FormatEra::Legacy => &self.legacy_table,
            FormatEra::PartTwoOnly => &self.part_two_table,
        };
        cell.get_or_init(|| era.table_regex())
    }

    /// Extract the table body of a document, if any
    fn table_body<'d>(&self, document: &'d str, era: FormatEra) -> Option<&'d str> {
        self.table_regex(era)
            .captures(document)
            .and_then(|captures| captures.get(1))
            .map(|body| body.as_str())
    }

    /// Parse a leaderboard document of `year`
    ///
    /// With `use_runtime`, the time of each part is replaced by the runtime found in
    /// `runtime_data`; parts without a runtime entry get no time.
    ///
    /// # Errors
    ///
    /// * `LeaderboardError::MissingRuntimeData` - `use_runtime` without `runtime_data`
    /// * `LeaderboardError::TableNotFound` - the document has no table region
    /// * `LeaderboardError::InvalidDay` / `FieldCount` - a table line has an unexpected shape
    pub fn parse(
        &self,
        document: &str,
        year: u16,
        use_runtime: bool,
        runtime_data: Option<&dyn RuntimeLookup>,
    ) -> Result<LeaderboardSnapshot, LeaderboardError> {
        let runtime_data = match (use_runtime, runtime_data) {
            (true, None) => return Err(LeaderboardError::MissingRuntimeData),
            (true, lookup) => lookup,
            (false, _) => None,
        };

        if document.contains(NO_STARS_SENTINEL) {
            return Ok(LeaderboardSnapshot::empty());
        }

        let era = FormatEra::for_year(year);
        let body = self
            .table_body(document, era)
            .ok_or(LeaderboardError::TableNotFound { year })?;

        let mut days = BTreeMap::new();
        for line in body.lines().map(str::trim).filter(|line| !line.is_empty()) {
            let (day, mut scores) = parse_line(line, year, era)?;

            if let Some(lookup) = runtime_data {
                scores.part1.time = lookup.runtime(year, day, 1).map(format_runtime);
                if let Some(part2) = scores.part2.as_mut() {
                    part2.time = lookup.runtime(year, day, 2).map(format_runtime);
                }
            }

            days.insert(day, scores);
        }

        log::debug!("Parsed {} leaderboard day(s) for {}", days.len(), year);
        Ok(LeaderboardSnapshot { days })
    }
}

impl Default for LeaderboardParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one table line into its day and normalized score record
fn parse_line(line: &str, year: u16, era: FormatEra) -> Result<(u8, DayScores), LeaderboardError> {
    let mut tokens = line.split_whitespace();
    let day = tokens
        .next()
        .and_then(|token| token.parse::<u8>().ok())
        .filter(|day| (1..=25).contains(day))
        .ok_or_else(|| LeaderboardError::InvalidDay {
            year,
            line: line.to_string(),
        })?;

    let mut fields: Vec<Option<String>> = tokens
        .map(|token| (token != PLACEHOLDER).then(|| token.to_string()))
        .collect();
    era.normalize(&mut fields);

    let count = fields.len();
    let scores =
        DayScores::from_fields(fields).ok_or(LeaderboardError::FieldCount { year, day, count })?;
    Ok((day, scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn legacy_document(rows: &str) -> String {
        format!(
            "<html><body><main><article><pre>      \
             <span class=\"leaderboard-daydesc-first\">--------Part 1---------</span>\
             <span class=\"leaderboard-daydesc-both\">--------Part 2---------</span>\n\
             Day   <span class=\"leaderboard-daydesc-first\">    Time    Rank  Score</span>\
             <span class=\"leaderboard-daydesc-both\">    Time    Rank  Score</span>\n\
             {rows}</pre></article></main></body></html>"
        )
    }

    fn part_two_document(rows: &str) -> String {
        format!(
            "<html><body><main><article><pre>Day \
             <span class=\"leaderboard-daydesc-both\">-Part 2-</span>\n\
             {rows}</pre></article></main></body></html>"
        )
    }

    fn part(time: &str, rank: &str, score: &str) -> PartScore {
        PartScore {
            time: Some(time.to_string()),
            rank: Some(rank.to_string()),
            score: Some(score.to_string()),
        }
    }

    #[test]
    fn test_legacy_line_with_both_parts() {
        let document = legacy_document("  5 00:12:34 123 456 01:02:03 45 678\n");
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2020, false, None)
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        let day = snapshot.get(5).unwrap();
        assert_eq!(day.part1, part("00:12:34", "123", "456"));
        assert_eq!(day.part2, Some(part("01:02:03", "45", "678")));
        assert_eq!(day.ranked_parts(), 2);
    }

    #[test]
    fn test_legacy_line_with_part_one_only() {
        let document = legacy_document(" 25   >24h  12345      0\n  3 00:01:00 10 91 - - -\n");
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2019, false, None)
            .unwrap();

        let day25 = snapshot.get(25).unwrap();
        assert_eq!(day25.part1, part(">24h", "12345", "0"));
        assert!(day25.part2.is_none());

        let day3 = snapshot.get(3).unwrap();
        assert_eq!(day3.part2, Some(PartScore::default()));
        assert_eq!(day3.ranked_parts(), 1);
    }

    #[test]
    fn test_part_two_only_line() {
        let document = part_two_document("  5 - 99 888\n");
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2025, false, None)
            .unwrap();

        let day = snapshot.get(5).unwrap();
        assert_eq!(day.part1, PartScore::default());
        assert_eq!(
            day.part2,
            Some(PartScore {
                time: None,
                rank: Some("99".to_string()),
                score: Some("888".to_string()),
            })
        );
    }

    #[test]
    fn test_part_two_only_lone_value_is_aligned_as_score() {
        let document = part_two_document("  7 42\n  8\n");
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2026, false, None)
            .unwrap();

        let day7 = snapshot.get(7).unwrap();
        assert_eq!(
            day7.part2,
            Some(PartScore {
                time: None,
                rank: None,
                score: Some("42".to_string()),
            })
        );

        let day8 = snapshot.get(8).unwrap();
        assert_eq!(day8.field_slots(), 3);
        assert_eq!(day8.part1.populated(), 0);
    }

    #[test]
    fn test_era_selection() {
        assert_eq!(FormatEra::for_year(2015), FormatEra::Legacy);
        assert_eq!(FormatEra::for_year(2024), FormatEra::Legacy);
        assert_eq!(FormatEra::for_year(2025), FormatEra::PartTwoOnly);
    }

    #[test]
    fn test_legacy_marker_ignored_after_cutoff() {
        let document = legacy_document("  5 00:12:34 123 456\n");
        let result = LeaderboardParser::new().parse(&document, 2025, false, None);
        assert_eq!(result, Err(LeaderboardError::TableNotFound { year: 2025 }));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        let document = legacy_document("  5 00:12:34 123 456\n").replace("Time", "time");
        let result = LeaderboardParser::new().parse(&document, 2020, false, None);
        assert_eq!(result, Err(LeaderboardError::TableNotFound { year: 2020 }));
    }

    #[test]
    fn test_unexpected_field_count_fails() {
        let document = legacy_document("  5 00:12:34 123 456 01:02:03\n");
        let result = LeaderboardParser::new().parse(&document, 2020, false, None);
        assert_eq!(
            result,
            Err(LeaderboardError::FieldCount {
                year: 2020,
                day: 5,
                count: 4
            })
        );
    }

    #[test]
    fn test_invalid_day_fails() {
        let document = legacy_document("  Day 00:12:34 123 456\n");
        let result = LeaderboardParser::new().parse(&document, 2020, false, None);
        assert!(matches!(result, Err(LeaderboardError::InvalidDay { year: 2020, .. })));
    }

    #[test]
    fn test_runtime_substitution() {
        let runtimes: HashMap<(u16, u8, u8), Duration> = HashMap::from([
            ((2020, 5, 1), Duration::from_millis(1234)),
            ((2020, 6, 2), Duration::from_millis(7)),
        ]);
        let document = legacy_document(
            "  5 00:12:34 123 456 01:02:03 45 678\n  6 00:10:00 1 100 00:20:00 2 99\n",
        );
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2020, true, Some(&runtimes))
            .unwrap();

        let day5 = snapshot.get(5).unwrap();
        assert_eq!(day5.part1.time.as_deref(), Some("1.234"));
        assert_eq!(day5.part1.rank.as_deref(), Some("123"));
        assert_eq!(day5.part2.as_ref().unwrap().time, None);

        let day6 = snapshot.get(6).unwrap();
        assert_eq!(day6.part1.time, None);
        assert_eq!(day6.part2.as_ref().unwrap().time.as_deref(), Some("0.007"));
    }

    #[test]
    fn test_runtime_requested_without_data() {
        let result = LeaderboardParser::new().parse(NO_STARS_SENTINEL, 2020, true, None);
        assert_eq!(result, Err(LeaderboardError::MissingRuntimeData));
    }

    #[test]
    fn test_runtime_data_ignored_when_not_requested() {
        let runtimes: BTreeMap<(u16, u8, u8), Duration> =
            BTreeMap::from([((2020, 5, 1), Duration::from_secs(2))]);
        let document = legacy_document("  5 00:12:34 123 456\n");
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2020, false, Some(&runtimes))
            .unwrap();
        assert_eq!(snapshot.get(5).unwrap().part1.time.as_deref(), Some("00:12:34"));
    }

    #[test]
    fn test_only_first_table_is_read() {
        let document = format!(
            "{}{}",
            legacy_document("  1 00:01:00 1 100\n"),
            legacy_document("  2 00:01:00 1 100\n")
        );
        let snapshot = LeaderboardParser::new()
            .parse(&document, 2018, false, None)
            .unwrap();
        assert!(snapshot.get(1).is_some());
        assert!(snapshot.get(2).is_none());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_no_stars_sentinel_gives_empty_snapshot(
            year in 2015u16..2035u16,
            prefix in "[a-zA-Z0-9 <>/=\"\\n]{0,100}",
            suffix in "[a-zA-Z0-9 <>/=\"\\n]{0,100}",
        ) {
            let document = format!("{prefix}{NO_STARS_SENTINEL}{suffix}");
            let snapshot = LeaderboardParser::new().parse(&document, year, false, None);
            prop_assert_eq!(snapshot, Ok(LeaderboardSnapshot::empty()));
        }

        #[test]
        fn prop_records_have_three_or_six_slots(
            year in 2015u16..2035u16,
            rows in prop::collection::vec(
                (
                    1u8..=25u8,
                    prop::collection::vec(
                        prop::sample::select(vec!["-", "00:01:02", ">24h", "17", "0"]),
                        0..=6,
                    ),
                ),
                1..10,
            ),
        ) {
            let lines: String = rows
                .iter()
                .map(|(day, fields)| format!("{:>3} {}\n", day, fields.join(" ")))
                .collect();
            let document = match FormatEra::for_year(year) {
                FormatEra::Legacy => legacy_document(&lines),
                FormatEra::PartTwoOnly => part_two_document(&lines),
            };

            match LeaderboardParser::new().parse(&document, year, false, None) {
                Ok(snapshot) => {
                    for (_, scores) in snapshot.iter() {
                        prop_assert!(matches!(scores.field_slots(), 3 | 6));
                        prop_assert!(!scores.part1.time.as_deref().is_some_and(|t| t == PLACEHOLDER));
                    }
                }
                Err(LeaderboardError::FieldCount { count, .. }) => {
                    prop_assert!(count != 3 && count != 6);
                }
                Err(other) => prop_assert!(false, "unexpected error {:?}", other),
            }
        }
    }
}
