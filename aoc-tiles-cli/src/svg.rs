//! SVG tile drawing

use crate::discovery::language_color;
use aoc_tiles::{BoxError, PartScore, RightSide, Tile, TileDrawer, escape_text};
use itertools::Itertools;
use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

const WIDTH: u32 = 200;
const HEIGHT: u32 = 100;
const LEFT_WIDTH: u32 = 100;
const TOP100: u32 = 100;
const FALLBACK_LANGUAGE_COLOR: &str = "#808080";
const RIGHT_BACKGROUND: &str = "#0f0f23";

/// Colors shared by all tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub text: String,
    pub not_completed: String,
    pub top100: String,
}

/// Draws tiles as standalone SVG documents
///
/// The left half shows the day on the colors of the contributing languages, the
/// right half shows one line per part as selected by [`RightSide`].
pub struct SvgTileDrawer {
    right_side: RightSide,
    palette: Palette,
}

impl SvgTileDrawer {
    pub fn new(right_side: RightSide, palette: Palette) -> Self {
        Self {
            right_side,
            palette,
        }
    }

    /// Render the SVG document of a tile
    pub fn render(&self, tile: &Tile<'_>) -> Result<String, fmt::Error> {
        let mut svg = String::new();
        writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        )?;
        self.draw_background(&mut svg, tile)?;
        self.draw_day(&mut svg, tile)?;
        writeln!(
            svg,
            r#"<rect x="{LEFT_WIDTH}" y="0" width="{}" height="{HEIGHT}" fill="{RIGHT_BACKGROUND}"/>"#,
            WIDTH - LEFT_WIDTH
        )?;
        for (index, part) in (1..=2u8).enumerate() {
            let y = 40 + 35 * index as u32;
            let (text, color) = self.part_line(tile, part);
            writeln!(
                svg,
                r#"<text x="{}" y="{y}" fill="{}" font-family="monospace" font-size="13">{}</text>"#,
                LEFT_WIDTH + 8,
                color,
                escape_text(&text)
            )?;
        }
        svg.push_str("</svg>\n");
        Ok(svg)
    }

    /// Left half: one vertical band per language, or the not-completed color
    fn draw_background(&self, svg: &mut String, tile: &Tile<'_>) -> fmt::Result {
        let colors: Vec<&str> = if tile.stars == 0 || tile.languages.is_empty() {
            vec![self.palette.not_completed.as_str()]
        } else {
            tile.languages
                .iter()
                .map(|l| language_color(l).unwrap_or(FALLBACK_LANGUAGE_COLOR))
                .collect()
        };

        let band = LEFT_WIDTH / colors.len() as u32;
        for (index, color) in colors.iter().enumerate() {
            let x = band * index as u32;
            // last band absorbs the rounding remainder
            let width = if index + 1 == colors.len() {
                LEFT_WIDTH - x
            } else {
                band
            };
            writeln!(
                svg,
                r#"<rect x="{x}" y="0" width="{width}" height="{HEIGHT}" fill="{color}"/>"#
            )?;
        }
        Ok(())
    }

    fn draw_day(&self, svg: &mut String, tile: &Tile<'_>) -> fmt::Result {
        writeln!(
            svg,
            r#"<text x="50" y="55" fill="{}" font-family="monospace" font-size="40" text-anchor="middle">{:02}</text>"#,
            self.palette.text, tile.day
        )?;
        if !tile.languages.is_empty() {
            writeln!(
                svg,
                r#"<text x="50" y="85" fill="{}" font-family="monospace" font-size="11" text-anchor="middle">{}</text>"#,
                self.palette.text,
                escape_text(&tile.languages.iter().join(" "))
            )?;
        }
        Ok(())
    }

    /// Text and color of the line for a part
    fn part_line<'p>(&'p self, tile: &Tile<'_>, part: u8) -> (String, &'p str) {
        let score = tile.scores.and_then(|s| s.part(part));
        let text = self.palette.text.as_str();
        match self.right_side {
            RightSide::Checkmark => {
                let mark = if tile.stars >= part { "✓" } else { "" };
                (format!("Part {}: {}", part, mark), text)
            }
            RightSide::TimeAndRank => {
                let line = format!(
                    "P{} {} {}",
                    part,
                    field(score, |s| &s.time),
                    field(score, |s| &s.rank)
                );
                let in_top100 = score
                    .and_then(PartScore::rank_value)
                    .is_some_and(|rank| rank <= TOP100);
                if in_top100 {
                    (line, self.palette.top100.as_str())
                } else {
                    (line, text)
                }
            }
            RightSide::Runtime => {
                let line = match score.and_then(|s| s.time.as_deref()) {
                    Some(seconds) => format!("P{} {}s", part, seconds),
                    None => format!("P{} -", part),
                };
                (line, text)
            }
        }
    }
}

impl TileDrawer for SvgTileDrawer {
    fn file_extension(&self) -> &str {
        "svg"
    }

    fn draw_tile(&self, tile: &Tile<'_>, path: &Path) -> Result<(), BoxError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render(tile)?)?;
        Ok(())
    }
}

fn field<'s>(
    score: Option<&'s PartScore>,
    get: impl Fn(&'s PartScore) -> &'s Option<String>,
) -> &'s str {
    score.and_then(|s| get(s).as_deref()).unwrap_or("-")
}
