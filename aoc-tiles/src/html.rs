//! Minimal HTML fragment builder

use std::fmt;

const INDENT: &str = "  ";

/// Line-oriented HTML builder with nested tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Html {
    lines: Vec<String>,
    depth: usize,
}

impl Html {
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, content: String) {
        self.lines.push(format!("{}{}", INDENT.repeat(self.depth), content));
    }

    /// Add escaped text
    pub fn push(&mut self, text: impl AsRef<str>) {
        self.line(escape(text.as_ref(), false));
    }

    /// Add an element whose children are written by `body`
    pub fn tag(&mut self, name: &str, attrs: &[(&str, &str)], body: impl FnOnce(&mut Self)) {
        self.line(format!("<{}{}>", name, attributes(attrs)));
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line(format!("</{}>", name));
    }

    /// Add an element without closing tag, e.g. `img`
    pub fn void_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.line(format!("<{}{} />", name, attributes(attrs)));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl fmt::Display for Html {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn attributes(attrs: &[(&str, &str)]) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(" {}=\"{}\"", key, escape(value, true)))
        .collect()
}

/// Escape text content for HTML or SVG markup
pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}
