use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// `[Source 1]`, `[Source 1, 2]`, `[Source 3,4]` ...
static CITATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Source [0-9]+(?:,[\s\x{FEFF}]*[0-9]+)*\]").expect("citation pattern is valid")
});

static CITATION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

/// A titled (or untitled leading) group of consecutive content lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Vec<String>,
}

impl Section {
    fn titled(title: String) -> Self {
        Self {
            title,
            content: Vec::new(),
        }
    }

    /// A section is only emitted once it has a title or at least one line.
    pub fn has_body(&self) -> bool {
        !self.title.is_empty() || !self.content.is_empty()
    }
}

/// Split a loosely structured markdown-ish response into sections.
///
/// Lines starting with `##` (or `###`) open a new section. Every other
/// non-blank line is normalized with [`normalize_line`] and appended to the
/// current section. Content before the first header lands in a section with
/// an empty title.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    if text.is_empty() {
        return sections;
    }

    let mut current = Section::default();

    for line in text.split('\n') {
        let trimmed = trim_line(line);
        if trimmed.is_empty() {
            continue;
        }

        if is_header(trimmed) {
            let next = Section::titled(header_title(trimmed));
            let finished = std::mem::replace(&mut current, next);
            if finished.has_body() {
                sections.push(finished);
            }
            continue;
        }

        let clean = normalize_line(trimmed);
        if !clean.is_empty() {
            current.content.push(clean);
        }
    }

    if current.has_body() {
        sections.push(current);
    }

    sections
}

/// Same as [`parse_sections`], treating a missing body as empty.
pub fn parse_optional_sections(text: Option<&str>) -> Vec<Section> {
    text.map(parse_sections).unwrap_or_default()
}

/// Whitespace plus the byte-order mark, which often leads text read from files.
fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

/// Trim applied to every input line before classification.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(is_blank_char)
}

/// Header detection only looks at the `#` run; `###not-a-header` is a header.
fn is_header(trimmed: &str) -> bool {
    trimmed.starts_with("##")
}

fn header_title(trimmed: &str) -> String {
    let hashes = trimmed.bytes().take(3).take_while(|b| *b == b'#').count();
    strip_bold(trimmed[hashes..].trim_start_matches(is_blank_char))
}

/// Remove literal `**` bold markers.
pub fn strip_bold(line: &str) -> String {
    line.replace("**", "")
}

/// Rewrite `[Source 1, 2]` style markers into `[1][2]`.
pub fn rewrite_citations(line: &str) -> String {
    CITATION
        .replace_all(line, |caps: &Captures| {
            CITATION_NUMBER
                .find_iter(&caps[0])
                .map(|m| format!("[{}]", m.as_str()))
                .collect::<String>()
        })
        .into_owned()
}

/// Normalization applied to every content line.
pub fn normalize_line(line: &str) -> String {
    rewrite_citations(&strip_bold(line))
}
