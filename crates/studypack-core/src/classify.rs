// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Decompose generated study text into flat, typed, decoration-free blocks.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Lines at least this many characters long are never promoted to headings
/// by the trailing-colon heuristic.
const COLON_HEADING_MAX_CHARS: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Heading,
    Subheading,
    Bullet,
    Paragraph,
}

/// One classified line of text, in source order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderBlock {
    pub kind: BlockKind,
    pub text: String,
}

impl RenderBlock {
    fn new(kind: BlockKind, text: String) -> Self {
        Self { kind, text }
    }
}

static MAJOR_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,2}\s+").expect("Invalid regex"));
static MINOR_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{3,6}\s+").expect("Invalid regex"));
static BULLET_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+•]\s+").expect("Invalid regex"));
static BULLET_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*+•]\s*").expect("Invalid regex"));
static TRAILING_COLON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":$").expect("Invalid regex"));

/// Decoration substitutions, applied in order. Each one is a single global
/// pass over the output of the previous one.
static DECORATIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        // Heading hashes.
        (Regex::new(r"(?m)^#{1,6}\s+").expect("Invalid regex"), ""),
        // Bold, before italic so leftover single asterisks pair up.
        (Regex::new(r"\*\*(.*?)\*\*").expect("Invalid regex"), "${1}"),
        // Italic.
        (Regex::new(r"\*(.*?)\*").expect("Invalid regex"), "${1}"),
        // Inline code.
        (Regex::new(r"`(.*?)`").expect("Invalid regex"), "${1}"),
        // Raw list markers become a bullet glyph.
        (Regex::new(r"(?m)^[-*+]\s+").expect("Invalid regex"), "• "),
        // Numbered list markers.
        (Regex::new(r"(?m)^\d+\.\s+").expect("Invalid regex"), ""),
    ]
});

/// Strip markdown decoration from a piece of text.
pub fn clean_markdown(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in DECORATIONS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

/// A classification rule: the first rule whose predicate accepts a trimmed
/// line decides the kind of its block.
struct Rule {
    kind: BlockKind,
    accepts: fn(&str) -> bool,
    extract: fn(&str) -> String,
}

static RULES: [Rule; 4] = [
    Rule {
        kind: BlockKind::Heading,
        accepts: is_heading,
        extract: heading_text,
    },
    Rule {
        kind: BlockKind::Subheading,
        accepts: is_subheading,
        extract: clean_markdown,
    },
    Rule {
        kind: BlockKind::Bullet,
        accepts: is_bullet,
        extract: bullet_text,
    },
    Rule {
        kind: BlockKind::Paragraph,
        accepts: is_paragraph,
        extract: clean_markdown,
    },
];

fn has_bullet_marker(line: &str) -> bool {
    line.contains('•') || BULLET_START.is_match(line)
}

fn is_heading(line: &str) -> bool {
    MAJOR_HEADING.is_match(line)
        || (line.ends_with(':')
            && line.chars().count() < COLON_HEADING_MAX_CHARS
            && !has_bullet_marker(line))
}

fn heading_text(line: &str) -> String {
    clean_markdown(&TRAILING_COLON.replace(line, ""))
}

fn is_subheading(line: &str) -> bool {
    MINOR_HEADING.is_match(line)
}

fn is_bullet(line: &str) -> bool {
    BULLET_START.is_match(line) || line.starts_with('•')
}

fn bullet_text(line: &str) -> String {
    clean_markdown(&BULLET_MARKER.replace(line, ""))
}

// Any non-blank line.
fn is_paragraph(_line: &str) -> bool {
    true
}

/// The block kinds in the order their rules are tried.
pub fn rule_order() -> impl Iterator<Item = BlockKind> {
    RULES.iter().map(|rule| rule.kind)
}

/// Classify a single line. Blank lines produce no block.
pub fn classify_line(line: &str) -> Option<RenderBlock> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    RULES
        .iter()
        .find(|rule| (rule.accepts)(line))
        .map(|rule| RenderBlock::new(rule.kind, (rule.extract)(line)))
}

/// Classify every line of `text`, in order.
pub fn classify(text: &str) -> Vec<RenderBlock> {
    text.lines().filter_map(classify_line).collect()
}
