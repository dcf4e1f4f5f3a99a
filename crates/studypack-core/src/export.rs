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

//! A plain-text export: a reduced decoration pass followed by word wrapping
//! and pagination into fixed-size pages.

use std::sync::LazyLock;

use regex::Regex;

static EXPORT_DECORATIONS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"#{1,6}\s*").expect("Invalid regex"), ""),
        (Regex::new(r"\*\*").expect("Invalid regex"), ""),
        (Regex::new(r"\*").expect("Invalid regex"), ""),
        (Regex::new(r"`").expect("Invalid regex"), ""),
        (Regex::new(r"---").expect("Invalid regex"), ""),
        (Regex::new(r"\n{3,}").expect("Invalid regex"), "\n\n"),
    ]
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Strip headings, emphasis, code ticks and horizontal rules, and collapse
/// runs of blank lines.
pub fn clean_for_export(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in EXPORT_DECORATIONS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text
}

/// Page geometry, in character columns and lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLayout {
    pub columns: usize,
    /// Lines on the first page, which also carries the title block.
    pub first_page_lines: usize,
    pub lines_per_page: usize,
}

impl Default for PageLayout {
    /// An A4 page with 20mm margins, 11pt text and a 6mm line height.
    fn default() -> Self {
        Self {
            columns: 90,
            first_page_lines: 37,
            lines_per_page: 42,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

/// Greedy word wrap. Explicit line breaks are kept, and words longer than
/// a line are split.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut width = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if width > 0 {
                    lines.push(std::mem::take(&mut line));
                    width = 0;
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            let needed = if width == 0 { word.len() } else { width + 1 + word.len() };
            if needed > columns {
                lines.push(std::mem::take(&mut line));
                width = 0;
            }
            if width > 0 {
                line.push(' ');
                width += 1;
            }
            line.extend(word.iter());
            width += word.len();
        }
        lines.push(line);
    }
    lines
}

/// Wrap `text` and split it into pages.
pub fn paginate(text: &str, layout: PageLayout) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Vec::new();
    let mut capacity = layout.first_page_lines.max(1);
    for line in wrap(text, layout.columns) {
        if current.len() == capacity {
            pages.push(Page {
                lines: std::mem::take(&mut current),
            });
            capacity = layout.lines_per_page.max(1);
        }
        current.push(line);
    }
    if !current.is_empty() || pages.is_empty() {
        pages.push(Page { lines: current });
    }
    pages
}

/// The file name an export is saved under.
pub fn export_file_name(topic: &str, title: &str) -> String {
    let topic = WHITESPACE_RUN.replace_all(&topic.to_lowercase(), "-").into_owned();
    format!("{topic}-{}.txt", title.to_lowercase())
}

/// Render a complete export document. Pages are separated by form feeds.
pub fn render_export(title: &str, topic: &str, text: &str, layout: PageLayout) -> String {
    let pages = paginate(&clean_for_export(text), layout);
    let mut out = format!("{title}\n{topic}\n\n");
    let body: Vec<String> = pages.into_iter().map(|page| page.lines.join("\n")).collect();
    out.push_str(&body.join("\n\u{c}\n"));
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_for_export() {
        let text = "## Notes\n**Bold** and *italic* with `code`\n---\nEnd";
        assert_eq!(clean_for_export(text), "Notes\nBold and italic with code\n\nEnd");
    }

    #[test]
    fn test_clean_collapses_blank_lines() {
        assert_eq!(clean_for_export("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(clean_for_export("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_clean_leaves_no_markers() {
        let text = "# T\n### S\n***x*** `y` ---- z\n\n\n\n";
        let cleaned = clean_for_export(text);
        assert!(!cleaned.contains('#'));
        assert!(!cleaned.contains('*'));
        assert!(!cleaned.contains('`'));
        assert!(!cleaned.contains("---"));
        assert!(!cleaned.contains("\n\n\n"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            wrap("the quick brown fox", 10),
            vec!["the quick", "brown fox"]
        );
        assert_eq!(wrap("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_long_word() {
        assert_eq!(wrap("ab abcdefgh", 3), vec!["ab", "abc", "def", "gh"]);
    }

    #[test]
    fn test_paginate() {
        let layout = PageLayout {
            columns: 80,
            first_page_lines: 2,
            lines_per_page: 3,
        };
        let text = (1..=6).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let pages = paginate(&text, layout);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines, vec!["1", "2"]);
        assert_eq!(pages[1].lines, vec!["3", "4", "5"]);
        assert_eq!(pages[2].lines, vec!["6"]);
    }

    #[test]
    fn test_paginate_empty() {
        let pages = paginate("", PageLayout::default());
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("Quantum  Computing", "Notes"),
            "quantum-computing-notes.txt"
        );
    }

    #[test]
    fn test_render_export() {
        let layout = PageLayout {
            columns: 80,
            first_page_lines: 1,
            lines_per_page: 1,
        };
        let out = render_export("Notes", "Cells", "## One\nTwo", layout);
        assert_eq!(out, "Notes\nCells\n\nOne\n\u{c}\nTwo\n");
    }
}
