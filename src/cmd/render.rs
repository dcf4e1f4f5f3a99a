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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use studypack_core::classify::BlockKind;
use studypack_core::classify::RenderBlock;
use studypack_core::error::Fallible;
use studypack_core::pack::ContentKind;

use crate::collection::Collection;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum RenderFormat {
    /// Human-readable text.
    Text,
    /// The blocks as a JSON array.
    Json,
}

impl Display for RenderFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Text => write!(f, "text"),
            RenderFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_blocks(
    directory: Option<String>,
    kind: ContentKind,
    format: RenderFormat,
) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let blocks = collection.pack.blocks(kind);
    let output = match format {
        RenderFormat::Text => format_blocks(&blocks),
        RenderFormat::Json => serde_json::to_string_pretty(&blocks)?,
    };
    println!("{output}");
    Ok(())
}

/// Lay blocks out for a terminal: underlined headings, indented bullets.
pub fn format_blocks(blocks: &[RenderBlock]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        let is_heading = matches!(block.kind, BlockKind::Heading | BlockKind::Subheading);
        if i > 0 && is_heading {
            out.push('\n');
        }
        match block.kind {
            BlockKind::Heading => {
                out.push_str(&block.text);
                out.push('\n');
                out.push_str(&"=".repeat(block.text.chars().count()));
            }
            BlockKind::Subheading => {
                out.push_str(&block.text);
                out.push('\n');
                out.push_str(&"-".repeat(block.text.chars().count()));
            }
            BlockKind::Bullet => {
                out.push_str("  ● ");
                out.push_str(&block.text);
            }
            BlockKind::Paragraph => out.push_str(&block.text),
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use studypack_core::classify::classify;

    use super::*;
    use crate::helper::SAMPLE_NOTES;

    #[test]
    fn test_format_blocks() {
        let blocks = classify(SAMPLE_NOTES);
        let expected = "Photosynthesis\n==============\n\nKey terms\n=========\n  ● Chlorophyll absorbs light\n  ● Glucose is produced\n\nLight reactions\n---------------\nThey happen in the thylakoids.\n";
        assert_eq!(format_blocks(&blocks), expected);
    }

    #[test]
    fn test_format_no_blocks() {
        assert_eq!(format_blocks(&[]), "");
    }

    #[test]
    fn test_json_output() -> Fallible<()> {
        let blocks = classify("- one");
        let json = serde_json::to_string(&blocks)?;
        assert_eq!(json, r#"[{"kind":"bullet","text":"one"}]"#);
        Ok(())
    }
}
