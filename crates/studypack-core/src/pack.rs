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

use serde::Deserialize;
use serde::Serialize;

use crate::classify::RenderBlock;
use crate::classify::classify;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::quiz::QuizQuestion;
use crate::quiz::decode_quiz_payload;

/// The four kinds of content generated for a topic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Notes,
    Explanation,
    Examples,
    Quiz,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Notes,
        ContentKind::Explanation,
        ContentKind::Examples,
        ContentKind::Quiz,
    ];

    /// The name of the file holding this content in a pack directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ContentKind::Notes => "notes.md",
            ContentKind::Explanation => "explanation.md",
            ContentKind::Examples => "examples.md",
            ContentKind::Quiz => "quiz.json",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ContentKind::Notes => "Notes",
            ContentKind::Explanation => "Explanation",
            ContentKind::Examples => "Examples",
            ContentKind::Quiz => "Quiz",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ContentKind::Notes => "notes",
            ContentKind::Explanation => "explanation",
            ContentKind::Examples => "examples",
            ContentKind::Quiz => "quiz",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        ContentKind::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// Optional `pack.toml` at the root of a pack directory.
#[derive(Debug, Default, Deserialize)]
pub struct PackManifest {
    pub topic: Option<String>,
}

impl PackManifest {
    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Everything generated for one topic.
#[derive(Clone, Debug, PartialEq)]
pub struct StudyPack {
    pub topic: String,
    pub notes: String,
    pub explanation: String,
    pub examples: String,
    pub questions: Vec<QuizQuestion>,
}

impl StudyPack {
    /// Assemble a pack from the four generation results. If any of them
    /// failed, the whole pack fails and no partial content is kept.
    ///
    /// A quiz payload that was delivered but cannot be decoded is not a
    /// failure: the pack simply has no questions.
    pub fn assemble(
        topic: impl Into<String>,
        notes: Fallible<String>,
        explanation: Fallible<String>,
        examples: Fallible<String>,
        quiz: Fallible<String>,
    ) -> Fallible<Self> {
        let topic = topic.into();
        let check = |kind: ContentKind, result: Fallible<String>| {
            result.map_err(|e| {
                log::warn!("Failed to get {kind} for '{topic}': {e}");
                ErrorReport::new(format!("Failed to generate content for '{topic}'."))
            })
        };
        let notes = check(ContentKind::Notes, notes)?;
        let explanation = check(ContentKind::Explanation, explanation)?;
        let examples = check(ContentKind::Examples, examples)?;
        let quiz = check(ContentKind::Quiz, quiz)?;
        let questions = decode_quiz_payload(&quiz);
        Ok(Self {
            topic,
            notes,
            explanation,
            examples,
            questions,
        })
    }

    /// The raw text of one of the text contents. The quiz has none.
    pub fn text(&self, kind: ContentKind) -> Option<&str> {
        match kind {
            ContentKind::Notes => Some(&self.notes),
            ContentKind::Explanation => Some(&self.explanation),
            ContentKind::Examples => Some(&self.examples),
            ContentKind::Quiz => None,
        }
    }

    pub fn blocks(&self, kind: ContentKind) -> Vec<RenderBlock> {
        self.text(kind).map(classify).unwrap_or_default()
    }
}
