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

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;

/// A multiple-choice question, as emitted by the generation service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`. Generators are not trusted to keep this in
    /// range, hence the signed type.
    #[serde(rename = "answer")]
    pub correct_index: i64,
}

impl QuizQuestion {
    pub fn new(prompt: impl Into<String>, options: Vec<String>, correct_index: i64) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_index,
        }
    }

    /// The correct option, if `correct_index` points at one.
    pub fn correct_option(&self) -> Option<usize> {
        usize::try_from(self.correct_index)
            .ok()
            .filter(|index| *index < self.options.len())
    }

    pub fn has_valid_answer(&self) -> bool {
        self.correct_option().is_some()
    }

    /// Whether choosing `option` answers this question correctly. Always
    /// false for a question whose answer index is out of range.
    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_option() == Some(option)
    }
}

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").expect("Invalid regex"));

/// Remove Markdown code fences that generators like to wrap JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    CODE_FENCE.replace_all(raw, "").trim().to_string()
}

/// Decode a quiz payload, failing on malformed JSON or mistyped fields.
pub fn try_decode_quiz_payload(raw: &str) -> Fallible<Vec<QuizQuestion>> {
    let cleaned = strip_code_fences(raw);
    let questions: Vec<QuizQuestion> = serde_json::from_str(&cleaned)?;
    for (index, question) in questions.iter().enumerate() {
        if !question.has_valid_answer() {
            log::warn!(
                "Quiz question {} has answer index {} but only {} options; it cannot be answered correctly.",
                index + 1,
                question.correct_index,
                question.options.len()
            );
        }
        if question.options.len() < 2 {
            log::warn!(
                "Quiz question {} has {} options.",
                index + 1,
                question.options.len()
            );
        }
    }
    Ok(questions)
}

/// Decode a quiz payload. A malformed payload is logged and treated as an
/// empty question list.
pub fn decode_quiz_payload(raw: &str) -> Vec<QuizQuestion> {
    match try_decode_quiz_payload(raw) {
        Ok(questions) => questions,
        Err(e) => {
            log::warn!("Failed to parse quiz payload, showing no questions: {e}");
            Vec::new()
        }
    }
}
