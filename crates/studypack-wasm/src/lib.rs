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

//! WASM bindings for studypack - renders study content and runs the quiz in the browser.

use wasm_bindgen::prelude::*;
use web_sys::console;

use studypack_core::classify::classify;
use studypack_core::export::PageLayout;
use studypack_core::export::export_file_name;
use studypack_core::export::render_export;
use studypack_core::pack::ContentKind;
use studypack_core::pack::StudyPack;
use studypack_core::rng::TinyRng;
use studypack_core::session::QuizEngine;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"studypack WASM initialized".into());
}

/// Classify generated text into render blocks, returned as a JSON array.
#[wasm_bindgen]
pub fn classify_content(text: &str) -> Result<String, JsValue> {
    serde_json::to_string(&classify(text))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize blocks: {}", e)))
}

/// Build the plain-text export of a piece of generated text.
#[wasm_bindgen]
pub fn export_text(title: &str, topic: &str, text: &str) -> String {
    render_export(title, topic, text, PageLayout::default())
}

/// The file name an export of `title` for `topic` is saved under.
#[wasm_bindgen]
pub fn export_name(topic: &str, title: &str) -> String {
    export_file_name(topic, title)
}

/// The main application state managed from JavaScript.
#[wasm_bindgen]
pub struct StudypackApp {
    /// The loaded pack, if any.
    pack: Option<StudyPack>,
    /// The quiz over the pack's questions.
    engine: QuizEngine<TinyRng>,
}

#[wasm_bindgen]
impl StudypackApp {
    /// Create a new StudypackApp instance with no content.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            pack: None,
            engine: QuizEngine::new(Vec::new(), TinyRng::from_seed(random_seed())),
        }
    }

    /// Load the four generated contents for a topic. The quiz payload is the
    /// raw, possibly code-fenced, JSON text. Returns the number of questions.
    #[wasm_bindgen]
    pub fn load_pack(
        &mut self,
        topic: &str,
        notes: &str,
        explanation: &str,
        examples: &str,
        quiz: &str,
    ) -> Result<usize, JsValue> {
        let pack = StudyPack::assemble(
            topic,
            Ok(notes.to_string()),
            Ok(explanation.to_string()),
            Ok(examples.to_string()),
            Ok(quiz.to_string()),
        )
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let count = pack.questions.len();
        if count == 0 {
            console::warn_1(&format!("No quiz questions for '{}'", pack.topic).into());
        }
        self.engine.load(pack.questions.clone());
        self.pack = Some(pack);
        Ok(count)
    }

    /// Forget the loaded pack, e.g. after a failed generation.
    #[wasm_bindgen]
    pub fn clear(&mut self) {
        self.pack = None;
        self.engine.load(Vec::new());
    }

    /// Get the current topic.
    #[wasm_bindgen]
    pub fn topic(&self) -> Option<String> {
        self.pack.as_ref().map(|pack| pack.topic.clone())
    }

    /// Get the blocks of one of the text contents as JSON.
    /// kind: "notes", "explanation" or "examples"
    #[wasm_bindgen]
    pub fn blocks(&self, kind: &str) -> Result<String, JsValue> {
        let kind = parse_kind(kind)?;
        let blocks = self
            .pack
            .as_ref()
            .map(|pack| pack.blocks(kind))
            .unwrap_or_default();
        serde_json::to_string(&blocks)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize blocks: {}", e)))
    }

    /// Get the export text of one of the text contents.
    #[wasm_bindgen]
    pub fn export(&self, kind: &str) -> Result<String, JsValue> {
        let kind = parse_kind(kind)?;
        let pack = self
            .pack
            .as_ref()
            .ok_or_else(|| JsValue::from_str("No content loaded"))?;
        let text = pack
            .text(kind)
            .ok_or_else(|| JsValue::from_str(&format!("{} cannot be exported", kind)))?;
        Ok(render_export(kind.title(), &pack.topic, text, PageLayout::default()))
    }

    /// Get the quiz state as JSON.
    #[wasm_bindgen]
    pub fn quiz_snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.engine.snapshot())
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize quiz: {}", e)))
    }

    /// Answer the current question.
    #[wasm_bindgen]
    pub fn answer(&mut self, option: usize) {
        self.engine.answer(option);
    }

    /// Move to the next question, or to the results.
    #[wasm_bindgen]
    pub fn advance(&mut self) {
        self.engine.advance();
    }

    /// Start over with a fresh shuffle.
    #[wasm_bindgen]
    pub fn restart(&mut self) {
        self.engine.restart();
    }
}

impl Default for StudypackApp {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_kind(kind: &str) -> Result<ContentKind, JsValue> {
    ContentKind::from_slug(kind).ok_or_else(|| JsValue::from_str(&format!("Invalid kind: {}", kind)))
}

/// A seed from the platform's entropy source, falling back to the clock.
fn random_seed() -> u64 {
    let mut bytes = [0u8; 8];
    match getrandom::getrandom(&mut bytes) {
        Ok(()) => u64::from_le_bytes(bytes),
        Err(_) => js_sys::Date::now() as u64,
    }
}
