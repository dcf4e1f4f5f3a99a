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

//! studypack-core: Core library for studypack.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - Classifying generated study text into typed render blocks
//! - Decoding generated quiz payloads
//! - Running shuffled, single-pass quiz sessions
//! - Exporting study text as paginated plain text

pub mod classify;
pub mod error;
pub mod export;
pub mod pack;
pub mod quiz;
pub mod rng;
pub mod session;

// Re-exports for convenience
pub use classify::{BlockKind, RenderBlock, classify};
pub use error::{ErrorReport, Fallible, fail};
pub use pack::{ContentKind, StudyPack};
pub use quiz::{QuizQuestion, decode_quiz_payload};
pub use rng::{RandomSource, TinyRng};
pub use session::{Quiz, QuizEngine, QuizSession, QuizSnapshot};
