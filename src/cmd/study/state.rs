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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use studypack_core::StudyPack;
use studypack_core::rng::TinyRng;
use studypack_core::session::QuizEngine;

#[derive(Clone)]
pub struct ServerState {
    pub pack: Arc<StudyPack>,
    pub engine: Arc<Mutex<QuizEngine<TinyRng>>>,
}

impl ServerState {
    pub fn new(pack: StudyPack, rng: TinyRng) -> Self {
        let engine = QuizEngine::new(pack.questions.clone(), rng);
        Self {
            pack: Arc::new(pack),
            engine: Arc::new(Mutex::new(engine)),
        }
    }

    /// Lock the quiz engine. A poisoned lock still holds a consistent
    /// engine, since transitions swap in whole values.
    pub fn engine(&self) -> MutexGuard<'_, QuizEngine<TinyRng>> {
        self.engine
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
