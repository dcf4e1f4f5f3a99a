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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::study::state::ServerState;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub enum Action {
    Answer,
    Next,
    Restart,
}

#[derive(Deserialize)]
pub struct QuizForm {
    action: Action,
    option: Option<usize>,
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<QuizForm>) -> Redirect {
    let mut engine = state.engine();
    log::debug!("Quiz action: {:?} {:?}", form.action, form.option);
    match (form.action, form.option) {
        (Action::Answer, Some(option)) => engine.answer(option),
        (Action::Answer, None) => {}
        (Action::Next, _) => engine.advance(),
        (Action::Restart, _) => engine.restart(),
    }
    Redirect::to("/?tab=quiz")
}
