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

//! The quiz engine: one shuffled pass through a question list.
//!
//! A [`QuizSession`] is an immutable value. Every transition consumes the
//! session and returns its successor, so a half-updated session cannot be
//! observed. Duplicate or premature UI events (answering twice, advancing
//! before answering) return the session unchanged.

use serde::Serialize;

use crate::quiz::QuizQuestion;
use crate::rng::RandomSource;
use crate::rng::shuffle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizState {
    InProgress { current_index: usize },
    Completed,
}

/// How an option should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionFeedback {
    /// The question has not been answered yet.
    Neutral,
    /// The correct option, after answering.
    Correct,
    /// The selected option, which was wrong.
    Incorrect,
    /// Neither selected nor correct.
    Dimmed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizSession {
    order: Vec<QuizQuestion>,
    current_index: usize,
    answered: Vec<bool>,
    selected_answer: Option<usize>,
    score: usize,
    completed: bool,
}

impl QuizSession {
    /// Start a session over a fresh permutation of `questions`. Returns
    /// `None` when there is nothing to ask.
    pub fn start<R: RandomSource + ?Sized>(questions: &[QuizQuestion], rng: &mut R) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let order = shuffle(questions.to_vec(), rng);
        log::debug!("Starting quiz session with {} questions", order.len());
        Some(Self {
            answered: vec![false; order.len()],
            order,
            current_index: 0,
            selected_answer: None,
            score: 0,
            completed: false,
        })
    }

    /// Record an answer for the current question.
    ///
    /// Ignored if the question was already answered or the session is over.
    /// Any index is accepted; one that names no option simply never scores.
    pub fn answer(self, option: usize) -> Self {
        if self.completed || self.answered[self.current_index] {
            return self;
        }
        let question = &self.order[self.current_index];
        let gained = usize::from(question.is_correct(option));
        let mut answered = self.answered;
        answered[self.current_index] = true;
        Self {
            answered,
            selected_answer: Some(option),
            score: self.score + gained,
            ..self
        }
    }

    /// Move past the current question, once it has been answered.
    pub fn advance(self) -> Self {
        if self.completed || !self.answered[self.current_index] {
            return self;
        }
        if self.current_index + 1 < self.order.len() {
            Self {
                current_index: self.current_index + 1,
                selected_answer: None,
                ..self
            }
        } else {
            log::debug!("Quiz completed: {}/{}", self.score, self.order.len());
            Self {
                completed: true,
                ..self
            }
        }
    }

    pub fn state(&self) -> QuizState {
        if self.completed {
            QuizState::Completed
        } else {
            QuizState::InProgress {
                current_index: self.current_index,
            }
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The questions in the order they are asked.
    pub fn order(&self) -> &[QuizQuestion] {
        &self.order
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.order[self.current_index]
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answered.get(index).copied().unwrap_or(false)
    }

    pub fn is_current_answered(&self) -> bool {
        self.is_answered(self.current_index)
    }

    pub fn answered_count(&self) -> usize {
        self.answered.iter().filter(|a| **a).count()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.order.len()
    }

    /// Fraction of the quiz reached, counting the current question.
    pub fn progress(&self) -> f64 {
        (self.current_index + 1) as f64 / self.order.len() as f64
    }

    /// The score as a whole percentage, rounded half up. Only available
    /// once the session is completed.
    pub fn percentage(&self) -> Option<u32> {
        if !self.completed {
            return None;
        }
        let total = self.order.len();
        Some(((200 * self.score + total) / (2 * total)) as u32)
    }

    pub fn option_feedback(&self, option: usize) -> OptionFeedback {
        if !self.is_current_answered() {
            return OptionFeedback::Neutral;
        }
        if self.current_question().is_correct(option) {
            OptionFeedback::Correct
        } else if self.selected_answer == Some(option) {
            OptionFeedback::Incorrect
        } else {
            OptionFeedback::Dimmed
        }
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        if let Some(percentage) = self.percentage() {
            return QuizSnapshot::Completed {
                score: self.score,
                total: self.total(),
                percentage,
            };
        }
        let question = self.current_question();
        let answered = self.is_current_answered();
        QuizSnapshot::InProgress {
            current_index: self.current_index,
            total: self.total(),
            prompt: question.prompt.clone(),
            options: question.options.clone(),
            feedback: (0..question.options.len())
                .map(|i| self.option_feedback(i))
                .collect(),
            selected_answer: self.selected_answer,
            answered,
            correct_option: if answered {
                question.correct_option()
            } else {
                None
            },
            score: self.score,
            is_last: self.is_last_question(),
            progress: (self.progress() * 100.0).round() as u32,
        }
    }
}

/// A read-only view of the quiz for the display layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizSnapshot {
    NoQuestions,
    InProgress {
        current_index: usize,
        total: usize,
        prompt: String,
        options: Vec<String>,
        feedback: Vec<OptionFeedback>,
        selected_answer: Option<usize>,
        answered: bool,
        /// Only revealed once the question is answered.
        correct_option: Option<usize>,
        score: usize,
        is_last: bool,
        /// Percentage of the quiz reached, counting the current question.
        progress: u32,
    },
    Completed {
        score: usize,
        total: usize,
        percentage: u32,
    },
}

/// Either a running session or the "no questions available" state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Quiz {
    #[default]
    NoQuestions,
    Active(QuizSession),
}

impl Quiz {
    pub fn start<R: RandomSource + ?Sized>(questions: &[QuizQuestion], rng: &mut R) -> Self {
        match QuizSession::start(questions, rng) {
            Some(session) => Quiz::Active(session),
            None => Quiz::NoQuestions,
        }
    }

    pub fn answer(self, option: usize) -> Self {
        match self {
            Quiz::Active(session) => Quiz::Active(session.answer(option)),
            Quiz::NoQuestions => Quiz::NoQuestions,
        }
    }

    pub fn advance(self) -> Self {
        match self {
            Quiz::Active(session) => Quiz::Active(session.advance()),
            Quiz::NoQuestions => Quiz::NoQuestions,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match self {
            Quiz::Active(session) => Some(session),
            Quiz::NoQuestions => None,
        }
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        match self {
            Quiz::Active(session) => session.snapshot(),
            Quiz::NoQuestions => QuizSnapshot::NoQuestions,
        }
    }
}

/// Owns the original question list and the random source, and swaps in a
/// new [`Quiz`] value on every transition.
pub struct QuizEngine<R> {
    questions: Vec<QuizQuestion>,
    rng: R,
    quiz: Quiz,
}

impl<R: RandomSource> QuizEngine<R> {
    pub fn new(questions: Vec<QuizQuestion>, mut rng: R) -> Self {
        let quiz = Quiz::start(&questions, &mut rng);
        Self {
            questions,
            rng,
            quiz,
        }
    }

    /// Replace the question list and start over.
    pub fn load(&mut self, questions: Vec<QuizQuestion>) {
        self.questions = questions;
        self.restart();
    }

    /// The questions in authoring order.
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn answer(&mut self, option: usize) {
        self.quiz = std::mem::take(&mut self.quiz).answer(option);
    }

    pub fn advance(&mut self) {
        self.quiz = std::mem::take(&mut self.quiz).advance();
    }

    /// Discard the current session and start a new one over a fresh
    /// shuffle of the original questions.
    pub fn restart(&mut self) {
        log::debug!("Restarting quiz");
        self.quiz = Quiz::start(&self.questions, &mut self.rng);
    }

    pub fn snapshot(&self) -> QuizSnapshot {
        self.quiz.snapshot()
    }
}
