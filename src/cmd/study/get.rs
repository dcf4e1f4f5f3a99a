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

use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use serde::Deserialize;
use studypack_core::classify::BlockKind;
use studypack_core::classify::RenderBlock;
use studypack_core::pack::ContentKind;
use studypack_core::session::OptionFeedback;
use studypack_core::session::QuizSnapshot;

use crate::cmd::study::state::ServerState;
use crate::cmd::study::template::page_template;

#[derive(Deserialize)]
pub struct TabQuery {
    tab: Option<String>,
}

pub async fn get_handler(
    State(state): State<ServerState>,
    Query(query): Query<TabQuery>,
) -> (StatusCode, Html<String>) {
    let kind = query
        .tab
        .as_deref()
        .and_then(ContentKind::from_slug)
        .unwrap_or(ContentKind::Notes);
    let body = match kind {
        ContentKind::Quiz => {
            let snapshot = state.engine().snapshot();
            render_quiz(&state.pack.topic, &snapshot)
        }
        _ => render_text(kind, &state.pack.topic, &state.pack.blocks(kind)),
    };
    let page = page_template(&state.pack.topic, kind, body);
    (StatusCode::OK, Html(page.into_string()))
}

fn render_text(kind: ContentKind, topic: &str, blocks: &[RenderBlock]) -> Markup {
    html! {
        div.card {
            div.card-header {
                div {
                    h2 { (kind.title()) }
                    p.topic { (topic) }
                }
                a.download href=(format!("/export/{}", kind.slug())) { "Download" }
            }
            @if blocks.is_empty() {
                p.empty { "Nothing was generated here." }
            }
            div.content {
                @for block in blocks {
                    (render_block(block))
                }
            }
        }
    }
}

fn render_block(block: &RenderBlock) -> Markup {
    html! {
        @match block.kind {
            BlockKind::Heading => h3.heading { (block.text) },
            BlockKind::Subheading => h4.subheading { (block.text) },
            BlockKind::Bullet => div.bullet {
                span.marker { "●" }
                p { (block.text) }
            },
            BlockKind::Paragraph => p.paragraph { (block.text) },
        }
    }
}

fn feedback_class(feedback: OptionFeedback) -> &'static str {
    match feedback {
        OptionFeedback::Neutral => "option",
        OptionFeedback::Correct => "option correct",
        OptionFeedback::Incorrect => "option incorrect",
        OptionFeedback::Dimmed => "option dimmed",
    }
}

fn render_quiz(topic: &str, snapshot: &QuizSnapshot) -> Markup {
    match snapshot {
        QuizSnapshot::NoQuestions => html! {
            div.card.empty {
                p { "No quiz questions are available for this topic." }
            }
        },
        QuizSnapshot::InProgress {
            current_index,
            total,
            prompt,
            options,
            feedback,
            answered,
            is_last,
            progress,
            ..
        } => {
            let position = current_index + 1;
            html! {
                div.card.quiz {
                    div.card-header {
                        div {
                            h2 { "Quiz" }
                            p.topic { (topic) }
                        }
                        div.counter { (position) " / " (total) }
                    }
                    div.progress {
                        div.progress-bar style=(format!("width: {progress}%")) {}
                    }
                    h3.prompt { (prompt) }
                    div.options {
                        @for (i, (option, feedback)) in options.iter().zip(feedback).enumerate() {
                            form method="post" action="/quiz" {
                                input type="hidden" name="action" value="Answer";
                                button type="submit" name="option" value=(i)
                                    class=(feedback_class(*feedback)) disabled[*answered] {
                                    (option)
                                    @match feedback {
                                        OptionFeedback::Correct => span.mark { " ✔" },
                                        OptionFeedback::Incorrect => span.mark { " ✘" },
                                        _ => {},
                                    }
                                }
                            }
                        }
                    }
                    @if options.is_empty() && !*answered {
                        form method="post" action="/quiz" {
                            input type="hidden" name="action" value="Answer";
                            button.next type="submit" name="option" value="0" {
                                "Skip Question"
                            }
                        }
                    }
                    @if *answered {
                        form method="post" action="/quiz" {
                            button.next type="submit" name="action" value="Next" {
                                @if *is_last { "See Results" } @else { "Next Question" }
                            }
                        }
                    }
                }
            }
        }
        QuizSnapshot::Completed {
            score,
            total,
            percentage,
        } => html! {
            div.card.result {
                div.percentage { (percentage) "%" }
                h2 { "Quiz Complete" }
                p { "You scored " (score) " out of " (total) " questions correctly" }
                form method="post" action="/quiz" {
                    button.restart type="submit" name="action" value="Restart" {
                        "Try Again (Shuffled)"
                    }
                }
            }
        },
    }
}
