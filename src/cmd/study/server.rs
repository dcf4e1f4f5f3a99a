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

use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use studypack_core::error::Fallible;
use studypack_core::export::export_file_name;
use studypack_core::pack::ContentKind;
use tokio::net::TcpListener;
use tokio::signal;

use crate::cmd::export::export_document;
use crate::cmd::study::get::get_handler;
use crate::cmd::study::post::post_handler;
use crate::cmd::study::state::ServerState;
use crate::collection::Collection;
use crate::utils::CACHE_CONTROL_IMMUTABLE;
use crate::utils::session_rng;

pub struct ServerConfig {
    pub directory: Option<String>,
    pub host: String,
    pub port: u16,
    pub seed: Option<u64>,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let Collection { pack, .. } = Collection::new(config.directory)?;

    let state = ServerState::new(pack, session_rng(config.seed));
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/quiz", post(post_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.route("/export/{kind}", get(export_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    // Start the server with graceful shutdown on Ctrl+C.
    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn export_handler(
    State(state): State<ServerState>,
    Path(kind): Path<String>,
) -> (StatusCode, [(HeaderName, String); 2], String) {
    let document = ContentKind::from_slug(&kind)
        .map(|kind| (kind, export_document(&state.pack, kind)));
    match document {
        Some((kind, Ok(text))) => {
            let file_name = export_file_name(&state.pack.topic, kind.title());
            (
                StatusCode::OK,
                [
                    (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
                    (
                        CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{file_name}\""),
                    ),
                ],
                text,
            )
        }
        _ => (
            StatusCode::NOT_FOUND,
            [
                (CONTENT_TYPE, "text/plain".to_string()),
                (CONTENT_DISPOSITION, "inline".to_string()),
            ],
            "Not Found".to_string(),
        ),
    }
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await
        }
    }
}
