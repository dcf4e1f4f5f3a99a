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

use std::process::exit;

use clap::Parser;
use clap::ValueEnum;
use studypack_core::error::Fallible;
use studypack_core::pack::ContentKind;
use tokio::spawn;

use crate::cmd::export::export_pack;
use crate::cmd::quiz::run_quiz;
use crate::cmd::render::RenderFormat;
use crate::cmd::render::print_blocks;
use crate::cmd::study::server::ServerConfig;
use crate::cmd::study::server::start_server;
use crate::utils::wait_for_server;

/// The text contents of a pack.
#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum TextKind {
    Notes,
    Explanation,
    Examples,
}

impl From<TextKind> for ContentKind {
    fn from(kind: TextKind) -> Self {
        match kind {
            TextKind::Notes => ContentKind::Notes,
            TextKind::Explanation => ContentKind::Explanation,
            TextKind::Examples => ContentKind::Examples,
        }
    }
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print the classified blocks of one of the pack's texts.
    Render {
        /// Path to the pack directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which text to render.
        #[arg(long, value_enum, default_value_t = TextKind::Notes)]
        kind: TextKind,
        /// Which output format to use.
        #[arg(long, default_value_t = RenderFormat::Text)]
        format: RenderFormat,
    },
    /// Take the pack's quiz in the terminal.
    Quiz {
        /// Path to the pack directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Fixed seed for the question shuffle. By default, the clock is used.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Export one of the pack's texts as paginated plain text.
    Export {
        /// Path to the pack directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which text to export.
        #[arg(long, value_enum, default_value_t = TextKind::Notes)]
        kind: TextKind,
        /// Optional path to the output file. By default, a name is derived from the topic.
        #[arg(long)]
        output: Option<String>,
    },
    /// Browse the pack and take its quiz through a web interface.
    Serve {
        /// Path to the pack directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Fixed seed for the question shuffle. By default, the clock is used.
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Render {
            directory,
            kind,
            format,
        } => print_blocks(directory, kind.into(), format),
        Command::Quiz { directory, seed } => run_quiz(directory, seed),
        Command::Export {
            directory,
            kind,
            output,
        } => export_pack(directory, kind.into(), output),
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
            seed,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                seed,
            };
            start_server(config).await
        }
    }
}
