use crate::bot::{BotRuntime, ChoiceSet, Dispatcher, InboundEvent, OutboundEffect, Transport};
use crate::state::SessionRegistry;
use crate::utils::{AppConfig, BotError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

const UPLOAD_PREFIX: &str = ":upload ";
const QUIT: &str = ":quit";

pub struct ConsoleTransport {
    output_dir: PathBuf,
}

impl ConsoleTransport {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    async fn save_file(&self, file_name: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }
}

pub fn render_text(conversation_id: &str, message: &str, choices: &ChoiceSet) -> String {
    let mut out = format!("[{}] {}\n", conversation_id, message);
    if let ChoiceSet::Options(rows) = choices {
        for row in rows {
            out.push_str("    > ");
            out.push_str(&row.join(" | "));
            out.push('\n');
        }
    }
    out
}

#[async_trait]
impl Transport for ConsoleTransport {
    async fn deliver(&self, conversation_id: &str, effect: OutboundEffect) -> Result<()> {
        let out = match effect {
            OutboundEffect::SendText { message, choices } => {
                render_text(conversation_id, &message, &choices)
            }
            OutboundEffect::SendFile { file_name, bytes } => {
                let path = self
                    .save_file(&file_name, &bytes)
                    .await
                    .map_err(|e| BotError::TransportFailure(e.to_string()))?;
                format!("[{}] Saved {}\n", conversation_id, path.display())
            }
        };

        let mut stdout = tokio::io::stdout();
        stdout
            .write_all(out.as_bytes())
            .await
            .map_err(|e| BotError::TransportFailure(e.to_string()))?;
        stdout
            .flush()
            .await
            .map_err(|e| BotError::TransportFailure(e.to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConsoleInput {
    Event(InboundEvent),
    Quit,
}

pub async fn read_console_line(conversation_id: &str, line: &str) -> Result<ConsoleInput> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line == QUIT {
        return Ok(ConsoleInput::Quit);
    }

    if let Some(path) = line.strip_prefix(UPLOAD_PREFIX) {
        let path = Path::new(path.trim());
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        return Ok(ConsoleInput::Event(InboundEvent::file(
            conversation_id,
            file_name,
            bytes,
        )));
    }

    Ok(ConsoleInput::Event(InboundEvent::text(conversation_id, line)))
}

pub async fn run_console(config: &AppConfig) -> anyhow::Result<()> {
    let conversation_id = config.console.conversation_id.clone();
    let transport = ConsoleTransport::new(config.console.output_dir.clone());
    let runtime = BotRuntime::new(
        Dispatcher::new(SessionRegistry::new()),
        transport,
        config.runtime.event_buffer_size,
    )
    .with_idle_timeout(Duration::from_secs(config.runtime.idle_timeout_secs));

    let (tx, rx) = mpsc::channel(config.runtime.event_buffer_size.max(1));
    let shutdown = CancellationToken::new();
    let runtime_task = tokio::spawn(runtime.run(rx, shutdown.clone()));

    tracing::info!(
        conversation_id = %conversation_id,
        "Console ready. Type /start, ':upload <path>' to send a file, ':quit' to exit"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                shutdown.cancel();
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        match read_console_line(&conversation_id, &line).await {
            Ok(ConsoleInput::Event(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Ok(ConsoleInput::Quit) => break,
            Err(e) => tracing::warn!(error = %e, "Could not read input"),
        }
    }

    drop(tx);
    runtime_task.await?;
    tracing::info!("Console session closed");
    Ok(())
}
