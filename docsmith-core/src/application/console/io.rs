use crate::agent::{Confirm, ConfirmationRequest, is_affirmative};
use crate::tooling::AuthPrompt;
use async_trait::async_trait;
use crossterm::style::Stylize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared line-oriented terminal. Cloned behind an `Arc` into the gate and
/// the authorizer so prompts and answers use the same streams as the loop.
pub struct Console<R, W> {
    input: Mutex<Lines<R>>,
    output: Mutex<W>,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            input: Mutex::new(reader.lines()),
            output: Mutex::new(writer),
        }
    }

    /// Writes `prompt` and reads one line; `None` at end of input.
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        self.write(prompt).await?;
        let mut input = self.input.lock().await;
        Ok(input.next_line().await?)
    }

    pub async fn write(&self, text: &str) -> Result<(), ConsoleError> {
        let mut output = self.output.lock().await;
        output.write_all(text.as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }

    pub async fn write_line(&self, text: &str) -> Result<(), ConsoleError> {
        self.write(&format!("{text}\n")).await
    }

    pub async fn write_green(&self, text: &str) -> Result<(), ConsoleError> {
        self.write_line(&format!("{}", text.green())).await
    }

    pub async fn write_red(&self, text: &str) -> Result<(), ConsoleError> {
        self.write_line(&format!("{}", text.red())).await
    }

    async fn ask(&self, request: &ConfirmationRequest) -> Result<bool, ConsoleError> {
        let input = serde_json::to_string_pretty(&request.input)
            .unwrap_or_else(|_| request.input.to_string());
        self.write_line(&format!(
            "⚙️: Human in the loop required for tool call {}",
            request.tool_name
        ))
        .await?;
        self.write_line(&format!("⚙️: Please approve the tool call {input}"))
            .await?;
        let answer = self
            .read_line("Do you approve this tool call? [y/N] ")
            .await?;
        Ok(answer.as_deref().is_some_and(is_affirmative))
    }
}

impl<R, W> Console<R, W>
where
    W: AsRef<[u8]>,
{
    /// Everything written so far, for in-memory writers.
    pub async fn written(&self) -> String {
        String::from_utf8_lossy(self.output.lock().await.as_ref()).into_owned()
    }
}

#[async_trait]
impl<R, W> Confirm for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&self, request: &ConfirmationRequest) -> bool {
        match self.ask(request).await {
            Ok(approved) => approved,
            Err(err) => {
                warn!(error = %err, "Confirmation prompt failed, treating as denial");
                false
            }
        }
    }
}

#[async_trait]
impl<R, W> AuthPrompt for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn authorization_required(&self, tool_name: &str, url: &str) {
        let lines = [
            format!("⚙️: Authorization required for tool call {tool_name}"),
            format!("⚙️: Please authorize in your browser {url}"),
            "⚙️: Waiting for you to complete authorization...".to_string(),
        ];
        for line in lines {
            if let Err(err) = self.write_line(&line).await {
                warn!(error = %err, "Failed to show authorization prompt");
                return;
            }
        }
    }

    async fn authorization_finished(&self, tool_name: &str, granted: bool) {
        let line = if granted {
            "⚙️: Authorization granted. Resuming execution...".to_string()
        } else {
            format!("⚙️: Authorization for {tool_name} was not completed.")
        };
        if let Err(err) = self.write_line(&line).await {
            warn!(error = %err, "Failed to show authorization result");
        }
    }
}
