use super::io::{Console, ConsoleError};
use crate::agent::{Agent, AgentError, refusal_transcript};
use crate::session::SessionRunner;
use crate::types::{ChatMessage, RunContext};
use futures::StreamExt;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, warn};

pub const WELCOME: &str = "Welcome to the chatbot! Type 'exit' to quit.";
pub const GOODBYE: &str = "Goodbye!";

enum Input {
    Prompt(String),
    Skip,
    Exit,
}

/// Whitespace decides blank and `exit` lines; prompts keep the text as typed.
fn classify(line: Option<String>) -> Input {
    match line {
        None => Input::Exit,
        Some(line) => {
            let text = line.trim();
            if text.is_empty() {
                Input::Skip
            } else if text.eq_ignore_ascii_case("exit") {
                Input::Exit
            } else {
                Input::Prompt(line)
            }
        }
    }
}

/// Message-list conversation: the history is rebuilt from each run's output.
///
/// A refused tool call discards whatever the run produced and records the
/// refusal exchange instead.
pub async fn run_runner_loop<R, W>(
    console: &Console<R, W>,
    agent: &Agent,
    context: &RunContext,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    console.write_green(WELCOME).await?;
    let mut history: Vec<ChatMessage> = Vec::new();

    loop {
        let prompt = match classify(console.read_line("You: ").await?) {
            Input::Prompt(prompt) => prompt,
            Input::Skip => continue,
            Input::Exit => break,
        };
        history.push(ChatMessage::user(prompt));

        match agent.run(history.clone(), context).await {
            Ok(result) => {
                history = result.to_input_list();
                console.write_line(&result.final_output).await?;
            }
            Err(AgentError::ToolDenied { tool_name }) => {
                history.extend(refusal_transcript(&tool_name));
                let reply = history.last().map(ChatMessage::text).unwrap_or_default();
                console.write_line(reply).await?;
            }
            Err(err) => {
                warn!(error = %err, "Agent run failed");
                console.write_line(&err.user_message()).await?;
            }
        }
        debug!(items = history.len(), "Conversation history updated");
    }

    console.write_red(GOODBYE).await?;
    Ok(())
}

/// Session conversation: every agent event with text is printed as
/// `** author: text` while the run is still going.
pub async fn run_session_loop<R, W>(
    console: &Console<R, W>,
    runner: &SessionRunner,
    user_id: &str,
    session_id: &str,
) -> Result<(), ConsoleError>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    console.write_green(WELCOME).await?;

    loop {
        let prompt = match classify(console.read_line("User: ").await?) {
            Input::Prompt(prompt) => prompt,
            Input::Skip => continue,
            Input::Exit => break,
        };

        let mut events = match runner.run(user_id, session_id, &prompt).await {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "Session run could not start");
                console.write_line(&err.user_message()).await?;
                continue;
            }
        };

        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    if let Some(text) = event.text() {
                        console
                            .write_line(&format!("** {}: {text}", event.author))
                            .await?;
                    }
                }
                Err(err) => {
                    warn!(error = %err, "Session run failed");
                    console.write_line(&err.user_message()).await?;
                }
            }
        }
    }

    console.write_red(GOODBYE).await?;
    Ok(())
}
