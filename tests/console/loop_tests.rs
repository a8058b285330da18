// Console loop tests - REPL behavior over in-memory input and output
//
// The same Console answers confirmation and authorization prompts, so
// approval answers are just further lines of scripted input.

#[path = "../support/mod.rs"]
mod support;

use docsmith_core::agent::DenialPolicy;
use docsmith_core::console::{
    Console, ConsoleHooks, GOODBYE, WELCOME, run_runner_loop, run_session_loop,
};
use docsmith_core::session::{InMemorySessionService, SessionRunner};
use docsmith_core::types::{ChatMessage, MessageRole, RunContext};
use serde_json::Map;
use std::io::Cursor;
use std::sync::Arc;
use support::{ScriptedProvider, StubService, agent_builder, tool_call};

type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

fn console(input: &str) -> Arc<TestConsole> {
    Arc::new(Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
}

fn context() -> RunContext {
    RunContext::new("me@example.com")
}

#[tokio::test]
async fn runner_loop_answers_until_exit() {
    let provider = ScriptedProvider::new(vec![ChatMessage::assistant("Hi there!")]);
    let service = Arc::new(StubService::default());
    let console = console("  hello there \n\n   \n Exit \nnever read\n");
    let agent = agent_builder(&provider, service, console.clone(), None).build();

    run_runner_loop(console.as_ref(), &agent, &context())
        .await
        .expect("loop ends cleanly");

    let out = console.written().await;
    assert!(out.contains(WELCOME));
    assert!(out.contains("You: "));
    assert!(out.contains("Hi there!\n"));
    assert!(out.contains(GOODBYE));
    let requests = provider.requests().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].text(), "  hello there ");
}

#[tokio::test]
async fn refused_call_is_cancelled_and_recorded_in_history() {
    let provider = ScriptedProvider::new(vec![
        tool_call(
            "call_1",
            "GoogleDocs_CreateDocumentFromText",
            r#"{"title":"Plan","text_content":"Q3 goals"}"#,
        ),
        ChatMessage::assistant("Anything else?"),
    ]);
    let service = Arc::new(StubService::default());
    let console = console("create a plan doc\nn\nwhat now?\n");
    let agent = agent_builder(&provider, service.clone(), console.clone(), None).build();

    run_runner_loop(console.as_ref(), &agent, &context())
        .await
        .expect("loop ends at end of input");

    let out = console.written().await;
    assert!(out.contains(
        "⚙️: Human in the loop required for tool call GoogleDocs_CreateDocumentFromText"
    ));
    assert!(out.contains("\"title\": \"Plan\""));
    assert!(out.contains("Do you approve this tool call? [y/N] "));
    assert!(out.contains(
        "Sure, I cancelled the call to GoogleDocs_CreateDocumentFromText. What else can I do for you today?"
    ));
    assert!(service.executed.lock().await.is_empty());

    // The next turn sees the refusal exchange, not the abandoned tool call.
    let requests = provider.requests().await;
    assert_eq!(requests.len(), 2);
    let history = &requests[1].messages;
    let roles: Vec<MessageRole> = history.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
        ]
    );
    assert_eq!(
        history[1].text(),
        "Please confirm the call to GoogleDocs_CreateDocumentFromText"
    );
    assert_eq!(history[2].text(), "I changed my mind, please don't do it!");
    assert!(history.iter().all(|m| !m.has_tool_calls()));
}

#[tokio::test]
async fn approved_call_runs_after_authorization() {
    let provider = ScriptedProvider::new(vec![
        tool_call(
            "call_1",
            "GoogleDocs_CreateDocumentFromText",
            r#"{"title":"Plan"}"#,
        ),
        ChatMessage::assistant("Created your document."),
    ]);
    let service = Arc::new(StubService {
        pending_auth: true,
        ..StubService::default()
    });
    let console = console("create a plan doc\nYES\nexit\n");
    let hooks = Arc::new(ConsoleHooks::new("docs", console.clone()));
    let agent = agent_builder(
        &provider,
        service.clone(),
        console.clone(),
        Some(console.clone()),
    )
    .hooks(hooks.clone())
    .build();

    run_runner_loop(console.as_ref(), &agent, &context())
        .await
        .expect("loop ends cleanly");

    let out = console.written().await;
    assert!(out.contains(
        "⚙️: Authorization required for tool call GoogleDocs.CreateDocumentFromText"
    ));
    assert!(out.contains("⚙️: Please authorize in your browser https://accounts.example.com/consent"));
    assert!(out.contains("⚙️: Authorization granted. Resuming execution..."));
    assert!(out.contains("Created your document.\n"));
    assert!(out.contains("### (docs) 1: Agent google_agent started"));
    assert!(out.contains(
        "### (docs) 2: Agent google_agent started tool GoogleDocs_CreateDocumentFromText with context: user_id=me@example.com"
    ));
    assert!(out.contains("### (docs) 3: Agent google_agent ended tool GoogleDocs_CreateDocumentFromText"));
    assert!(out.contains("### (docs) 4: Agent google_agent ended"));
    assert_eq!(hooks.event_count(), 4);

    let executed = service.executed.lock().await;
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].0, "GoogleDocs.CreateDocumentFromText");
}

#[tokio::test]
async fn model_failure_keeps_loop_alive() {
    let provider = ScriptedProvider::new(Vec::new());
    let service = Arc::new(StubService::default());
    let console = console("hello\nhello again\nexit\n");
    let agent = agent_builder(&provider, service, console.clone(), None).build();

    run_runner_loop(console.as_ref(), &agent, &context())
        .await
        .expect("loop ends cleanly");

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 2);
    // The failed user turn stays in the history.
    assert_eq!(requests[1].messages.len(), 2);
    assert!(console.written().await.contains(GOODBYE));
}

#[tokio::test]
async fn session_loop_prints_agent_events() {
    let provider = ScriptedProvider::new(vec![
        tool_call("call_1", "GoogleDocs_WhoAmI", "{}"),
        ChatMessage::assistant("You are me@example.com."),
    ]);
    let service = Arc::new(StubService::default());
    let console = console("who am I?\nexit\n");
    let agent = agent_builder(&provider, service, console.clone(), None)
        .denial_policy(DenialPolicy::Record)
        .build();
    let sessions = Arc::new(InMemorySessionService::new());
    let session = sessions
        .create_session("my_agent", "me@example.com", Map::new())
        .await;
    let runner = SessionRunner::new("my_agent", Arc::new(agent), sessions);

    run_session_loop(console.as_ref(), &runner, "me@example.com", &session.id)
        .await
        .expect("loop ends cleanly");

    let out = console.written().await;
    assert!(out.contains("User: "));
    assert!(out.contains("** google_agent: You are me@example.com.\n"));
    assert!(!out.contains("** google_agent: \n"));
    assert!(out.contains("Goodbye!"));
}
