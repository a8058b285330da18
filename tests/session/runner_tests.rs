// Session runner tests - SessionRunner over InMemorySessionService

#[path = "../support/mod.rs"]
mod support;

use docsmith_core::agent::{AgentError, AutoApprove, Confirm, ConfirmationRequest, DenialPolicy};
use docsmith_core::session::{Event, InMemorySessionService, SessionError, SessionRunner};
use docsmith_core::types::{ChatMessage, MessageRole};
use futures::StreamExt;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use support::{ScriptedProvider, StubService, agent_builder, tool_call};

struct Refuse;

#[async_trait::async_trait]
impl Confirm for Refuse {
    async fn confirm(&self, _request: &ConfirmationRequest) -> bool {
        false
    }
}

const APP: &str = "my_agent";
const USER: &str = "me@example.com";

async fn setup(
    responses: Vec<ChatMessage>,
    confirmer: Arc<dyn Confirm>,
    policy: DenialPolicy,
) -> (SessionRunner, ScriptedProvider, Arc<StubService>, String) {
    let provider = ScriptedProvider::new(responses);
    let service = Arc::new(StubService::default());
    let agent = agent_builder(&provider, service.clone(), confirmer, None)
        .denial_policy(policy)
        .build();
    let sessions = Arc::new(InMemorySessionService::new());
    let mut state = Map::new();
    state.insert("user_id".into(), Value::String(USER.into()));
    let session = sessions.create_session(APP, USER, state).await;
    let runner = SessionRunner::new(APP, Arc::new(agent), sessions);
    (runner, provider, service, session.id)
}

async fn collect(
    runner: &SessionRunner,
    session_id: &str,
    text: &str,
) -> Vec<Result<Event, SessionError>> {
    runner
        .run(USER, session_id, text)
        .await
        .expect("session exists")
        .collect()
        .await
}

#[tokio::test]
async fn events_are_streamed_and_stored() {
    let (runner, provider, _service, session_id) = setup(
        vec![
            ChatMessage::assistant("Hello! What document shall we work on?"),
            ChatMessage::assistant("Sure, here is your list."),
        ],
        Arc::new(AutoApprove),
        DenialPolicy::Record,
    )
    .await;

    let events = collect(&runner, &session_id, "hi").await;
    assert_eq!(events.len(), 1);
    let event = events[0].as_ref().expect("event");
    assert_eq!(event.author, "google_agent");
    assert_eq!(event.text(), Some("Hello! What document shall we work on?"));

    collect(&runner, &session_id, "list my docs").await;

    let session = runner
        .sessions()
        .get_session(APP, USER, &session_id)
        .await
        .expect("session");
    assert_eq!(session.events.len(), 4);
    assert_eq!(session.events[0].author, "user");
    assert_eq!(session.state["user_id"], json!(USER));

    // The second turn replays the stored conversation.
    let requests = provider.requests().await;
    let roles: Vec<MessageRole> = requests[1].messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
    );
}

#[tokio::test]
async fn unknown_or_foreign_session_is_rejected() {
    let (runner, _provider, _service, session_id) =
        setup(Vec::new(), Arc::new(AutoApprove), DenialPolicy::Record).await;

    let missing = runner.run(USER, "no-such-session", "hi").await;
    assert!(matches!(missing, Err(SessionError::NotFound { .. })));

    let foreign = runner.run("someone@else.com", &session_id, "hi").await;
    assert!(matches!(foreign, Err(SessionError::NotFound { .. })));

    let session = runner
        .sessions()
        .get_session(APP, USER, &session_id)
        .await
        .expect("session");
    assert!(session.events.is_empty());
}

#[tokio::test]
async fn recorded_denial_continues_without_executing() {
    let (runner, _provider, service, session_id) = setup(
        vec![
            tool_call(
                "call_1",
                "GoogleDocs_CreateDocumentFromText",
                r#"{"title":"Plan","text_content":"Q3"}"#,
            ),
            ChatMessage::assistant("Understood, I did not create it."),
        ],
        Arc::new(Refuse),
        DenialPolicy::Record,
    )
    .await;

    let events = collect(&runner, &session_id, "create a plan doc").await;
    let events: Vec<Event> = events.into_iter().map(|e| e.expect("event")).collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[1].message.role, MessageRole::Tool);
    assert_eq!(
        events[1].message.text(),
        json!({ "error": "The user denied the call to GoogleDocs_CreateDocumentFromText" })
            .to_string()
    );
    assert_eq!(events[2].text(), Some("Understood, I did not create it."));
    assert!(service.executed.lock().await.is_empty());
}

#[tokio::test]
async fn raised_denial_ends_the_stream_with_an_error() {
    let (runner, _provider, service, session_id) = setup(
        vec![tool_call(
            "call_1",
            "GoogleDocs_CreateDocumentFromText",
            r#"{"title":"Plan"}"#,
        )],
        Arc::new(Refuse),
        DenialPolicy::Raise,
    )
    .await;

    let events = collect(&runner, &session_id, "create a plan doc").await;
    assert_eq!(events.len(), 2);
    assert!(matches!(
        events.last(),
        Some(Err(SessionError::Agent(AgentError::ToolDenied { .. })))
    ));
    assert!(service.executed.lock().await.is_empty());
}
