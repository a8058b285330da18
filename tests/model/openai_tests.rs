// Model client tests - OpenAIClient against a fake chat completions endpoint

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use docsmith_core::model::{ModelError, ModelProvider, ModelRequest, OpenAIClient, ToolSpec};
use docsmith_core::types::{ChatMessage, MessageRole, ToolCall};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct Recorder {
    bodies: Mutex<Vec<Value>>,
    auth: Mutex<Vec<String>>,
}

async fn completions(
    State(state): State<Arc<Recorder>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.auth.lock().await.push(auth.clone());
    let has_tool_result = body["messages"]
        .as_array()
        .is_some_and(|messages| messages.iter().any(|m| m["role"] == "tool"));
    state.bodies.lock().await.push(body);

    if auth != "Bearer sk-test" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "bad key" } })),
        );
    }
    let message = if has_tool_result {
        json!({ "role": "assistant", "content": "Created the document." })
    } else {
        json!({
            "role": "assistant",
            "content": null,
            "tool_calls": [{
                "id": "call_abc",
                "type": "function",
                "function": {
                    "name": "GoogleDocs_CreateBlankDocument",
                    "arguments": "{\"title\":\"Plan\"}"
                }
            }]
        })
    };
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "choices": [{ "index": 0, "message": message, "finish_reason": "stop" }]
        })),
    )
}

async fn spawn() -> (SocketAddr, Arc<Recorder>) {
    let state = Arc::new(Recorder::default());
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(state.clone());
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake openai");
    });
    (addr, state)
}

fn request(messages: Vec<ChatMessage>) -> ModelRequest {
    ModelRequest {
        model: "gpt-4o-mini".into(),
        instructions: Some("You manage Google Docs.".into()),
        messages,
        tools: vec![ToolSpec {
            name: "GoogleDocs_CreateBlankDocument".into(),
            description: "Create a blank document".into(),
            parameters: json!({
                "type": "object",
                "properties": { "title": { "type": "string" } },
                "required": ["title"]
            }),
        }],
    }
}

#[tokio::test]
async fn tool_calls_round_trip_through_chat_completions() {
    let (addr, state) = spawn().await;
    let client = OpenAIClient::new(format!("http://{addr}"), "sk-test");

    let first = client
        .chat(request(vec![ChatMessage::user("make a doc called Plan")]))
        .await
        .expect("first reply");
    assert_eq!(first.message.role, MessageRole::Assistant);
    assert_eq!(
        first.message.tool_calls,
        vec![ToolCall::new(
            "call_abc",
            "GoogleDocs_CreateBlankDocument",
            r#"{"title":"Plan"}"#
        )]
    );

    let second = client
        .chat(request(vec![
            ChatMessage::user("make a doc called Plan"),
            first.message.clone(),
            ChatMessage::tool_result("call_abc", r#"{"documentId":"doc-1"}"#),
        ]))
        .await
        .expect("second reply");
    assert_eq!(second.message.text(), "Created the document.");
    assert_eq!(second.finish_reason.as_deref(), Some("stop"));

    let bodies = state.bodies.lock().await;
    let sent = &bodies[0];
    assert_eq!(sent["model"], "gpt-4o-mini");
    assert_eq!(sent["stream"], false);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][0]["content"], "You manage Google Docs.");
    assert_eq!(
        sent["tools"][0]["function"]["name"],
        "GoogleDocs_CreateBlankDocument"
    );

    let replay = &bodies[1]["messages"];
    assert_eq!(replay[2]["tool_calls"][0]["id"], "call_abc");
    assert_eq!(replay[3]["role"], "tool");
    assert_eq!(replay[3]["tool_call_id"], "call_abc");
}

#[tokio::test]
async fn rejected_key_maps_to_network_error_with_status() {
    let (addr, _state) = spawn().await;
    let client = OpenAIClient::new(format!("http://{addr}"), "sk-wrong");

    let err = client
        .chat(request(vec![ChatMessage::user("hi")]))
        .await
        .expect_err("unauthorized");
    assert!(matches!(err, ModelError::Network { .. }));
    assert_eq!(
        err.user_message(),
        "Model provider 'openai' rejected the API key."
    );
}

#[tokio::test]
async fn blank_key_fails_before_any_request() {
    let (addr, state) = spawn().await;
    let client = OpenAIClient::new(format!("http://{addr}"), "  ");

    let err = client
        .chat(request(vec![ChatMessage::user("hi")]))
        .await
        .expect_err("no key");
    assert!(matches!(err, ModelError::MissingApiKey { .. }));
    assert!(state.bodies.lock().await.is_empty());
}
