use super::error::ArcadeError;
use super::types::{
    AuthorizationResponse, AuthorizationStatus, AuthorizeRequest, ExecuteToolRequest,
    ExecuteToolResponse, ToolDefinition, ToolPage,
};
use crate::application::tooling::ToolService;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

const PAGE_SIZE: usize = 50;
/// Upper bound the status endpoint accepts for its long-poll `wait` parameter.
const MAX_STATUS_WAIT_SECS: u64 = 59;
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// HTTP client for the Arcade tool-execution API
#[derive(Clone)]
pub struct ArcadeClient {
    base_url: String,
    api_key: String,
    http: Client,
    poll_interval: Duration,
}

impl ArcadeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            http: Client::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Pause between status polls when the server answers before the wait elapses.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ArcadeError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(self.build_url(path))
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| ArcadeError::Network { source })?;
        Self::decode(response).await
    }

    async fn post_json<Req, T>(&self, path: &str, body: &Req) -> Result<T, ArcadeError>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.build_url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|source| ArcadeError::Network { source })?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ArcadeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("message")
                        .or_else(|| value.get("error"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(body);
            return Err(ArcadeError::Status {
                status: status.as_u16(),
                message,
            });
        }
        response
            .json()
            .await
            .map_err(|err| ArcadeError::invalid_response(err.to_string()))
    }

    /// Lists up to `limit` tool definitions of a toolkit, following pagination.
    pub async fn list_tools(
        &self,
        toolkit: &str,
        limit: usize,
    ) -> Result<Vec<ToolDefinition>, ArcadeError> {
        let mut tools: Vec<ToolDefinition> = Vec::new();
        let mut offset = 0usize;

        while tools.len() < limit {
            let page_size = PAGE_SIZE.min(limit - tools.len());
            let page: ToolPage = self
                .get_json(
                    "/v1/tools",
                    &[
                        ("toolkit", toolkit.to_string()),
                        ("limit", page_size.to_string()),
                        ("offset", offset.to_string()),
                    ],
                )
                .await?;

            let received = page.items.len();
            debug!(toolkit, offset, received, "Fetched tool page from Arcade");
            offset += received;
            tools.extend(page.items.into_iter().take(limit - tools.len()));

            let exhausted = page.total_count.is_some_and(|total| offset >= total);
            if received < page_size || exhausted {
                break;
            }
        }

        info!(toolkit, count = tools.len(), "Listed Arcade tools");
        Ok(tools)
    }

    pub async fn get_tool(&self, name: &str) -> Result<ToolDefinition, ArcadeError> {
        self.get_json(&format!("/v1/tools/{name}"), &[]).await
    }

    pub async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, ArcadeError> {
        debug!(tool = tool_name, "Requesting tool authorization");
        self.post_json(
            "/v1/tools/authorize",
            &AuthorizeRequest { tool_name, user_id },
        )
        .await
    }

    pub async fn auth_status(
        &self,
        auth_id: &str,
        wait: Duration,
    ) -> Result<AuthorizationResponse, ArcadeError> {
        self.get_json(
            "/v1/auth/status",
            &[
                ("id", auth_id.to_string()),
                ("wait", wait.as_secs().to_string()),
            ],
        )
        .await
    }

    /// Long-polls the authorization status until it leaves the pending state.
    pub async fn wait_for_completion(
        &self,
        auth_id: &str,
        timeout: Duration,
    ) -> Result<AuthorizationResponse, ArcadeError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                warn!(auth_id, "Authorization wait timed out");
                return Err(ArcadeError::AuthorizationTimeout {
                    auth_id: auth_id.to_string(),
                });
            }
            let wait = remaining.min(Duration::from_secs(MAX_STATUS_WAIT_SECS));
            let response = self.auth_status(auth_id, wait).await?;
            match response.status {
                AuthorizationStatus::Completed => return Ok(response),
                AuthorizationStatus::Failed | AuthorizationStatus::Unknown => {
                    return Err(ArcadeError::AuthorizationFailed {
                        auth_id: auth_id.to_string(),
                        status: response.status.as_str().to_string(),
                    });
                }
                AuthorizationStatus::Pending | AuthorizationStatus::NotStarted => {
                    sleep(self.poll_interval.min(remaining)).await;
                }
            }
        }
    }

    pub async fn execute(
        &self,
        tool_name: &str,
        input: &Value,
        user_id: &str,
    ) -> Result<ExecuteToolResponse, ArcadeError> {
        info!(tool = tool_name, "Executing Arcade tool");
        self.post_json(
            "/v1/tools/execute",
            &ExecuteToolRequest {
                tool_name,
                input,
                user_id,
            },
        )
        .await
    }
}

#[async_trait]
impl ToolService for ArcadeClient {
    async fn list_tools(
        &self,
        toolkit: &str,
        limit: usize,
    ) -> Result<Vec<ToolDefinition>, ArcadeError> {
        ArcadeClient::list_tools(self, toolkit, limit).await
    }

    async fn get_tool(&self, name: &str) -> Result<ToolDefinition, ArcadeError> {
        ArcadeClient::get_tool(self, name).await
    }

    async fn authorize(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationResponse, ArcadeError> {
        ArcadeClient::authorize(self, tool_name, user_id).await
    }

    async fn wait_for_completion(
        &self,
        auth_id: &str,
        timeout: Duration,
    ) -> Result<AuthorizationResponse, ArcadeError> {
        ArcadeClient::wait_for_completion(self, auth_id, timeout).await
    }

    async fn execute(
        &self,
        tool_name: &str,
        input: &Value,
        user_id: &str,
    ) -> Result<ExecuteToolResponse, ArcadeError> {
        ArcadeClient::execute(self, tool_name, input, user_id).await
    }
}
