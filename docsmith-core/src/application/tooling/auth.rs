use super::interface::ToolService;
use super::registry::ToolRegistry;
use crate::infrastructure::arcade::ArcadeError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Surface that tells the user where to complete an authorization.
#[async_trait]
pub trait AuthPrompt: Send + Sync {
    async fn authorization_required(&self, tool_name: &str, url: &str);
    async fn authorization_finished(&self, tool_name: &str, granted: bool);
}

/// Prompt that says nothing; used where no user is attached.
pub struct NoopAuthPrompt;

#[async_trait]
impl AuthPrompt for NoopAuthPrompt {
    async fn authorization_required(&self, _tool_name: &str, _url: &str) {}
    async fn authorization_finished(&self, _tool_name: &str, _granted: bool) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationOutcome {
    /// Arcade reported the tool as authorized without user action
    AlreadyAuthorized,
    /// The user completed the authorization flow
    Granted,
    /// The flow ended without a grant
    NotGranted,
}

impl AuthorizationOutcome {
    pub fn is_authorized(self) -> bool {
        !matches!(self, AuthorizationOutcome::NotGranted)
    }
}

/// Authorizes tools for a user, remembering grants for the process lifetime.
pub struct Authorizer {
    service: Arc<dyn ToolService>,
    prompt: Arc<dyn AuthPrompt>,
    timeout: Duration,
    authorized: Mutex<HashSet<(String, String)>>,
}

impl Authorizer {
    pub fn new(service: Arc<dyn ToolService>, prompt: Arc<dyn AuthPrompt>, timeout: Duration) -> Self {
        Self {
            service,
            prompt,
            timeout,
            authorized: Mutex::new(HashSet::new()),
        }
    }

    pub async fn is_authorized(&self, tool_name: &str, user_id: &str) -> bool {
        self.authorized
            .lock()
            .await
            .contains(&(user_id.to_string(), tool_name.to_string()))
    }

    async fn remember(&self, tool_name: &str, user_id: &str) {
        self.authorized
            .lock()
            .await
            .insert((user_id.to_string(), tool_name.to_string()));
    }

    /// Runs the authorization flow for one tool (by qualified name).
    ///
    /// A pending authorization announces its URL through the prompt and
    /// blocks until Arcade reports completion, failure, or the timeout.
    pub async fn authorize_tool(
        &self,
        tool_name: &str,
        user_id: &str,
    ) -> Result<AuthorizationOutcome, ArcadeError> {
        if self.is_authorized(tool_name, user_id).await {
            return Ok(AuthorizationOutcome::AlreadyAuthorized);
        }

        let response = self.service.authorize(tool_name, user_id).await?;
        if response.is_completed() {
            self.remember(tool_name, user_id).await;
            return Ok(AuthorizationOutcome::AlreadyAuthorized);
        }

        let auth_id = response
            .id
            .clone()
            .ok_or_else(|| ArcadeError::MissingAuthorizationId {
                tool: tool_name.to_string(),
            })?;
        let url = response.url.clone().unwrap_or_default();
        info!(tool = tool_name, "Tool requires user authorization");
        self.prompt.authorization_required(tool_name, &url).await;

        match self.service.wait_for_completion(&auth_id, self.timeout).await {
            Ok(done) if done.is_completed() => {
                self.remember(tool_name, user_id).await;
                self.prompt.authorization_finished(tool_name, true).await;
                Ok(AuthorizationOutcome::Granted)
            }
            Ok(_)
            | Err(
                ArcadeError::AuthorizationFailed { .. } | ArcadeError::AuthorizationTimeout { .. },
            ) => {
                warn!(tool = tool_name, "Authorization was not granted");
                self.prompt.authorization_finished(tool_name, false).await;
                Ok(AuthorizationOutcome::NotGranted)
            }
            Err(err) => {
                self.prompt.authorization_finished(tool_name, false).await;
                Err(err)
            }
        }
    }

    /// Authorizes every registered tool up front. Returns how many ended authorized.
    pub async fn preauthorize_all(
        &self,
        registry: &ToolRegistry,
        user_id: &str,
    ) -> Result<usize, ArcadeError> {
        let mut authorized = 0;
        for tool in registry.iter() {
            let outcome = self.authorize_tool(&tool.qualified_name(), user_id).await?;
            if outcome.is_authorized() {
                authorized += 1;
            }
        }
        info!(authorized, total = registry.len(), "Pre-authorization finished");
        Ok(authorized)
    }
}
