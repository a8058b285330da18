use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("network error calling Arcade: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },
    #[error("Arcade returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Arcade returned invalid response: {reason}")]
    InvalidResponse { reason: String },
    #[error("authorization '{auth_id}' ended with status '{status}'")]
    AuthorizationFailed { auth_id: String, status: String },
    #[error("authorization '{auth_id}' did not complete in time")]
    AuthorizationTimeout { auth_id: String },
    #[error("authorization for '{tool}' is pending but Arcade gave no authorization id")]
    MissingAuthorizationId { tool: String },
}

impl ArcadeError {
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            ArcadeError::Network { source } => {
                if source.is_connect() {
                    "Could not connect to Arcade.".to_string()
                } else if source.is_timeout() {
                    "Request to Arcade timed out.".to_string()
                } else {
                    "Network error talking to Arcade.".to_string()
                }
            }
            ArcadeError::Status { status: 401, .. } | ArcadeError::Status { status: 403, .. } => {
                "Arcade rejected the API key. Check ARCADE_API_KEY.".to_string()
            }
            ArcadeError::Status { status: 404, message } => {
                format!("Arcade could not find the requested resource: {message}")
            }
            ArcadeError::Status { status, .. } => format!("Arcade request failed: {status}"),
            ArcadeError::InvalidResponse { .. } => {
                "Arcade returned a response that could not be understood.".to_string()
            }
            ArcadeError::AuthorizationFailed { status, .. } => {
                format!("Authorization was not granted (status: {status}).")
            }
            ArcadeError::AuthorizationTimeout { .. } => {
                "Timed out waiting for authorization to complete.".to_string()
            }
            ArcadeError::MissingAuthorizationId { tool } => {
                format!("Arcade did not return an authorization link for {tool}.")
            }
        }
    }
}
