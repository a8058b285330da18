//! Arcade wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub toolkit: ToolkitInfo,
    #[serde(default)]
    pub input: ToolInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<ToolRequirements>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInput {
    #[serde(default)]
    pub parameters: Vec<InputParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputParameter {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_schema: ValueSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSchema {
    pub val_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_val_type: Option<String>,
    #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization: Option<AuthorizationRequirement>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
}

impl ToolDefinition {
    /// Model-facing name, e.g. `GoogleDocs_CreateBlankDocument`.
    pub fn function_name(&self) -> String {
        format!("{}_{}", self.toolkit.name, self.name)
    }

    /// Execution-facing name, e.g. `GoogleDocs.CreateBlankDocument`.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.toolkit.name, self.name)
    }

    pub fn requires_authorization(&self) -> bool {
        self.requirements
            .as_ref()
            .and_then(|req| req.authorization.as_ref())
            .is_some()
    }

    /// JSON schema object describing the tool's arguments.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &self.input.parameters {
            let mut schema = Map::new();
            schema.insert(
                "type".into(),
                Value::String(json_type(&param.value_schema.val_type).into()),
            );
            if param.value_schema.val_type == "array" {
                let inner = param
                    .value_schema
                    .inner_val_type
                    .as_deref()
                    .map(json_type)
                    .unwrap_or("string");
                schema.insert("items".into(), json!({ "type": inner }));
            }
            if let Some(allowed) = &param.value_schema.allowed {
                schema.insert("enum".into(), json!(allowed));
            }
            if let Some(description) = &param.description {
                schema.insert("description".into(), Value::String(description.clone()));
            }
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
            properties.insert(param.name.clone(), Value::Object(schema));
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

fn json_type(val_type: &str) -> &'static str {
    match val_type {
        "integer" => "integer",
        "number" => "number",
        "boolean" => "boolean",
        "json" => "object",
        "array" => "array",
        _ => "string",
    }
}

/// Turns `GoogleDocs_WhoAmI` into `GoogleDocs.WhoAmI`; dotted names pass through.
pub fn qualify_tool_name(name: &str) -> String {
    if name.contains('.') {
        return name.to_string();
    }
    match name.split_once('_') {
        Some((toolkit, tool)) if !toolkit.is_empty() && !tool.is_empty() => {
            format!("{toolkit}.{tool}")
        }
        _ => name.to_string(),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ToolPage {
    #[serde(default)]
    pub items: Vec<ToolDefinition>,
    #[serde(default)]
    pub total_count: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
    NotStarted,
    Pending,
    Completed,
    Failed,
    #[serde(other)]
    Unknown,
}

impl AuthorizationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthorizationStatus::NotStarted => "not_started",
            AuthorizationStatus::Pending => "pending",
            AuthorizationStatus::Completed => "completed",
            AuthorizationStatus::Failed => "failed",
            AuthorizationStatus::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: AuthorizationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
}

impl AuthorizationResponse {
    pub fn is_completed(&self) -> bool {
        self.status == AuthorizationStatus::Completed
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AuthorizeRequest<'a> {
    pub tool_name: &'a str,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ExecuteToolRequest<'a> {
    pub tool_name: &'a str,
    pub input: &'a Value,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteToolResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<ToolOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolOutputError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutputError {
    pub message: String,
    #[serde(default)]
    pub can_retry: bool,
}

impl ExecuteToolResponse {
    pub fn succeeded(value: Value) -> Self {
        Self {
            id: None,
            success: true,
            status: Some("success".into()),
            output: Some(ToolOutput {
                value: Some(value),
                error: None,
            }),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            id: None,
            success: false,
            status: Some("failed".into()),
            output: Some(ToolOutput {
                value: None,
                error: Some(ToolOutputError {
                    message: message.into(),
                    can_retry: false,
                }),
            }),
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|output| output.error.as_ref())
            .map(|err| err.message.as_str())
    }

    /// Text handed back to the model as the tool result.
    ///
    /// String values are passed through; anything else is serialized as JSON.
    /// Failures become `{"error": "..."}`.
    pub fn to_model_content(&self) -> String {
        if !self.success || self.error_message().is_some() {
            let message = self.error_message().unwrap_or("tool execution failed");
            return json!({ "error": message }).to_string();
        }
        match self.output.as_ref().and_then(|output| output.value.as_ref()) {
            Some(Value::String(text)) => text.clone(),
            Some(value) => value.to_string(),
            None => "null".to_string(),
        }
    }
}
