use super::interface::ToolService;
use super::registry::ToolRegistry;
use crate::infrastructure::arcade::{ArcadeError, qualify_tool_name};
use tracing::{debug, info};

/// Collects toolkit tools then isolated tools, de-duplicated, capped at `limit`.
pub async fn fetch_tools(
    service: &dyn ToolService,
    toolkits: &[String],
    isolated: &[String],
    limit: usize,
) -> Result<ToolRegistry, ArcadeError> {
    let mut registry = ToolRegistry::new();

    for toolkit in toolkits {
        if registry.len() >= limit {
            break;
        }
        let tools = service.list_tools(toolkit, limit - registry.len()).await?;
        for tool in tools {
            if registry.len() >= limit {
                break;
            }
            if !registry.insert(tool) {
                debug!(toolkit = toolkit.as_str(), "Skipped duplicate tool");
            }
        }
    }

    for name in isolated {
        if registry.len() >= limit {
            break;
        }
        let tool = service.get_tool(&qualify_tool_name(name)).await?;
        registry.insert(tool);
    }

    info!(
        count = registry.len(),
        toolkits = toolkits.len(),
        isolated = isolated.len(),
        "Fetched agent tools"
    );
    Ok(registry)
}
