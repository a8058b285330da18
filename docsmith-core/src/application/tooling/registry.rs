use crate::infrastructure::arcade::ToolDefinition;
use crate::model::ToolSpec;

/// Ordered collection of fetched tools, keyed by model-facing function name.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool unless one with the same function name is present.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, tool: ToolDefinition) -> bool {
        let name = tool.function_name();
        if self.get(&name).is_some() {
            return false;
        }
        self.tools.push(tool);
        true
    }

    pub fn get(&self, function_name: &str) -> Option<&ToolDefinition> {
        self.tools
            .iter()
            .find(|tool| tool.function_name() == function_name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.iter()
    }

    pub fn function_names(&self) -> Vec<String> {
        self.tools.iter().map(ToolDefinition::function_name).collect()
    }

    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .iter()
            .map(|tool| ToolSpec {
                name: tool.function_name(),
                description: tool.description.clone().unwrap_or_default(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }
}

impl FromIterator<ToolDefinition> for ToolRegistry {
    fn from_iter<I: IntoIterator<Item = ToolDefinition>>(iter: I) -> Self {
        let mut registry = ToolRegistry::new();
        for tool in iter {
            registry.insert(tool);
        }
        registry
    }
}
