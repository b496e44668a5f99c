//! Insertion-ordered tool registry.
//!
//! Registration order is preserved so tool schemas reach the model as a
//! stable ordered list.

use std::future::Future;
use std::sync::Arc;

use ccommon::OrderedRegistry;
use cprovider::ToolDefinition;
use serde_json::Value;

use crate::{FunctionTool, Tool, ToolError, ToolExecutionContext};

#[derive(Default)]
pub struct ToolRegistry {
    tools: OrderedRegistry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        let name = tool.definition().name;
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn register_fn<F, Fut>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(Value, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(definition, handler));
    }

    pub fn register_sync_fn<F>(&mut self, definition: ToolDefinition, handler: F)
    where
        F: Fn(Value, ToolExecutionContext) -> Result<Value, ToolError> + Send + Sync + 'static,
    {
        self.register_fn(definition, move |args, context| {
            let output = handler(args, context);
            async move { output }
        });
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(name)
    }

    /// Restricts the registry to the named tools, keeping registration
    /// order. An empty allow list keeps every tool.
    pub fn apply_allow_list(&mut self, allow: &[String]) {
        if allow.is_empty() {
            return;
        }

        let blocked = self
            .tools
            .keys()
            .filter(|name| !allow.contains(*name))
            .cloned()
            .collect::<Vec<_>>();

        for name in blocked {
            self.tools.remove(&name);
        }
    }

    /// Tool schemas in registration order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn definition(name: &str) -> ToolDefinition {
        ToolDefinition {
            name: name.to_string(),
            description: format!("The {name} tool"),
            parameters: json!({"type": "object"}),
        }
    }

    fn sample_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        for name in ["gamma", "alpha", "beta"] {
            registry.register_sync_fn(definition(name), |args, _ctx| Ok(args));
        }
        registry
    }

    #[test]
    fn definitions_preserve_registration_order() {
        let registry = sample_registry();
        let names = registry
            .definitions()
            .into_iter()
            .map(|definition| definition.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["gamma", "alpha", "beta"]);
    }

    #[test]
    fn allow_list_filters_but_keeps_order() {
        let mut registry = sample_registry();
        registry.apply_allow_list(&["beta".to_string(), "gamma".to_string()]);

        let names = registry
            .definitions()
            .into_iter()
            .map(|definition| definition.name)
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["gamma", "beta"]);
        assert!(!registry.contains("alpha"));
    }

    #[test]
    fn empty_allow_list_keeps_everything() {
        let mut registry = sample_registry();
        registry.apply_allow_list(&[]);
        assert_eq!(registry.len(), 3);
    }
}
