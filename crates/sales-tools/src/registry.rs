//! Capability registry: describes capabilities to the model and dispatches its calls.

use std::sync::Arc;

use brain_core::{FunctionSpec, ToolRequest};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::error::ToolError;
use crate::tool::{CapabilityDescriptor, Tool, ToolOutput};

struct Registered {
    tool: Arc<dyn Tool>,
    descriptor: CapabilityDescriptor,
}

/// Registry of capabilities, kept in registration order.
#[derive(Default)]
pub struct CapabilityRegistry {
    tools: IndexMap<String, Registered>,
}

impl CapabilityRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// If a tool with the same name already exists, it is replaced in place.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.register_arc(Arc::new(tool));
    }

    /// Register a shared tool.
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) {
        let descriptor = tool.descriptor();
        info!("Registering capability: {}", descriptor.name);
        self.tools
            .insert(descriptor.name.clone(), Registered { tool, descriptor });
    }

    /// Check if a capability is registered.
    pub fn has_capability(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered capability names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Descriptors of every capability.
    pub fn describe_all(&self) -> Vec<CapabilityDescriptor> {
        self.tools.values().map(|r| r.descriptor.clone()).collect()
    }

    /// Descriptors rendered for a function-calling model.
    pub fn function_specs(&self) -> Vec<FunctionSpec> {
        self.tools
            .values()
            .map(|r| r.descriptor.to_function_spec())
            .collect()
    }

    /// Execute a capability, surfacing errors.
    pub async fn try_dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<ToolOutput, ToolError> {
        let registered = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let args = registered.descriptor.resolve(arguments)?;
        debug!("Executing capability '{}' with {} params", name, args.params.len());

        let output = registered.tool.execute(args).await?;

        debug!(
            "Capability '{}' completed: success={}",
            name,
            output.is_success()
        );

        Ok(output)
    }

    /// Execute a capability and return its JSON payload.
    ///
    /// Never fails: unknown capabilities and execution errors become
    /// `{"success": false, "error": "..."}`.
    pub async fn dispatch(&self, name: &str, arguments: Map<String, Value>) -> Value {
        match self.try_dispatch(name, arguments).await {
            Ok(output) => output.into_payload(),
            Err(e) => {
                match &e {
                    ToolError::Commerce { source, .. } => {
                        warn!("Capability '{}' failed: {} ({})", name, e, source)
                    }
                    _ => warn!("Capability '{}' failed: {}", name, e),
                }
                json!({ "success": false, "error": e.to_string() })
            }
        }
    }

    /// Execute a parsed model call.
    pub async fn dispatch_request(&self, request: ToolRequest) -> Value {
        self.dispatch(&request.name, request.arguments).await
    }
}
