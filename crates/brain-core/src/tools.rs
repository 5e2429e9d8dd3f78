//! Capability descriptors offered to a model and the calls it makes back.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A capability described in the shape a function-calling model expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Capability name, unique within a registry.
    pub name: String,
    /// What the capability does, written for the model.
    pub description: String,
    /// JSON Schema object describing the arguments.
    pub parameters: Value,
}

/// A parsed capability call.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    /// Name of the capability to run.
    pub name: String,
    /// Arguments as a JSON object.
    pub arguments: Map<String, Value>,
}

impl ToolRequest {
    /// Build a request directly from an argument map.
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Parse arguments from the JSON string a model produced.
    ///
    /// An empty or whitespace-only string is treated as `{}`. Anything that is
    /// not a JSON object is an error.
    pub fn from_call(name: impl Into<String>, arguments_json: &str) -> Result<Self, serde_json::Error> {
        let arguments = if arguments_json.trim().is_empty() {
            Map::new()
        } else {
            serde_json::from_str::<Map<String, Value>>(arguments_json)?
        };
        Ok(Self::new(name, arguments))
    }

    /// Get an argument by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key).filter(|v| !v.is_null())
    }

    /// Get a string argument by name.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// Get an integer argument by name. Numeric strings are accepted.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
