//! Tool trait definition and types.

use async_trait::async_trait;
use brain_core::FunctionSpec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::ToolError;

/// JSON type of a capability argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl ArgumentKind {
    /// JSON Schema type name.
    pub fn json_type(&self) -> &'static str {
        match self {
            ArgumentKind::String => "string",
            ArgumentKind::Number => "number",
            ArgumentKind::Integer => "integer",
            ArgumentKind::Boolean => "boolean",
        }
    }
}

/// One argument of a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    pub name: String,
    pub kind: ArgumentKind,
    pub description: String,
    pub required: bool,
    /// Value used when an optional argument is omitted.
    pub default: Option<Value>,
}

impl ArgumentSpec {
    /// A required argument.
    pub fn required(name: impl Into<String>, kind: ArgumentKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: true,
            default: None,
        }
    }

    /// An optional argument with an optional default.
    pub fn optional(
        name: impl Into<String>,
        kind: ArgumentKind,
        description: impl Into<String>,
        default: Option<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
            required: false,
            default,
        }
    }
}

/// Name, description and argument schema of a capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityDescriptor {
    pub name: String,
    pub description: String,
    /// Arguments in declaration order.
    pub arguments: Vec<ArgumentSpec>,
}

impl CapabilityDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
        }
    }

    /// Append an argument.
    pub fn argument(mut self, spec: ArgumentSpec) -> Self {
        self.arguments.push(spec);
        self
    }

    /// Render the arguments as a JSON Schema `object`.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for arg in &self.arguments {
            let mut property = json!({
                "type": arg.kind.json_type(),
                "description": arg.description,
            });
            if let (Some(default), Some(obj)) = (&arg.default, property.as_object_mut()) {
                obj.insert("default".to_string(), default.clone());
            }
            properties.insert(arg.name.clone(), property);
        }

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });

        let required: Vec<&str> = self
            .arguments
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
            .collect();
        if !required.is_empty() {
            if let Some(obj) = schema.as_object_mut() {
                obj.insert("required".to_string(), json!(required));
            }
        }

        schema
    }

    /// Descriptor in the shape a function-calling model expects.
    pub fn to_function_spec(&self) -> FunctionSpec {
        FunctionSpec {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters_schema(),
        }
    }

    /// Fill declared defaults and check required arguments are present.
    pub fn resolve(&self, mut params: Map<String, Value>) -> Result<ToolArgs, ToolError> {
        for arg in &self.arguments {
            let present = params.get(&arg.name).is_some_and(|v| !v.is_null());
            if present {
                continue;
            }
            match (&arg.default, arg.required) {
                (Some(default), _) => {
                    params.insert(arg.name.clone(), default.clone());
                }
                (None, true) => return Err(ToolError::MissingParameter(arg.name.clone())),
                (None, false) => {}
            }
        }
        Ok(ToolArgs::new(params))
    }
}

/// Arguments passed to a tool for execution.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    /// Parameters as key-value pairs.
    pub params: Map<String, Value>,
}

impl ToolArgs {
    /// Create new tool arguments with the given parameters.
    pub fn new(params: Map<String, Value>) -> Self {
        Self { params }
    }

    fn require(&self, key: &str) -> Result<&Value, ToolError> {
        self.params
            .get(key)
            .filter(|v| !v.is_null())
            .ok_or_else(|| ToolError::MissingParameter(key.to_string()))
    }

    /// Get a string parameter, returning an error if missing or not a string.
    pub fn get_string(&self, key: &str) -> Result<String, ToolError> {
        self.require(key)?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ToolError::InvalidParameter {
                name: key.to_string(),
                reason: "se esperaba texto".to_string(),
            })
    }

    /// Get an optional string parameter.
    pub fn get_string_opt(&self, key: &str) -> Option<String> {
        self.params.get(key)?.as_str().map(|s| s.to_string())
    }

    /// Get a whole-number parameter.
    ///
    /// Models sometimes send ids as `42.0` or `"42"`; both are accepted.
    pub fn get_i64(&self, key: &str) -> Result<i64, ToolError> {
        let invalid = || ToolError::InvalidParameter {
            name: key.to_string(),
            reason: "se esperaba un número entero".to_string(),
        };

        match self.require(key)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(i),
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| f as i64)
                    .ok_or_else(invalid),
            },
            Value::String(s) => s.trim().parse().map_err(|_| invalid()),
            _ => Err(invalid()),
        }
    }

    /// Get a count clamped to `max`. Absent or non-positive values mean `default`.
    pub fn get_limit(&self, key: &str, default: u32, max: u32) -> Result<u32, ToolError> {
        let value = match self.get_i64(key) {
            Ok(value) => value,
            Err(ToolError::MissingParameter(_)) => return Ok(default.min(max)),
            Err(e) => return Err(e),
        };
        if value < 1 {
            return Ok(default.min(max));
        }
        Ok(value.min(i64::from(max)) as u32)
    }
}

/// Output from a capability: the JSON payload handed back to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub payload: Value,
}

impl ToolOutput {
    /// Wrap a payload as-is.
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }

    /// A `{"success": false, "error": ...}` payload.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::new(json!({ "success": false, "error": error.into() }))
    }

    /// Whether the payload reports success.
    pub fn is_success(&self) -> bool {
        self.payload
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn into_payload(self) -> Value {
        self.payload
    }
}

/// A capability the model may request.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and argument schema.
    fn descriptor(&self) -> CapabilityDescriptor;

    /// Execute with arguments already resolved against the descriptor.
    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError>;
}
