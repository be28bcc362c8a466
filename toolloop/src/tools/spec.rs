//! Tool specification and tool errors.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Primitive argument type a tool declares for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Number,
    Integer,
    Boolean,
}

impl ParamKind {
    /// JSON Schema type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// One declared parameter of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParam {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParamKind,
    #[serde(default)]
    pub description: Option<String>,
}

impl ToolParam {
    pub fn new(name: impl Into<String>, kind: ParamKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: Some(description.into()),
        }
    }
}

/// Static declaration of a tool: name, description and ordered parameter list.
///
/// Native tool-calling transports receive [`ToolSpec::input_schema`]; the free-text
/// strategy renders [`ToolSpec::signature`] into its prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool name; unique within a [`ToolRegistry`](super::ToolRegistry).
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ToolParam>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            parameters: vec![],
        }
    }

    /// Adds a parameter (builder).
    pub fn with_param(mut self, param: ToolParam) -> Self {
        self.parameters.push(param);
        self
    }

    /// JSON Schema object for the arguments; every declared parameter is required.
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        for p in &self.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(p.kind.as_str()));
            if let Some(d) = &p.description {
                prop.insert("description".to_string(), json!(d));
            }
            properties.insert(p.name.clone(), Value::Object(prop));
        }
        let required: Vec<&str> = self.parameters.iter().map(|p| p.name.as_str()).collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Call signature, e.g. `apply_discount(price: number, discount_tier: string)`.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.kind.as_str()))
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }
}

/// Errors from registering or calling tools.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("tool already registered: {0}")]
    Duplicate(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
    #[error("tool execution failed: {0}")]
    Execution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discount_spec() -> ToolSpec {
        ToolSpec::new("apply_discount", "Applies a discount tier.")
            .with_param(ToolParam::new("price", ParamKind::Number, "Price of the product."))
            .with_param(ToolParam::new(
                "discount_tier",
                ParamKind::String,
                "premium, gold or silver",
            ))
    }

    #[test]
    fn signature_lists_params_in_order() {
        assert_eq!(
            discount_spec().signature(),
            "apply_discount(price: number, discount_tier: string)"
        );
        assert_eq!(ToolSpec::new("ping", "").signature(), "ping()");
    }

    #[test]
    fn input_schema_marks_all_params_required() {
        let schema = discount_spec().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["price"]["type"], "number");
        assert_eq!(schema["properties"]["discount_tier"]["type"], "string");
        assert_eq!(schema["required"], json!(["price", "discount_tier"]));
    }

    #[test]
    fn tool_spec_deserializes_from_yaml() {
        let yaml = r#"
name: get_product_price
description: Returns the price of a product.
parameters:
  - name: product
    type: string
"#;
        let spec: ToolSpec = serde_yaml::from_str(yaml).expect("parse yaml");
        assert_eq!(spec.signature(), "get_product_price(product: string)");
        assert!(spec.parameters[0].description.is_none());
    }

    #[test]
    fn tool_error_display_all_variants() {
        assert!(ToolError::NotFound("x".into()).to_string().contains("not found"));
        assert!(ToolError::Duplicate("x".into()).to_string().contains("already registered"));
        assert!(ToolError::InvalidInput("x".into()).to_string().contains("invalid"));
        assert!(ToolError::Execution("x".into()).to_string().contains("failed"));
    }
}
