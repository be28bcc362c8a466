use async_trait::async_trait;
use serde_json::{Map, Value};

use super::r#trait::Tool;
use super::{ToolError, ToolSpec};

/// A [`Tool`] built from a static spec and a plain function.
///
/// # Examples
///
/// ```
/// use serde_json::{json, Map, Value};
/// use toolloop::tools::{
///     required_f64, FnTool, ParamKind, ToolError, ToolParam, ToolRegistry, ToolSpec,
/// };
///
/// let double = FnTool::new(
///     ToolSpec::new("double", "Doubles a number.")
///         .with_param(ToolParam::new("x", ParamKind::Number, "input")),
///     |args: &Map<String, Value>| -> Result<Value, ToolError> {
///         Ok(json!(required_f64(args, "x")? * 2.0))
///     },
/// );
/// let registry = ToolRegistry::new().with_tool(Box::new(double)).unwrap();
/// assert!(registry.contains("double"));
/// ```
pub struct FnTool<F> {
    spec: ToolSpec,
    f: F,
}

impl<F> FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync,
{
    pub fn new(spec: ToolSpec, f: F) -> Self {
        Self { spec, f }
    }
}

#[async_trait]
impl<F> Tool for FnTool<F>
where
    F: Fn(&Map<String, Value>) -> Result<Value, ToolError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.spec.name
    }

    fn spec(&self) -> ToolSpec {
        self.spec.clone()
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        (self.f)(args)
    }
}
