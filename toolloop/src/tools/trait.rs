use async_trait::async_trait;
use serde_json::{Map, Value};

use super::{ToolError, ToolSpec};

/// Represents a single tool that the model may invoke.
///
/// Each tool has a unique name, a static [`ToolSpec`], and the call logic. Tools
/// are registered with [`ToolRegistry`](super::ToolRegistry), which the loop
/// consults to dispatch a model's request.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::{json, Map, Value};
/// use toolloop::tools::{Tool, ToolError, ToolSpec};
///
/// struct Echo;
///
/// #[async_trait]
/// impl Tool for Echo {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec::new("echo", "Returns its arguments.")
///     }
///
///     async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
///         Ok(Value::Object(args.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    fn name(&self) -> &str;

    /// Returns the static specification of this tool.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with decoded named arguments.
    ///
    /// Returns the raw result value; the loop coerces it to observation text with
    /// [`observation_text`](super::observation_text).
    ///
    /// # Errors
    ///
    /// [`ToolError::InvalidInput`] for missing or mistyped arguments,
    /// [`ToolError::Execution`] for anything else.
    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError>;
}
