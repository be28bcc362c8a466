use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use super::r#trait::Tool;
use super::{ToolError, ToolSpec};

/// The set of tools one loop run may dispatch to.
///
/// Built by the caller before the run and handed to the loop; the loop only reads
/// it. Names are unique: registering a second tool under an existing name fails
/// with [`ToolError::Duplicate`].
///
/// # Examples
///
/// ```
/// use toolloop::tools::{catalog, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(catalog::GetProductPrice)).unwrap();
/// assert!(registry.contains("get_product_price"));
/// assert!(registry.register(Box::new(catalog::GetProductPrice)).is_err());
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name.
    pub fn register(&mut self, tool: Box<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(ToolError::Duplicate(name));
        }
        debug!(tool = %name, "tool registered");
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Registers a tool (builder).
    pub fn with_tool(mut self, tool: Box<dyn Tool>) -> Result<Self, ToolError> {
        self.register(tool)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Specs of all registered tools, sorted by name.
    pub fn list(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    /// Calls a tool by name.
    ///
    /// # Errors
    ///
    /// [`ToolError::NotFound`] if `name` is not registered; otherwise whatever the tool returns.
    pub async fn call(&self, name: &str, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        tool.call(args).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}
