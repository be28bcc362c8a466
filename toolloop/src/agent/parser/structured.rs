//! Native tool calls whose arguments arrive as JSON objects.

use super::{first_call, into_object, ToolCallParser};
use crate::agent::LoopError;
use crate::llm::LlmResponse;
use crate::state::ToolInvocation;

/// Takes the first `tool_calls` record; `null` arguments count as `{}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuredParser;

impl ToolCallParser for StructuredParser {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, response: &LlmResponse) -> Result<Option<ToolInvocation>, LoopError> {
        let Some(call) = first_call(response) else {
            return Ok(None);
        };
        let arguments = into_object(&call.name, call.arguments.clone())?;
        Ok(Some(ToolInvocation {
            name: call.name.clone(),
            arguments,
            call_id: call.id.clone(),
        }))
    }
}
