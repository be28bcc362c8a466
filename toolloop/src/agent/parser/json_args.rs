//! Native tool calls whose arguments arrive as JSON-encoded strings (OpenAI style).

use serde_json::{Map, Value};

use super::{first_call, json_kind, ToolCallParser};
use crate::agent::LoopError;
use crate::llm::LlmResponse;
use crate::state::ToolInvocation;

/// Takes the first `tool_calls` record and decodes its string arguments.
///
/// A blank string counts as `{}`. Non-string payloads, malformed JSON and JSON that is
/// not an object are [`LoopError::ArgumentDecode`].
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonArgumentsParser;

impl ToolCallParser for JsonArgumentsParser {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extract(&self, response: &LlmResponse) -> Result<Option<ToolInvocation>, LoopError> {
        let Some(call) = first_call(response) else {
            return Ok(None);
        };
        let raw = match &call.arguments {
            Value::String(s) => s,
            other => {
                return Err(LoopError::decode(
                    Some(&call.name),
                    format!("expected a JSON string, got {}", json_kind(other)),
                ))
            }
        };
        let arguments = if raw.trim().is_empty() {
            Map::new()
        } else {
            match serde_json::from_str::<Value>(raw)
                .map_err(|e| LoopError::decode(Some(&call.name), e.to_string()))?
            {
                Value::Object(map) => map,
                other => {
                    return Err(LoopError::decode(
                        Some(&call.name),
                        format!("expected a JSON object, got {}", json_kind(&other)),
                    ))
                }
            }
        };
        Ok(Some(ToolInvocation {
            name: call.name.clone(),
            arguments,
            call_id: call.id.clone(),
        }))
    }
}
