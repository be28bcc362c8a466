//! ReAct free text: `Thought / Action / Action Input / Observation`.
//!
//! The model never sees native tool specs. Tools are described in the prompt, the
//! whole exchange is replayed as one user turn (prompt, question, scratchpad), and the
//! transport cuts generation at [`OBSERVATION_STOP_MARKER`] so the model cannot invent
//! its own observations.

use serde_json::Value;

use super::{json_kind, ToolCallParser};
use crate::agent::LoopError;
use crate::llm::LlmResponse;
use crate::message::Message;
use crate::prompts;
use crate::state::{Conversation, ToolInvocation};
use crate::tools::ToolRegistry;

/// Generation stops here; the loop supplies the observation.
pub const OBSERVATION_STOP_MARKER: &str = "\nObservation:";

const ACTION_PREFIX: &str = "Action:";
const ACTION_INPUT_PREFIX: &str = "Action Input:";

/// Reads the first `Action:` and the first `Action Input:` line of the response text.
///
/// When either line is missing the whole text is the final answer, even if it also
/// contains an `Action:` line.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeTextParser;

impl ToolCallParser for FreeTextParser {
    fn name(&self) -> &'static str {
        "react"
    }

    fn extract(&self, response: &LlmResponse) -> Result<Option<ToolInvocation>, LoopError> {
        let lines = || response.content.lines();
        let action = lines().find_map(|l| l.strip_prefix(ACTION_PREFIX));
        let input = lines().find_map(|l| l.strip_prefix(ACTION_INPUT_PREFIX));
        let (Some(action), Some(input)) = (action, input) else {
            return Ok(None);
        };

        let name = action.trim().to_string();
        let raw = input.trim();
        let arguments = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(LoopError::decode(
                    Some(&name),
                    format!("expected a JSON object, got {}", json_kind(&other)),
                ))
            }
            Err(e) => {
                return Err(LoopError::decode(
                    Some(&name),
                    format!("action input {:?} is not JSON: {}", raw, e),
                ))
            }
        };
        Ok(Some(ToolInvocation {
            name,
            arguments,
            call_id: None,
        }))
    }

    fn stop_markers(&self) -> Vec<String> {
        vec![OBSERVATION_STOP_MARKER.to_string()]
    }

    fn advertises_tools(&self) -> bool {
        false
    }

    /// Renders `custom` or the default ReAct template with the registry's tools.
    fn system_prompt(&self, custom: Option<&str>, tools: &ToolRegistry) -> String {
        match custom {
            Some(template) => prompts::render_react_prompt(template, tools),
            None => {
                let loaded = prompts::load_or_default(None);
                prompts::render_react_prompt(loaded.react_template(), tools)
            }
        }
    }

    /// One user turn: prompt, `Question: ...`, then one scratchpad entry per executed
    /// tool (the model's own text followed by the observation).
    fn prepare(&self, conversation: &Conversation) -> Vec<Message> {
        let mut turn = String::new();
        let mut question = None;
        let mut scratchpad = String::new();
        for message in conversation.messages() {
            match message {
                Message::System(prompt) => turn.push_str(prompt),
                Message::User(q) if question.is_none() => question = Some(q.as_str()),
                Message::User(_) => {}
                Message::Assistant { content, .. } => {
                    scratchpad.push(' ');
                    scratchpad.push_str(content.trim());
                }
                Message::Tool { content, .. } => {
                    scratchpad.push_str("\nObservation: ");
                    scratchpad.push_str(content);
                    scratchpad.push_str("\nThought:");
                }
            }
        }
        turn.push_str("\n\nQuestion: ");
        turn.push_str(question.unwrap_or_default());
        turn.push_str("\nThought:");
        turn.push_str(&scratchpad);
        vec![Message::user(turn)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ToolInvocation;
    use crate::tools::catalog_registry;
    use serde_json::json;

    #[test]
    fn extracts_action_and_input() {
        let r = LlmResponse::text(
            " I need the laptop price first.\nAction: get_product_price\nAction Input: {\"product\": \"laptop\"}",
        );
        let inv = FreeTextParser.extract(&r).unwrap().unwrap();
        assert_eq!(inv.name, "get_product_price");
        assert_eq!(inv.arguments["product"], "laptop");
        assert!(inv.call_id.is_none());
    }

    #[test]
    fn only_first_action_lines_count() {
        let r = LlmResponse::text(
            "Action: get_product_price\nAction Input: {\"product\": \"laptop\"}\nAction: apply_discount\nAction Input: {}",
        );
        let inv = FreeTextParser.extract(&r).unwrap().unwrap();
        assert_eq!(inv.name, "get_product_price");
    }

    #[test]
    fn final_answer_has_no_action() {
        let r = LlmResponse::text(" I now know the final answer\nFinal Answer: 849.15");
        assert!(FreeTextParser.extract(&r).unwrap().is_none());
    }

    /// **Scenario**: an `Action:` line without `Action Input:` is treated as the final answer.
    #[test]
    fn action_without_input_is_final_answer() {
        let r = LlmResponse::text("Action: get_product_price");
        assert!(FreeTextParser.extract(&r).unwrap().is_none());
    }

    #[test]
    fn non_json_input_is_decode_error() {
        let r = LlmResponse::text("Action: apply_discount\nAction Input: price=999, discount_tier=gold");
        let err = FreeTextParser.extract(&r).unwrap_err();
        assert!(matches!(
            err,
            LoopError::ArgumentDecode { tool: Some(ref t), .. } if t == "apply_discount"
        ));
    }

    #[test]
    fn stop_marker_and_no_native_tools() {
        assert_eq!(FreeTextParser.stop_markers(), vec!["\nObservation:".to_string()]);
        assert!(!FreeTextParser.advertises_tools());
    }

    #[test]
    fn system_prompt_renders_tool_descriptions() {
        let tools = catalog_registry();
        let prompt = FreeTextParser.system_prompt(Some("Tools:\n{tool_descriptions}\nUse [{tool_names}]"), &tools);
        assert!(prompt.contains("get_product_price(product: string): A tool that returns"));
        assert!(prompt.ends_with("Use [apply_discount, get_product_price]"));

        let default = FreeTextParser.system_prompt(None, &tools);
        assert!(default.contains("apply_discount(price: number, discount_tier: string)"));
        assert!(!default.contains("{tool_names}"));
    }

    /// **Scenario**: after one tool step the single user turn carries question, the model's
    /// text and the observation, ending with a fresh `Thought:`.
    #[test]
    fn prepare_builds_single_turn_with_scratchpad() {
        let mut conversation = Conversation::new("PROMPT", "What is the price of laptop?");
        conversation.push_assistant(
            " I need the price.\nAction: get_product_price\nAction Input: {\"product\": \"laptop\"}",
            Some(ToolInvocation {
                name: "get_product_price".into(),
                arguments: json!({"product": "laptop"}).as_object().cloned().unwrap(),
                call_id: None,
            }),
        );
        conversation.push_tool_result("get_product_price", "999", None);

        let messages = FreeTextParser.prepare(&conversation);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role(), "user");
        assert_eq!(
            messages[0].content(),
            "PROMPT\n\nQuestion: What is the price of laptop?\nThought: I need the price.\nAction: get_product_price\nAction Input: {\"product\": \"laptop\"}\nObservation: 999\nThought:"
        );
    }

    #[test]
    fn prepare_first_turn_ends_with_thought() {
        let conversation = Conversation::new("PROMPT", "Q?");
        let messages = FreeTextParser.prepare(&conversation);
        assert_eq!(messages[0].content(), "PROMPT\n\nQuestion: Q?\nThought:");
    }
}
