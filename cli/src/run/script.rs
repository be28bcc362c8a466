//! Scripted model replies for `--mock` runs (no Ollama needed).

use serde_json::json;
use toolloop::{LlmResponse, MockLlm, Strategy, ToolCall};

/// The laptop/gold-discount conversation, shaped for `strategy`'s parser.
pub fn demo_script(strategy: Strategy) -> MockLlm {
    match strategy {
        Strategy::Structured => MockLlm::laptop_gold_discount(),
        Strategy::JsonArguments => MockLlm::new(vec![
            LlmResponse::with_tool_call(
                "",
                ToolCall {
                    name: "get_product_price".to_string(),
                    arguments: json!("{\"product\": \"laptop\"}"),
                    id: Some("call_1".to_string()),
                },
            ),
            LlmResponse::with_tool_call(
                "",
                ToolCall {
                    name: "apply_discount".to_string(),
                    arguments: json!("{\"price\": 999, \"discount_tier\": \"gold\"}"),
                    id: Some("call_2".to_string()),
                },
            ),
            LlmResponse::text(
                "The price of the laptop after applying the gold discount is 849.15.",
            ),
        ]),
        Strategy::FreeText => MockLlm::new(vec![
            LlmResponse::text(
                " I need the laptop price first.\nAction: get_product_price\nAction Input: {\"product\": \"laptop\"}",
            ),
            LlmResponse::text(
                " Now apply the gold discount to 999.\nAction: apply_discount\nAction Input: {\"price\": 999, \"discount_tier\": \"gold\"}",
            ),
            LlmResponse::text(
                " I now know the final answer\nFinal Answer: The price of the laptop after applying the gold discount is 849.15.",
            ),
        ]),
    }
}
