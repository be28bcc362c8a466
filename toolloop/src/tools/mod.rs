//! Tools the loop can dispatch to: the [`Tool`] trait, the [`ToolRegistry`],
//! static [`ToolSpec`] declarations, and the reference [`catalog`] tools.

mod args;
pub mod catalog;
mod function;
mod registry;
mod spec;
mod r#trait;

pub use args::{required_f64, required_str};
pub use catalog::{catalog_registry, ApplyDiscount, GetProductPrice};
pub use function::FnTool;
pub use r#trait::Tool;
pub use registry::ToolRegistry;
pub use spec::{ParamKind, ToolError, ToolParam, ToolSpec};

use serde_json::Value;

/// Coerces a tool result to observation text.
///
/// Strings are used verbatim; whole floats print without a fractional part
/// (`999.0` becomes `999`), other numbers print in their shortest form; any
/// other value is rendered as compact JSON.
pub fn observation_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn observation_text_formats_numbers_like_the_tools_return_them() {
        assert_eq!(observation_text(&json!(999)), "999");
        assert_eq!(observation_text(&json!(849.15)), "849.15");
        assert_eq!(observation_text(&json!(999.0)), "999");
        assert_eq!(observation_text(&json!(-3)), "-3");
    }

    #[test]
    fn observation_text_strings_verbatim_and_others_as_json() {
        assert_eq!(observation_text(&json!("sold out")), "sold out");
        assert_eq!(observation_text(&json!(true)), "true");
        assert_eq!(observation_text(&json!({"a": 1})), r#"{"a":1}"#);
        assert_eq!(observation_text(&Value::Null), "null");
    }

    #[tokio::test]
    async fn registry_calls_catalog_tools() {
        let registry = catalog_registry();
        let args = json!({"product": "Laptop"}).as_object().cloned().unwrap();
        let price = registry.call("get_product_price", &args).await.unwrap();
        assert_eq!(observation_text(&price), "999");

        let args = json!({"price": 999, "discount_tier": "gold"})
            .as_object()
            .cloned()
            .unwrap();
        let discounted = registry.call("apply_discount", &args).await.unwrap();
        assert_eq!(observation_text(&discounted), "849.15");
    }

    #[tokio::test]
    async fn registry_call_unknown_tool_is_not_found() {
        let registry = catalog_registry();
        let err = registry
            .call("get_weather", &serde_json::Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(n) if n == "get_weather"));
    }
}
