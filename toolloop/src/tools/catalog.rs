//! Reference product-catalog tools: price lookup and discount calculation.
//!
//! Both are pure functions over fixed tables. [`catalog_registry`] registers the
//! pair for the pricing demo.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use super::r#trait::Tool;
use super::{required_f64, required_str, ParamKind, ToolError, ToolParam, ToolRegistry, ToolSpec};

pub const TOOL_GET_PRODUCT_PRICE: &str = "get_product_price";
pub const TOOL_APPLY_DISCOUNT: &str = "apply_discount";

const PRICES: &[(&str, u32)] = &[("laptop", 999), ("smartphone", 499), ("headphones", 199)];

/// Discount percentage per tier.
const DISCOUNT_TIERS: &[(&str, f64)] = &[("premium", 20.0), ("gold", 15.0), ("silver", 10.0)];

/// Price of `product` (case-insensitive); 0 for products not in the catalog.
pub fn product_price(product: &str) -> u32 {
    let key = product.to_lowercase();
    PRICES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, price)| *price)
        .unwrap_or(0)
}

/// Discount percentage for `tier`; 0 for unknown tiers. Tier names are matched exactly.
pub fn discount_percentage(tier: &str) -> f64 {
    DISCOUNT_TIERS
        .iter()
        .find(|(name, _)| *name == tier)
        .map(|(_, pct)| *pct)
        .unwrap_or(0.0)
}

/// `price` reduced by the tier's percentage, rounded to 2 decimal places.
pub fn discounted_price(price: f64, tier: &str) -> f64 {
    round2(price * (1.0 - discount_percentage(tier) / 100.0))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `get_product_price(product: string) -> number`.
pub struct GetProductPrice;

#[async_trait]
impl Tool for GetProductPrice {
    fn name(&self) -> &str {
        TOOL_GET_PRODUCT_PRICE
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            TOOL_GET_PRODUCT_PRICE,
            "A tool that returns the price of a product based on its name.",
        )
        .with_param(ToolParam::new(
            "product",
            ParamKind::String,
            "Name of the product to fetch price for. The products available are laptop, smartphone and headphones.",
        ))
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let product = required_str(args, "product")?;
        Ok(json!(product_price(product)))
    }
}

/// `apply_discount(price: number, discount_tier: string) -> number`.
pub struct ApplyDiscount;

#[async_trait]
impl Tool for ApplyDiscount {
    fn name(&self) -> &str {
        TOOL_APPLY_DISCOUNT
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            TOOL_APPLY_DISCOUNT,
            "A tool that takes in product price and discount tier, and returns the discounted price.",
        )
        .with_param(ToolParam::new("price", ParamKind::Number, "Price of the product."))
        .with_param(ToolParam::new(
            "discount_tier",
            ParamKind::String,
            "Discount tier to apply. The discount tiers can be 'premium', 'gold', or 'silver'.",
        ))
    }

    async fn call(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let price = required_f64(args, "price")?;
        let tier = required_str(args, "discount_tier")?;
        Ok(json!(discounted_price(price, tier)))
    }
}

/// Registry with [`GetProductPrice`] and [`ApplyDiscount`].
pub fn catalog_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    // distinct constant names: never Duplicate
    let _ = registry.register(Box::new(GetProductPrice));
    let _ = registry.register(Box::new(ApplyDiscount));
    registry
}
