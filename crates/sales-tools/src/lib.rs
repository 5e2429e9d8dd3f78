//! Capability registry for the Aquabot sales assistant.
//!
//! Capabilities are named, schema-described actions the model may request.
//! The [`CapabilityRegistry`] describes them to the model and dispatches the
//! model's calls, turning every failure into a structured
//! `{"success": false, "error": ...}` payload the model can read.
//!
//! # Built-in Capabilities
//!
//! - [`SearchProducts`] - `searchProducts`: keyword search over published products
//! - [`ProductDetails`] - `getProductDetails`: full record of one product
//! - [`CheckStock`] - `checkStock`: availability and tracked quantity
//! - [`FeaturedProducts`] - `getFeaturedProducts`: featured products
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_tools::default_registry;
//! use serde_json::{json, Map};
//!
//! let registry = default_registry(store);
//! let mut args = Map::new();
//! args.insert("productId".to_string(), json!(42));
//! let result = registry.dispatch("checkStock", args).await;
//! println!("{}", result["message"]);
//! ```

mod error;
mod registry;
mod tool;
pub mod tools;

use std::sync::Arc;

use commerce::CommerceClient;

pub use error::ToolError;
pub use registry::CapabilityRegistry;
pub use tool::{ArgumentKind, ArgumentSpec, CapabilityDescriptor, Tool, ToolArgs, ToolOutput};
pub use tools::{CheckStock, FeaturedProducts, ProductDetails, SearchProducts};

// Re-export async_trait for convenience
pub use async_trait::async_trait;

/// Names of capabilities that look up catalog products.
pub const PRODUCT_CAPABILITIES: [&str; 4] = [
    "searchProducts",
    "getProductDetails",
    "checkStock",
    "getFeaturedProducts",
];

/// Create a registry with the four catalog capabilities over `store`.
pub fn default_registry(store: Arc<dyn CommerceClient>) -> CapabilityRegistry {
    let mut registry = CapabilityRegistry::new();

    registry.register(SearchProducts::new(store.clone()));
    registry.register(ProductDetails::new(store.clone()));
    registry.register(CheckStock::new(store.clone()));
    registry.register(FeaturedProducts::new(store));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{MockCommerce, CommerceCall};
    use serde_json::{json, Map};

    #[test]
    fn test_default_registry_order() {
        let registry = default_registry(Arc::new(MockCommerce::new()));
        assert_eq!(registry.names(), PRODUCT_CAPABILITIES.to_vec());

        let specs = registry.function_specs();
        assert_eq!(specs[0].parameters["required"], json!(["query"]));
        assert_eq!(specs[3].parameters["properties"]["limit"]["default"], 5);
    }

    #[tokio::test]
    async fn test_commerce_failure_is_absorbed() {
        let store = Arc::new(MockCommerce::failing());
        let registry = default_registry(store.clone());

        let mut args = Map::new();
        args.insert("query".to_string(), json!("bomba"));
        let result = registry.dispatch("searchProducts", args).await;

        assert_eq!(
            result,
            json!({ "success": false, "error": "Error al buscar productos" })
        );
        assert_eq!(
            store.calls(),
            vec![CommerceCall::Search {
                query: "bomba".to_string(),
                limit: 5
            }]
        );
    }

    #[tokio::test]
    async fn test_invalid_argument_never_reaches_store() {
        let store = Arc::new(MockCommerce::new());
        let registry = default_registry(store.clone());

        let mut args = Map::new();
        args.insert("productId".to_string(), json!("cuarenta"));
        let result = registry.dispatch("checkStock", args).await;

        assert_eq!(result["success"], false);
        assert_eq!(store.call_count(), 0);
    }
}
