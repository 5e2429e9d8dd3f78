//! Product search capability.

use std::sync::Arc;

use async_trait::async_trait;
use commerce::CommerceClient;
use serde_json::json;
use tracing::debug;

use super::{product_listing, DEFAULT_LIMIT, MAX_LIMIT};
use crate::error::ToolError;
use crate::tool::{ArgumentKind, ArgumentSpec, CapabilityDescriptor, Tool, ToolArgs, ToolOutput};

/// Searches published products by name, category or features.
///
/// # Parameters
///
/// - `query` (required): Search term
/// - `limit` (optional, default: 5): Maximum number of results
pub struct SearchProducts {
    store: Arc<dyn CommerceClient>,
}

impl SearchProducts {
    pub fn new(store: Arc<dyn CommerceClient>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SearchProducts {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "searchProducts",
            "Busca productos en la tienda por nombre, categoría o características",
        )
        .argument(ArgumentSpec::required(
            "query",
            ArgumentKind::String,
            "Término de búsqueda (nombre del producto, categoría, etc.)",
        ))
        .argument(ArgumentSpec::optional(
            "limit",
            ArgumentKind::Number,
            "Número máximo de resultados (default: 5)",
            Some(json!(DEFAULT_LIMIT)),
        ))
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let query = args.get_string("query")?;
        let limit = args.get_limit("limit", DEFAULT_LIMIT, MAX_LIMIT)?;

        debug!("Searching products for '{}' (limit {})", query, limit);

        let products = self
            .store
            .search_products(&query, limit)
            .await
            .map_err(|e| ToolError::commerce("Error al buscar productos", e))?;

        Ok(ToolOutput::new(product_listing(&products)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{sample_product, CommerceCall, MockCommerce};
    use serde_json::Map;

    #[tokio::test]
    async fn test_search_uses_default_limit() {
        let store = Arc::new(MockCommerce::with_products(vec![
            sample_product(1, "Filtro de sedimentos", true, Some(8)),
            sample_product(2, "Filtro de carbón", false, None),
            sample_product(3, "Bomba periférica", true, None),
        ]));
        let tool = SearchProducts::new(store.clone());

        let mut params = Map::new();
        params.insert("query".to_string(), json!("filtro"));
        let args = tool.descriptor().resolve(params).unwrap();

        let output = tool.execute(args).await.unwrap();
        assert_eq!(output.payload["success"], true);
        assert_eq!(output.payload["count"], 2);
        assert_eq!(output.payload["products"][0]["inStock"], true);
        assert_eq!(output.payload["products"][1]["inStock"], false);
        assert_eq!(output.payload["products"][0]["sku"], "SKU-1");
        assert_eq!(
            store.calls(),
            vec![CommerceCall::Search {
                query: "filtro".to_string(),
                limit: 5
            }]
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_commerce_error() {
        let tool = SearchProducts::new(Arc::new(MockCommerce::failing()));

        let mut params = Map::new();
        params.insert("query".to_string(), json!("bomba"));
        params.insert("limit".to_string(), json!(3));

        let err = tool.execute(ToolArgs::new(params)).await.unwrap_err();
        assert!(matches!(err, ToolError::Commerce { .. }));
        assert_eq!(err.to_string(), "Error al buscar productos");
    }
}
