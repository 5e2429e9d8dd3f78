//! Featured products capability.

use std::sync::Arc;

use async_trait::async_trait;
use commerce::CommerceClient;
use serde_json::json;

use super::{product_listing, DEFAULT_LIMIT, MAX_LIMIT};
use crate::error::ToolError;
use crate::tool::{ArgumentKind, ArgumentSpec, CapabilityDescriptor, Tool, ToolArgs, ToolOutput};

/// Lists the store's featured or best-selling products.
pub struct FeaturedProducts {
    store: Arc<dyn CommerceClient>,
}

impl FeaturedProducts {
    pub fn new(store: Arc<dyn CommerceClient>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for FeaturedProducts {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "getFeaturedProducts",
            "Obtiene la lista de productos destacados o más vendidos",
        )
        .argument(ArgumentSpec::optional(
            "limit",
            ArgumentKind::Number,
            "Número de productos a mostrar (default: 5)",
            Some(json!(DEFAULT_LIMIT)),
        ))
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let limit = args.get_limit("limit", DEFAULT_LIMIT, MAX_LIMIT)?;

        let products = self
            .store
            .featured_products(limit)
            .await
            .map_err(|e| ToolError::commerce("Error al obtener productos destacados", e))?;

        Ok(ToolOutput::new(product_listing(&products)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{sample_product, CommerceCall, MockCommerce};
    use serde_json::Map;

    #[tokio::test]
    async fn test_featured_only() {
        let mut featured = sample_product(1, "Suavizador", true, None);
        featured.featured = true;
        let store = Arc::new(MockCommerce::with_products(vec![
            featured,
            sample_product(2, "Codo PVC", true, None),
        ]));
        let tool = FeaturedProducts::new(store.clone());

        let args = tool.descriptor().resolve(Map::new()).unwrap();
        let output = tool.execute(args).await.unwrap();

        assert_eq!(output.payload["count"], 1);
        assert_eq!(output.payload["products"][0]["name"], "Suavizador");
        assert_eq!(store.calls(), vec![CommerceCall::Featured(5)]);
    }

    #[tokio::test]
    async fn test_zero_limit_falls_back_to_default() {
        let store = Arc::new(MockCommerce::with_products(vec![]));
        let tool = FeaturedProducts::new(store.clone());

        let mut params = Map::new();
        params.insert("limit".to_string(), json!(0));
        let args = tool.descriptor().resolve(params).unwrap();
        let output = tool.execute(args).await.unwrap();

        assert_eq!(output.payload["success"], true);
        assert_eq!(store.calls(), vec![CommerceCall::Featured(5)]);
    }
}
