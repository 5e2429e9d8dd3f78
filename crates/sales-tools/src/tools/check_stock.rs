//! Stock availability capability.

use std::sync::Arc;

use async_trait::async_trait;
use commerce::{CommerceClient, StockInfo};
use serde_json::json;

use crate::error::ToolError;
use crate::tool::{ArgumentKind, ArgumentSpec, CapabilityDescriptor, Tool, ToolArgs, ToolOutput};

/// Checks whether a product is available and, if tracked, how many units remain.
pub struct CheckStock {
    store: Arc<dyn CommerceClient>,
}

impl CheckStock {
    pub fn new(store: Arc<dyn CommerceClient>) -> Self {
        Self { store }
    }
}

fn availability_message(stock: &StockInfo) -> String {
    match (stock.in_stock, stock.quantity) {
        (true, Some(quantity)) if quantity > 0 => {
            format!("Producto disponible ({} unidades)", quantity)
        }
        (true, _) => "Producto disponible".to_string(),
        (false, _) => "Producto agotado".to_string(),
    }
}

#[async_trait]
impl Tool for CheckStock {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "checkStock",
            "Verifica la disponibilidad y stock de un producto",
        )
        .argument(ArgumentSpec::required(
            "productId",
            ArgumentKind::Number,
            "ID del producto",
        ))
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let product_id = args.get_i64("productId")?;

        let stock = self
            .store
            .check_stock(product_id)
            .await
            .map_err(|e| ToolError::commerce("Error al verificar stock", e))?;

        Ok(ToolOutput::new(json!({
            "success": true,
            "productId": product_id,
            "inStock": stock.in_stock,
            "quantity": stock.quantity,
            "message": availability_message(&stock),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_brain::{sample_product, CommerceCall, MockCommerce};
    use serde_json::Map;

    #[tokio::test]
    async fn test_check_stock_payload() {
        let store = Arc::new(MockCommerce::with_products(vec![sample_product(
            42, "Modelo X", true, Some(3),
        )]));
        let tool = CheckStock::new(store.clone());

        let mut params = Map::new();
        params.insert("productId".to_string(), json!(42));
        let output = tool.execute(ToolArgs::new(params)).await.unwrap();

        assert_eq!(
            output.payload,
            json!({
                "success": true,
                "productId": 42,
                "inStock": true,
                "quantity": 3,
                "message": "Producto disponible (3 unidades)"
            })
        );
        assert_eq!(store.calls(), vec![CommerceCall::GetProduct(42)]);
    }

    #[test]
    fn test_availability_message() {
        let untracked = StockInfo {
            in_stock: true,
            quantity: None,
        };
        assert_eq!(availability_message(&untracked), "Producto disponible");
        assert_eq!(
            availability_message(&StockInfo::unavailable()),
            "Producto agotado"
        );
    }
}
