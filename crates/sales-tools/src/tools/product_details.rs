//! Product details capability.

use std::sync::Arc;

use async_trait::async_trait;
use commerce::{strip_html, CommerceClient};
use serde_json::json;

use crate::error::ToolError;
use crate::tool::{ArgumentKind, ArgumentSpec, CapabilityDescriptor, Tool, ToolArgs, ToolOutput};

/// Fetches the full record of one product by id.
pub struct ProductDetails {
    store: Arc<dyn CommerceClient>,
}

impl ProductDetails {
    pub fn new(store: Arc<dyn CommerceClient>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for ProductDetails {
    fn descriptor(&self) -> CapabilityDescriptor {
        CapabilityDescriptor::new(
            "getProductDetails",
            "Obtiene información detallada de un producto específico por su ID",
        )
        .argument(ArgumentSpec::required(
            "productId",
            ArgumentKind::Number,
            "ID del producto en WooCommerce",
        ))
    }

    async fn execute(&self, args: ToolArgs) -> Result<ToolOutput, ToolError> {
        let product_id = args.get_i64("productId")?;

        let product = self
            .store
            .get_product(product_id)
            .await
            .map_err(|e| ToolError::commerce("Error al obtener detalles del producto", e))?;

        let Some(product) = product else {
            return Ok(ToolOutput::failure("Producto no encontrado"));
        };

        Ok(ToolOutput::new(json!({
            "success": true,
            "product": {
                "id": product.id,
                "name": product.name,
                "price": product.price,
                "sku": product.sku,
                "description": strip_html(&product.description),
                "shortDescription": strip_html(&product.short_description),
                "inStock": product.is_in_stock(),
                "stockQuantity": product.stock_quantity,
                "permalink": product.permalink,
                "images": product.image_urls(),
            }
        })))
    }
}
