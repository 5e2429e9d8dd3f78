//! Catalog capabilities backed by a [`CommerceClient`](commerce::CommerceClient).

mod check_stock;
mod featured_products;
mod product_details;
mod search_products;

pub use check_stock::CheckStock;
pub use featured_products::FeaturedProducts;
pub use product_details::ProductDetails;
pub use search_products::SearchProducts;

use commerce::Product;
use serde_json::{json, Value};

/// Store page size cap.
pub(crate) const MAX_LIMIT: u32 = 100;

/// Default number of products returned by listing capabilities.
pub(crate) const DEFAULT_LIMIT: u32 = 5;

/// Compact product entry used by listing capabilities.
pub(crate) fn product_summary(product: &Product) -> Value {
    json!({
        "id": product.id,
        "name": product.name,
        "price": product.price,
        "sku": product.sku,
        "inStock": product.is_in_stock(),
        "permalink": product.permalink,
    })
}

/// `{success, count, products}` payload for a product listing.
pub(crate) fn product_listing(products: &[Product]) -> Value {
    json!({
        "success": true,
        "count": products.len(),
        "products": products.iter().map(product_summary).collect::<Vec<_>>(),
    })
}
