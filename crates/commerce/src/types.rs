//! Store data types, decoded from `wc/v3` payloads.

use serde::{Deserialize, Deserializer, Serialize};

/// Availability reported by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "instock")]
    InStock,
    #[serde(rename = "outofstock")]
    OutOfStock,
    #[serde(rename = "onbackorder")]
    OnBackorder,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
}

/// A catalog product.
///
/// `id`, `name` and `stock_status` are required; everything else falls back
/// to an empty value when absent or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Price as the store formats it. Empty when the product has no price.
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sku: String,
    pub stock_status: StockStatus,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "manage_stock_flag")]
    pub manage_stock: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ProductImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub featured: bool,
}

impl Product {
    pub fn is_in_stock(&self) -> bool {
        self.stock_status == StockStatus::InStock
    }

    /// Tracked quantity, or `None` when the store does not manage stock.
    pub fn tracked_quantity(&self) -> Option<i64> {
        if self.manage_stock {
            self.stock_quantity
        } else {
            None
        }
    }

    /// Image URLs, skipping empty ones.
    pub fn image_urls(&self) -> Vec<String> {
        self.images
            .iter()
            .filter(|img| !img.src.is_empty())
            .map(|img| img.src.clone())
            .collect()
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    /// Parent category id, 0 for top level.
    #[serde(default, deserialize_with = "null_as_default")]
    pub parent: i64,
    /// Number of published products in the category.
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
}

/// Stock availability for a single product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    pub in_stock: bool,
    /// Known quantity. `None` when stock is not tracked or the product is absent.
    pub quantity: Option<i64>,
}

impl StockInfo {
    /// Stock info for a product the store does not know.
    pub fn unavailable() -> Self {
        Self {
            in_stock: false,
            quantity: None,
        }
    }
}

impl From<&Product> for StockInfo {
    fn from(product: &Product) -> Self {
        Self {
            in_stock: product.is_in_stock(),
            quantity: product.tracked_quantity(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Variations report `manage_stock` as `"parent"` when the parent tracks stock.
fn manage_stock_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Text(_)) | None => false,
    })
}
