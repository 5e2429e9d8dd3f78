//! In-memory commerce client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use commerce::{Category, CommerceClient, CommerceError, Product, StockStatus};

/// A call received by [`MockCommerce`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommerceCall {
    Search { query: String, limit: u32 },
    GetProduct(i64),
    Featured(u32),
    Categories,
}

/// A catalog held in memory.
///
/// Search matches product names case-insensitively. When set to fail, every
/// call returns a `Status` error with code 503.
#[derive(Default)]
pub struct MockCommerce {
    products: Vec<Product>,
    categories: Vec<Category>,
    failing: AtomicBool,
    calls: Mutex<Vec<CommerceCall>>,
}

impl MockCommerce {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products,
            ..Self::default()
        }
    }

    /// Add categories to the catalog.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Create a client whose every call fails.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.set_failing(true);
        mock
    }

    /// Toggle failure mode.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<CommerceCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    fn record(&self, call: CommerceCall) -> Result<(), CommerceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(CommerceError::Status {
                status: 503,
                body: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CommerceClient for MockCommerce {
    async fn search_products(&self, query: &str, limit: u32) -> Result<Vec<Product>, CommerceError> {
        self.record(CommerceCall::Search {
            query: query.to_string(),
            limit,
        })?;
        let needle = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle) || p.sku.to_lowercase() == needle)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn get_product(&self, product_id: i64) -> Result<Option<Product>, CommerceError> {
        self.record(CommerceCall::GetProduct(product_id))?;
        Ok(self.products.iter().find(|p| p.id == product_id).cloned())
    }

    async fn featured_products(&self, limit: u32) -> Result<Vec<Product>, CommerceError> {
        self.record(CommerceCall::Featured(limit))?;
        Ok(self
            .products
            .iter()
            .filter(|p| p.featured)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>, CommerceError> {
        self.record(CommerceCall::Categories)?;
        Ok(self.categories.clone())
    }
}

/// Build a product with tracked stock. `quantity: None` means stock is not managed.
pub fn sample_product(id: i64, name: &str, in_stock: bool, quantity: Option<i64>) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: "100.00".to_string(),
        sku: format!("SKU-{}", id),
        stock_status: if in_stock {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        },
        stock_quantity: quantity,
        manage_stock: quantity.is_some(),
        description: format!("<p>{}</p>", name),
        short_description: String::new(),
        images: Vec::new(),
        permalink: format!("https://tienda.example.com/p/{}", id),
        featured: false,
    }
}
