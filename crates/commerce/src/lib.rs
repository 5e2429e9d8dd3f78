//! WooCommerce REST client for the Aquabot sales assistant.
//!
//! The [`CommerceClient`] trait is the seam the capability layer talks to;
//! [`WooCommerceClient`] implements it over the `wc/v3` REST API.
//!
//! # Example
//!
//! ```rust,no_run
//! use commerce::{CommerceClient, CommerceConfig, WooCommerceClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WooCommerceClient::new(CommerceConfig::from_env()?)?;
//!     for product in client.search_products("filtro", 5).await? {
//!         println!("{} - Q{}", product.name, product.price);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod format;
mod types;

pub use client::{CommerceClient, WooCommerceClient};
pub use config::CommerceConfig;
pub use error::CommerceError;
pub use format::{format_product_info, strip_html};
pub use types::{Category, Product, ProductImage, StockInfo, StockStatus};

// Re-export async_trait for implementors
pub use async_trait::async_trait;
