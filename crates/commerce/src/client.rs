//! Commerce client trait and the WooCommerce implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::types::{Category, Product, StockInfo};

/// Read-only access to the product catalog.
///
/// Every method performs exactly one store request, except
/// [`check_stock`](CommerceClient::check_stock) which is derived from
/// [`get_product`](CommerceClient::get_product).
#[async_trait]
pub trait CommerceClient: Send + Sync {
    /// Search published products by name or SKU.
    async fn search_products(&self, query: &str, limit: u32) -> Result<Vec<Product>, CommerceError>;

    /// Fetch a product by id. `Ok(None)` when the store does not know it.
    async fn get_product(&self, product_id: i64) -> Result<Option<Product>, CommerceError>;

    /// Published products flagged as featured.
    async fn featured_products(&self, limit: u32) -> Result<Vec<Product>, CommerceError>;

    /// All product categories.
    async fn categories(&self) -> Result<Vec<Category>, CommerceError>;

    /// Stock availability of a product.
    async fn check_stock(&self, product_id: i64) -> Result<StockInfo, CommerceError> {
        Ok(self
            .get_product(product_id)
            .await?
            .as_ref()
            .map(StockInfo::from)
            .unwrap_or_else(StockInfo::unavailable))
    }
}

/// Client for the WooCommerce `wc/v3` REST API.
#[derive(Clone)]
pub struct WooCommerceClient {
    http: Client,
    config: CommerceConfig,
}

impl WooCommerceClient {
    /// Create a client. Fails when the store URL or credentials are empty.
    pub fn new(config: CommerceConfig) -> Result<Self, CommerceError> {
        if config.base_url.trim().is_empty() {
            return Err(CommerceError::Configuration("store URL is empty".to_string()));
        }
        if config.consumer_key.is_empty() || config.consumer_secret.is_empty() {
            return Err(CommerceError::Configuration(
                "consumer key and secret are required".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CommerceError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        info!("WooCommerce client ready for {}", config.base_url);

        Ok(Self { http, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`CommerceConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, CommerceError> {
        Self::new(CommerceConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &CommerceConfig {
        &self.config
    }

    /// GET a `wc/v3` resource and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        query: &[(&str, String)],
    ) -> Result<T, CommerceError> {
        let url = self.config.endpoint(resource);
        debug!("GET {} {:?}", url, query);

        let response = self
            .http
            .get(&url)
            .basic_auth(&self.config.consumer_key, Some(&self.config.consumer_secret))
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CommerceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Store answered {} bytes for {}", body.len(), resource);
        Ok(serde_json::from_str(&body)?)
    }

    async fn list_products(
        &self,
        operation: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Product>, CommerceError> {
        self.get_json("products", query)
            .await
            .inspect_err(|e| warn!("WooCommerce {} failed: {}", operation, e))
    }
}

#[async_trait]
impl CommerceClient for WooCommerceClient {
    async fn search_products(&self, query: &str, limit: u32) -> Result<Vec<Product>, CommerceError> {
        self.list_products(
            "search",
            &[
                ("search", query.to_string()),
                ("per_page", limit.to_string()),
                ("status", "publish".to_string()),
            ],
        )
        .await
    }

    async fn get_product(&self, product_id: i64) -> Result<Option<Product>, CommerceError> {
        match self
            .get_json::<Product>(&format!("products/{}", product_id), &[])
            .await
        {
            Ok(product) => Ok(Some(product)),
            Err(e) if e.is_not_found() => {
                debug!("Product {} not found", product_id);
                Ok(None)
            }
            Err(e) => {
                warn!("WooCommerce get product {} failed: {}", product_id, e);
                Err(e)
            }
        }
    }

    async fn featured_products(&self, limit: u32) -> Result<Vec<Product>, CommerceError> {
        self.list_products(
            "featured products",
            &[
                ("featured", "true".to_string()),
                ("per_page", limit.to_string()),
                ("status", "publish".to_string()),
            ],
        )
        .await
    }

    async fn categories(&self) -> Result<Vec<Category>, CommerceError> {
        self.get_json("products/categories", &[("per_page", "100".to_string())])
            .await
            .inspect_err(|e| warn!("WooCommerce categories failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(uri: &str) -> WooCommerceClient {
        WooCommerceClient::new(CommerceConfig::new(uri, "ck_test", "cs_test")).unwrap()
    }

    fn product_json(id: i64, name: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": name,
            "price": "120.00",
            "sku": format!("SKU-{}", id),
            "stock_status": "instock",
            "stock_quantity": 4,
            "manage_stock": true,
            "permalink": format!("https://tienda.example.com/p/{}", id)
        })
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let result = WooCommerceClient::new(CommerceConfig::new("https://x.example", "", ""));
        assert!(matches!(result, Err(CommerceError::Configuration(_))));

        let result = WooCommerceClient::new(CommerceConfig::new("  ", "ck", "cs"));
        assert!(matches!(result, Err(CommerceError::Configuration(_))));
    }

    #[tokio::test]
    async fn search_sends_query_and_auth() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products"))
            .and(query_param("search", "filtro"))
            .and(query_param("per_page", "5"))
            .and(query_param("status", "publish"))
            .and(basic_auth("ck_test", "cs_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                product_json(1, "Filtro A"),
                product_json(2, "Filtro B")
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let products = test_client(&server.uri())
            .search_products("filtro", 5)
            .await
            .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Filtro B");
    }

    #[tokio::test]
    async fn get_product_404_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products/999"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "woocommerce_rest_product_invalid_id",
                "message": "ID inválido."
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        assert!(client.get_product(999).await.unwrap().is_none());

        let stock = client.check_stock(999).await.unwrap();
        assert_eq!(stock, StockInfo::unavailable());
    }

    #[tokio::test]
    async fn check_stock_reads_tracked_quantity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_json(42, "Suavizador")))
            .expect(1)
            .mount(&server)
            .await;

        let stock = test_client(&server.uri()).check_stock(42).await.unwrap();
        assert!(stock.in_stock);
        assert_eq!(stock.quantity, Some(4));
    }

    #[tokio::test]
    async fn server_error_is_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).featured_products(3).await;
        match result {
            Err(CommerceError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_product_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
            .mount(&server)
            .await;

        let result = test_client(&server.uri()).get_product(5).await;
        assert!(matches!(result, Err(CommerceError::Decode(_))));
    }

    #[tokio::test]
    async fn featured_and_category_queries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products"))
            .and(query_param("featured", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([product_json(3, "Destacado")])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/wp-json/wc/v3/products/categories"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 9, "name": "Filtros", "slug": "filtros", "parent": 0, "count": 12}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let featured = client.featured_products(5).await.unwrap();
        assert_eq!(featured[0].name, "Destacado");
        let categories = client.categories().await.unwrap();
        assert_eq!(categories[0].slug, "filtros");
        assert_eq!(categories[0].count, 12);
    }
}
