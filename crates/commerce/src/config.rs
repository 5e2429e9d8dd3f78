//! Configuration for the WooCommerce client.

use std::env;
use std::time::Duration;

use crate::error::CommerceError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a WooCommerce store.
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    /// Store root URL, e.g. `https://tienda.example.com`.
    pub base_url: String,

    /// REST API consumer key.
    pub consumer_key: String,

    /// REST API consumer secret.
    pub consumer_secret: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl CommerceConfig {
    /// Create a configuration with the default timeout.
    pub fn new(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `WOOCOMMERCE_URL` - Store root URL
    /// - `WOOCOMMERCE_CONSUMER_KEY` - REST API consumer key
    /// - `WOOCOMMERCE_CONSUMER_SECRET` - REST API consumer secret
    ///
    /// Optional environment variables:
    /// - `WOOCOMMERCE_TIMEOUT_SECS` - Request timeout (default: 30)
    pub fn from_env() -> Result<Self, CommerceError> {
        let base_url = required("WOOCOMMERCE_URL")?;
        let consumer_key = required("WOOCOMMERCE_CONSUMER_KEY")?;
        let consumer_secret = required("WOOCOMMERCE_CONSUMER_SECRET")?;

        let timeout = env::var("WOOCOMMERCE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self::new(base_url, consumer_key, consumer_secret)
            .with_timeout(Duration::from_secs(timeout)))
    }

    /// URL of a `wc/v3` resource, e.g. `products/42`.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/wp-json/wc/v3/{}",
            self.base_url.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

fn required(name: &str) -> Result<String, CommerceError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| CommerceError::Configuration(format!("{} not set", name)))
}
