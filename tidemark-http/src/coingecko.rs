use async_trait::async_trait;
use serde_json::Value;
use tidemark_core::TidemarkError;
use tidemark_core::connector::{FeedConnector, PriceProvider};

use crate::client::{send_json, take_array, trim_base};

/// Daily USD price chart connector.
///
/// `GET {base}/coins/{id}/market_chart?vs_currency=usd&days={n}&interval=daily`
/// answers an object whose `prices` field is an array of
/// `[epoch_millis, price]` pairs. Only `prices` is returned.
pub struct CoinGeckoConnector {
    client: reqwest::Client,
    base: String,
    api_key: Option<String>,
}

impl CoinGeckoConnector {
    /// Public API root.
    pub const DEFAULT_BASE: &'static str = "https://api.coingecko.com/api/v3";

    /// Build against the public API with a fresh client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE)
    }

    /// Build against another base URL.
    #[must_use]
    pub fn with_base_url(base: impl Into<String>) -> Self {
        Self::new_with_client(reqwest::Client::new(), base)
    }

    /// Build from an existing `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(client: reqwest::Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: trim_base(base),
            api_key: None,
        }
    }

    /// Send `x-cg-demo-api-key` with every request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

impl FeedConnector for CoinGeckoConnector {
    fn name(&self) -> &'static str {
        "tidemark-coingecko"
    }

    fn vendor(&self) -> &'static str {
        "CoinGecko"
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoConnector {
    async fn price_history(&self, token_key: &str, days: u32) -> Result<Value, TidemarkError> {
        let url = format!("{}/coins/{token_key}/market_chart", self.base);
        tracing::debug!(%url, days, "fetching price chart");
        let mut req = self.client.get(&url).query(&[
            ("vs_currency", "usd".to_string()),
            ("days", days.to_string()),
            ("interval", "daily".to_string()),
        ]);
        if let Some(key) = &self.api_key {
            req = req.header("x-cg-demo-api-key", key);
        }
        let what = format!("price chart for {token_key}");
        let body = send_json(self.name(), &what, req).await?;
        Ok(take_array(self.name(), &what, body, &["prices"]))
    }
}
