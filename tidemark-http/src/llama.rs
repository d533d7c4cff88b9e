use async_trait::async_trait;
use serde_json::Value;
use tidemark_core::TidemarkError;
use tidemark_core::connector::{FeedConnector, YieldProvider};

use crate::client::{send_json, take_array, trim_base};

/// Yield/TVL chart connector.
///
/// `GET {base}/chart/{pool_key}` answers `{ "status": .., "data": [..] }` where
/// each point carries `timestamp`, `apy`, and `tvlUsd`. The `data` array is
/// returned unchanged.
pub struct LlamaYieldsConnector {
    client: reqwest::Client,
    base: String,
}

impl LlamaYieldsConnector {
    /// Public yields API.
    pub const DEFAULT_BASE: &'static str = "https://yields.llama.fi";

    /// Build against the public API with a fresh client.
    #[must_use]
    pub fn new_default() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE)
    }

    /// Build against another base URL, e.g. a mirror or a test server.
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
        }
    }
}

impl FeedConnector for LlamaYieldsConnector {
    fn name(&self) -> &'static str {
        "tidemark-llama"
    }

    fn vendor(&self) -> &'static str {
        "DefiLlama"
    }

    fn as_yield_provider(&self) -> Option<&dyn YieldProvider> {
        Some(self as &dyn YieldProvider)
    }
}

#[async_trait]
impl YieldProvider for LlamaYieldsConnector {
    async fn yield_history(&self, pool_key: &str) -> Result<Value, TidemarkError> {
        let url = format!("{}/chart/{pool_key}", self.base);
        tracing::debug!(%url, "fetching yield chart");
        let what = format!("yield chart for {pool_key}");
        let body = send_json(self.name(), &what, self.client.get(&url)).await?;
        Ok(take_array(self.name(), &what, body, &["data"]))
    }
}
