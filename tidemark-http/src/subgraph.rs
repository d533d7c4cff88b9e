use async_trait::async_trait;
use serde_json::{Value, json};
use tidemark_core::TidemarkError;
use tidemark_core::connector::{FeedConnector, PoolActivityProvider};

use crate::client::{send_json, take_array, trim_base};

const POOL_DAY_DATAS: &str = "query poolDayDatas($pool: String!, $first: Int!) {
  poolDayDatas(first: $first, orderBy: date, orderDirection: desc, where: { pool: $pool }) {
    date
    volumeUSD
    feesUSD
  }
}";

/// DEX subgraph connector for daily pool activity.
///
/// POSTs a GraphQL `poolDayDatas` query to the endpoint and returns
/// `data.poolDayDatas`, newest first. A non-empty `errors` array in the
/// response is a connector error even when `data` is present.
pub struct SubgraphConnector {
    client: reqwest::Client,
    endpoint: String,
}

impl SubgraphConnector {
    /// Build against a subgraph endpoint with a fresh client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::new_with_client(reqwest::Client::new(), endpoint)
    }

    /// Build from an existing `reqwest::Client`.
    #[must_use]
    pub fn new_with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: trim_base(endpoint),
        }
    }
}

impl FeedConnector for SubgraphConnector {
    fn name(&self) -> &'static str {
        "tidemark-subgraph"
    }

    fn vendor(&self) -> &'static str {
        "The Graph"
    }

    fn as_pool_activity_provider(&self) -> Option<&dyn PoolActivityProvider> {
        Some(self as &dyn PoolActivityProvider)
    }
}

#[async_trait]
impl PoolActivityProvider for SubgraphConnector {
    async fn pool_activity(&self, pool_address: &str, days: u32) -> Result<Value, TidemarkError> {
        tracing::debug!(endpoint = %self.endpoint, pool = pool_address, days, "querying pool day data");
        let what = format!("pool day data for {pool_address}");
        // Subgraph ids are lowercase hex.
        let body = json!({
            "query": POOL_DAY_DATAS,
            "variables": { "pool": pool_address.to_ascii_lowercase(), "first": days },
        });
        let resp = send_json(
            self.name(),
            &what,
            self.client.post(&self.endpoint).json(&body),
        )
        .await?;

        if let Some(errors) = resp.get("errors").and_then(Value::as_array)
            && !errors.is_empty()
        {
            let msgs: Vec<&str> = errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .collect();
            return Err(TidemarkError::connector(
                self.name(),
                format!("{what}: {}", msgs.join("; ")),
            ));
        }
        Ok(take_array(self.name(), &what, resp, &["data", "poolDayDatas"]))
    }
}
