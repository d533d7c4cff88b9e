use futures::future::join_all;
use tidemark_core::{Category, TidemarkError};

use crate::Tidemark;
use crate::pipeline::util::{Fetched, call_with_timeout, collect_entities};

/// Everything fetched for one run.
#[derive(Debug, Default)]
pub struct RawFeeds {
    /// Staking APY and pool TVL payloads, keyed by entity name.
    pub yields: Fetched,
    /// Token price payloads.
    pub prices: Fetched,
    /// Pool activity payloads, keyed by pool entity name.
    pub activity: Fetched,
}

impl Tidemark {
    /// Fetch all three categories concurrently.
    ///
    /// Entity failures end up as warnings inside each `Fetched`. Only a
    /// category-level fault, such as no connector serving it, is an error; all
    /// categories are awaited before the first one in category order (yield,
    /// price, pool activity) is returned.
    pub(crate) async fn fetch_all(&self) -> Result<RawFeeds, TidemarkError> {
        let (yields, prices, activity) = tokio::join!(
            self.fetch_yields(),
            self.fetch_prices(),
            self.fetch_pool_activity()
        );
        Ok(RawFeeds {
            yields: yields?,
            prices: prices?,
            activity: activity?,
        })
    }

    #[tracing::instrument(name = "tidemark::fetch::yield", skip(self))]
    async fn fetch_yields(&self) -> Result<Fetched, TidemarkError> {
        let mut targets: Vec<(String, String)> = Vec::new();
        if let Some(s) = &self.catalog.staking {
            targets.push((s.name.clone(), s.yield_key.clone()));
        }
        targets.extend(
            self.catalog
                .pools
                .iter()
                .map(|(name, p)| (name.clone(), p.yield_key.clone())),
        );
        if targets.is_empty() {
            return Ok(Fetched::default());
        }
        let (connector, provider) = self
            .yield_provider()
            .ok_or_else(|| TidemarkError::unsupported(Category::Yield.to_string()))?;
        let timeout = self.cfg.fetch_timeout;

        let tasks = targets.into_iter().map(|(entity, key)| async move {
            let res = call_with_timeout(
                connector,
                &entity,
                timeout,
                provider.yield_history(&key),
            )
            .await;
            (entity, res)
        });
        Ok(collect_entities(Category::Yield, join_all(tasks).await))
    }

    #[tracing::instrument(name = "tidemark::fetch::price", skip(self))]
    async fn fetch_prices(&self) -> Result<Fetched, TidemarkError> {
        if self.catalog.tokens.is_empty() {
            return Ok(Fetched::default());
        }
        let (connector, provider) = self
            .price_provider()
            .ok_or_else(|| TidemarkError::unsupported(Category::Price.to_string()))?;
        let timeout = self.cfg.fetch_timeout;
        let days = self.lookback_days();

        let tasks = self.catalog.tokens.iter().map(|(entity, token)| async move {
            let res = call_with_timeout(
                connector,
                entity,
                timeout,
                provider.price_history(&token.price_key, days),
            )
            .await;
            (entity.clone(), res)
        });
        Ok(collect_entities(Category::Price, join_all(tasks).await))
    }

    #[tracing::instrument(name = "tidemark::fetch::pool_activity", skip(self))]
    async fn fetch_pool_activity(&self) -> Result<Fetched, TidemarkError> {
        if self.catalog.pools.is_empty() {
            return Ok(Fetched::default());
        }
        let (connector, provider) = self
            .pool_activity_provider()
            .ok_or_else(|| TidemarkError::unsupported(Category::PoolActivity.to_string()))?;
        let timeout = self.cfg.fetch_timeout;
        let days = self.lookback_days();

        let tasks = self.catalog.pools.iter().map(|(entity, pool)| async move {
            let res = call_with_timeout(
                connector,
                entity,
                timeout,
                provider.pool_activity(&pool.address, days),
            )
            .await;
            (entity.clone(), res)
        });
        Ok(collect_entities(Category::PoolActivity, join_all(tasks).await))
    }
}
