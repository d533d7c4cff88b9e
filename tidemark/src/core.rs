use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tidemark_core::connector::{
    FeedConnector, HistoryStore, PoolActivityProvider, PriceProvider, YieldProvider,
};
use tidemark_core::{Category, EntityCatalog, GapFillConfig, TidemarkConfig, TidemarkError};

/// Orchestrator that fetches, reconciles, and persists daily history.
pub struct Tidemark {
    pub(crate) connectors: Vec<Arc<dyn FeedConnector>>,
    pub(crate) store: Arc<dyn HistoryStore>,
    pub(crate) catalog: EntityCatalog,
    pub(crate) cfg: TidemarkConfig,
    running: AtomicBool,
}

/// Builder for constructing a `Tidemark` orchestrator with custom configuration.
pub struct TidemarkBuilder {
    connectors: Vec<Arc<dyn FeedConnector>>,
    store: Option<Arc<dyn HistoryStore>>,
    catalog: EntityCatalog,
    cfg: TidemarkConfig,
}

impl Default for TidemarkBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TidemarkBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Starts with no connectors, no store, and an empty catalog. Defaults: a
    /// 365-day window, a 7-day gap fill search with 2 neighbors per side, no
    /// fetch timeout, and an OS-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            store: None,
            catalog: EntityCatalog::default(),
            cfg: TidemarkConfig::default(),
        }
    }

    /// Register a feed connector.
    ///
    /// For each category the first registered connector advertising that
    /// capability serves every entity of the category.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn FeedConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set the history store rows are persisted to.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn HistoryStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the entity catalog.
    #[must_use]
    pub fn catalog(mut self, catalog: EntityCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub const fn config(mut self, cfg: TidemarkConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum records kept per series. Also the number of days requested
    /// from price and pool activity feeds.
    #[must_use]
    pub const fn window_len(mut self, len: usize) -> Self {
        self.cfg.window_len = len;
        self
    }

    /// Gap filler search bounds.
    #[must_use]
    pub const fn gap_fill(mut self, gap_fill: GapFillConfig) -> Self {
        self.cfg.gap_fill = gap_fill;
        self
    }

    /// Bound each per-entity fetch. Unset by default: a stalled upstream
    /// stalls the run.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = Some(timeout);
        self
    }

    /// Seed the gap synthesis RNG for reproducible runs.
    #[must_use]
    pub const fn rng_seed(mut self, seed: u64) -> Self {
        self.cfg.rng_seed = Some(seed);
        self
    }

    /// Build the `Tidemark` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connector or no store is registered, if the
    /// window length is zero, if the staking entity name collides with a pool
    /// name, or if a category with configured entities has no connector that
    /// serves it.
    pub fn build(self) -> Result<Tidemark, TidemarkError> {
        if self.connectors.is_empty() {
            return Err(TidemarkError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        let Some(store) = self.store else {
            return Err(TidemarkError::InvalidArg(
                "no history store registered; set one via with_store(...)".to_string(),
            ));
        };
        if self.cfg.window_len == 0 {
            return Err(TidemarkError::InvalidArg(
                "window_len must be positive".to_string(),
            ));
        }
        if let Some(staking) = &self.catalog.staking
            && self.catalog.pools.contains_key(&staking.name)
        {
            return Err(TidemarkError::InvalidArg(format!(
                "staking entity '{}' is also configured as a pool",
                staking.name
            )));
        }

        let needs = [
            (
                Category::Yield,
                self.catalog.staking.is_some() || !self.catalog.pools.is_empty(),
            ),
            (Category::Price, !self.catalog.tokens.is_empty()),
            (Category::PoolActivity, !self.catalog.pools.is_empty()),
        ];
        for (category, needed) in needs {
            if needed && !serves(&self.connectors, category) {
                return Err(TidemarkError::InvalidArg(format!(
                    "no registered connector provides {category} data"
                )));
            }
        }

        Ok(Tidemark {
            connectors: self.connectors,
            store,
            catalog: self.catalog,
            cfg: self.cfg,
            running: AtomicBool::new(false),
        })
    }
}

fn serves(connectors: &[Arc<dyn FeedConnector>], category: Category) -> bool {
    connectors.iter().any(|c| match category {
        Category::Yield => c.as_yield_provider().is_some(),
        Category::Price => c.as_price_provider().is_some(),
        Category::PoolActivity => c.as_pool_activity_provider().is_some(),
    })
}

/// Holds the run gate for the lifetime of one run.
pub(crate) struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    pub(crate) fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Tidemark {
    /// Start building a new `Tidemark` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tidemark_mock::{MemoryStore, MockFeed};
    ///
    /// let tidemark = tidemark::Tidemark::builder()
    ///     .with_connector(Arc::new(MockFeed::new()))
    ///     .with_store(Arc::new(MemoryStore::new()))
    ///     .catalog(MockFeed::catalog())
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TidemarkBuilder {
        TidemarkBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &TidemarkConfig {
        &self.cfg
    }

    /// Entity catalog.
    #[must_use]
    pub const fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Returns `true` while a run holds the gate.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub(crate) fn try_begin_run(&self) -> Option<RunGuard<'_>> {
        RunGuard::acquire(&self.running)
    }

    pub(crate) fn rng(&self) -> StdRng {
        self.cfg
            .rng_seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
    }

    /// Days of history requested from price and activity feeds.
    pub(crate) fn lookback_days(&self) -> u32 {
        u32::try_from(self.cfg.window_len).unwrap_or(u32::MAX)
    }

    pub(crate) fn yield_provider(&self) -> Option<(&'static str, &dyn YieldProvider)> {
        self.connectors
            .iter()
            .find_map(|c| c.as_yield_provider().map(|p| (c.name(), p)))
    }

    pub(crate) fn price_provider(&self) -> Option<(&'static str, &dyn PriceProvider)> {
        self.connectors
            .iter()
            .find_map(|c| c.as_price_provider().map(|p| (c.name(), p)))
    }

    pub(crate) fn pool_activity_provider(
        &self,
    ) -> Option<(&'static str, &dyn PoolActivityProvider)> {
        self.connectors
            .iter()
            .find_map(|c| c.as_pool_activity_provider().map(|p| (c.name(), p)))
    }
}
