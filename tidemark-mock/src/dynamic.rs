use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use tidemark_core::connector::{
    FeedConnector, PoolActivityProvider, PriceProvider, YieldProvider,
};
use tidemark_core::{Category, TidemarkError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TidemarkError),
    /// Hang indefinitely (simulate a stalled upstream).
    Hang,
}

#[derive(Default)]
struct InternalState {
    rules: HashMap<(Category, String), MockBehavior<Value>>,
    calls: HashMap<Category, Vec<String>>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for one category and provider key.
    pub async fn set_behavior(
        &self,
        category: Category,
        key: impl Into<String>,
        behavior: MockBehavior<Value>,
    ) {
        let mut guard = self.state.lock().await;
        guard.rules.insert((category, key.into()), behavior);
    }

    /// Keys requested so far for a category, in call order.
    pub async fn calls(&self, category: Category) -> Vec<String> {
        let guard = self.state.lock().await;
        guard.calls.get(&category).cloned().unwrap_or_default()
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.rules.clear();
        guard.calls.clear();
    }
}

/// A feed that defers all behavior to an external controller.
///
/// Keys with no configured behavior fail with [`TidemarkError::NotFound`].
pub struct DynamicMockFeed {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockFeed {
    /// Create a new dynamic mock feed and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<dyn FeedConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn FeedConnector>, controller)
    }

    async fn respond(&self, category: Category, key: &str) -> Result<Value, TidemarkError> {
        // Snapshot the behavior without holding the lock across the response.
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.entry(category).or_default().push(key.to_string());
            guard.rules.get(&(category, key.to_string())).cloned()
        };

        match behavior {
            Some(MockBehavior::Return(v)) => Ok(v),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => std::future::pending().await,
            None => Err(TidemarkError::not_found(format!("{category} payload for {key}"))),
        }
    }
}

impl FeedConnector for DynamicMockFeed {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_yield_provider(&self) -> Option<&dyn YieldProvider> {
        Some(self as &dyn YieldProvider)
    }

    fn as_price_provider(&self) -> Option<&dyn PriceProvider> {
        Some(self as &dyn PriceProvider)
    }

    fn as_pool_activity_provider(&self) -> Option<&dyn PoolActivityProvider> {
        Some(self as &dyn PoolActivityProvider)
    }
}

#[async_trait]
impl YieldProvider for DynamicMockFeed {
    async fn yield_history(&self, pool_key: &str) -> Result<Value, TidemarkError> {
        self.respond(Category::Yield, pool_key).await
    }
}

#[async_trait]
impl PriceProvider for DynamicMockFeed {
    async fn price_history(&self, token_key: &str, _days: u32) -> Result<Value, TidemarkError> {
        self.respond(Category::Price, token_key).await
    }
}

#[async_trait]
impl PoolActivityProvider for DynamicMockFeed {
    async fn pool_activity(
        &self,
        pool_address: &str,
        _days: u32,
    ) -> Result<Value, TidemarkError> {
        self.respond(Category::PoolActivity, pool_address).await
    }
}
