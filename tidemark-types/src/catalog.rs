//! Static entity lookups: which provider keys and addresses belong to which entity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The pool whose yield feed supplies the staking APY series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StakingEntry {
    /// Entity name used as the dataset key.
    pub name: String,
    /// Key understood by the yield provider.
    pub yield_key: String,
}

/// A liquidity pool tracked for both TVL and daily activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Key understood by the yield provider (TVL source).
    pub yield_key: String,
    /// On-chain pool address; also the key understood by the activity provider.
    pub address: String,
}

/// A token tracked for daily prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenEntry {
    /// Key understood by the price provider.
    pub price_key: String,
    /// Ticker symbol attached to persisted price rows (uppercased on attach).
    pub symbol: String,
}

/// Entity catalog for one deployment.
///
/// Entity names are the keys of every `Dataset`; provider keys never leak past
/// the fetch stage.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityCatalog {
    /// Staking pool supplying APY. `None` disables the staking series.
    pub staking: Option<StakingEntry>,
    /// Liquidity pools keyed by entity name.
    pub pools: BTreeMap<String, PoolEntry>,
    /// Tokens keyed by entity name.
    pub tokens: BTreeMap<String, TokenEntry>,
}

impl EntityCatalog {
    /// Entity name → on-chain address for every configured pool.
    #[must_use]
    pub fn pool_addresses(&self) -> BTreeMap<String, String> {
        self.pools
            .iter()
            .map(|(name, p)| (name.clone(), p.address.clone()))
            .collect()
    }

    /// Returns `true` if no entity of any category is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staking.is_none() && self.pools.is_empty() && self.tokens.is_empty()
    }
}
