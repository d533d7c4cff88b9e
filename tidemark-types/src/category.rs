use core::fmt;
use serde::{Deserialize, Serialize};

/// The three feeds a pipeline run reconciles.
///
/// Declaration order is the persistence order: staking yield first, then token
/// prices, then pool activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Staking APY and pool TVL, both served by the yield provider.
    Yield,
    /// Daily token prices.
    Price,
    /// Daily pool fees and volume, later aligned with pool TVL.
    PoolActivity,
}

impl Category {
    /// All categories in persistence order.
    pub const ALL: [Self; 3] = [Self::Yield, Self::Price, Self::PoolActivity];

    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yield => "yield",
            Self::Price => "price",
            Self::PoolActivity => "pool-activity",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
