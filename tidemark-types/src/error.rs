use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tidemark workspace.
///
/// Malformed provider elements and malformed category payloads never surface as
/// values of this type; they are dropped and logged where they are found. What
/// remains are duplicate-on-persist signals (`AlreadyExists`), which the
/// orchestrator consumes, and fatal conditions that abort a run.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TidemarkError {
    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "price-history").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual feed connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A pool, token, or payload could not be found upstream.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "price history for ethereum".
        what: String,
    },

    /// The history store rejected a row because its natural key already exists.
    #[error("already exists: {key}")]
    AlreadyExists {
        /// Rendered natural key of the rejected row.
        key: String,
    },

    /// The history store failed for a reason other than a uniqueness violation.
    #[error("store {store} failed: {msg}")]
    Store {
        /// Store name that failed.
        store: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A single per-entity fetch exceeded the configured timeout.
    #[error("fetch timed out: {entity} via {connector}")]
    FetchTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Entity whose fetch timed out.
        entity: String,
    },

    /// Every entity fetch of a category failed; contains the individual failures.
    #[error("all {category} fetches failed: {errors:?}")]
    AllEntitiesFailed {
        /// Category label (e.g. "yield", "price", "pool-activity").
        category: String,
        /// Individual per-entity failures.
        errors: Vec<TidemarkError>,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl TidemarkError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `AlreadyExists` error for a rendered natural key.
    pub fn already_exists(key: impl Into<String>) -> Self {
        Self::AlreadyExists { key: key.into() }
    }

    /// Helper: build a `Store` error with the store name and message.
    pub fn store(store: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Store {
            store: store.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `FetchTimeout` error.
    pub fn fetch_timeout(connector: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::FetchTimeout {
            connector: connector.into(),
            entity: entity.into(),
        }
    }

    /// Returns true if this is the store's "already exists" signal.
    ///
    /// Duplicates are expected on re-runs and are counted rather than propagated.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Flatten nested `AllEntitiesFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllEntitiesFailed { errors, .. } => {
                errors.into_iter().flat_map(Self::flatten).collect()
            }
            other => vec![other],
        }
    }
}
