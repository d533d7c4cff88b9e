use std::time::Duration;

use serde_json::Value;
use tidemark_core::{Category, RawPayload, TidemarkError};

/// Payloads fetched for one category, plus isolated per-entity failures.
#[derive(Debug, Default)]
pub struct Fetched {
    /// Entity name → raw payload, for entities that succeeded.
    pub payloads: RawPayload,
    /// Failures of individual entities.
    pub warnings: Vec<TidemarkError>,
}

/// Await a feed call, bounding it by `timeout` when set.
pub async fn call_with_timeout<Fut>(
    connector: &'static str,
    entity: &str,
    timeout: Option<Duration>,
    fut: Fut,
) -> Result<Value, TidemarkError>
where
    Fut: std::future::Future<Output = Result<Value, TidemarkError>>,
{
    match timeout {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .unwrap_or_else(|_| Err(TidemarkError::fetch_timeout(connector, entity))),
        None => fut.await,
    }
}

/// Split joined per-entity results into payloads and warnings.
///
/// Entity failures never fail the category: each one is logged and omitted.
/// When every attempted entity failed, the warnings collapse into a single
/// `AllEntitiesFailed` so the report still says the category came back empty.
pub fn collect_entities(
    category: Category,
    joined: Vec<(String, Result<Value, TidemarkError>)>,
) -> Fetched {
    let attempted = joined.len();
    let mut out = Fetched::default();
    for (entity, result) in joined {
        match result {
            Ok(v) => {
                out.payloads.insert(entity, v);
            }
            Err(e) => {
                tracing::warn!(%category, entity = %entity, error = %e, "entity fetch failed; omitting");
                out.warnings.push(e);
            }
        }
    }
    if attempted > 0 && out.payloads.is_empty() {
        tracing::warn!(%category, attempted, "every entity failed; category left empty");
        out.warnings = vec![TidemarkError::AllEntitiesFailed {
            category: category.to_string(),
            errors: std::mem::take(&mut out.warnings),
        }];
    }
    out
}
