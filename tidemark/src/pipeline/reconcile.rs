use rand::Rng;
use tidemark_core::{
    Dataset, EntityCatalog, ExtractionSpec, RawPayload, ReconcileParams, Tag, align_pool_activity,
    reconcile_dataset,
};

use crate::pipeline::fetch::RawFeeds;

/// Reconciled datasets ready for persistence.
#[derive(Debug, Default)]
pub struct Reconciled {
    /// Staking APY, at most one entity.
    pub staking: Dataset,
    /// Token prices tagged with their uppercase symbol.
    pub prices: Dataset,
    /// Pool activity enriched with TVL and address, or empty on misalignment.
    pub activity: Dataset,
}

/// Run every category through the reconcile stage and join activity to TVL.
pub fn reconcile_feeds<R: Rng>(
    feeds: RawFeeds,
    catalog: &EntityCatalog,
    params: &ReconcileParams,
    rng: &mut R,
) -> Reconciled {
    let RawFeeds {
        yields,
        prices,
        activity,
    } = feeds;

    let (staking_raw, tvl_raw) = split_staking(yields.payloads, catalog);
    let staking = reconcile_dataset(&staking_raw, &ExtractionSpec::staking_apy(), params, rng);
    let tvl = reconcile_dataset(&tvl_raw, &ExtractionSpec::tvl(), params, rng);

    let mut prices = reconcile_dataset(&prices.payloads, &ExtractionSpec::token_price(), params, rng);
    attach_symbols(&mut prices, catalog);

    let activity = reconcile_dataset(
        &activity.payloads,
        &ExtractionSpec::pool_activity(),
        params,
        rng,
    );
    let activity = align_pool_activity(&tvl, activity, &catalog.pool_addresses());

    Reconciled {
        staking,
        prices,
        activity,
    }
}

/// Separate the staking entity's payload from pool TVL payloads.
fn split_staking(mut yields: RawPayload, catalog: &EntityCatalog) -> (RawPayload, RawPayload) {
    let mut staking = RawPayload::new();
    if let Some(entry) = &catalog.staking
        && let Some(raw) = yields.remove(&entry.name)
    {
        staking.insert(entry.name.clone(), raw);
    }
    (staking, yields)
}

/// Tag every price record with its token's uppercase symbol.
pub fn attach_symbols(prices: &mut Dataset, catalog: &EntityCatalog) {
    for (entity, series) in prices.iter_mut() {
        let Some(token) = catalog.tokens.get(entity) else {
            tracing::warn!(entity = %entity, "price series for unknown token; leaving untagged");
            continue;
        };
        let symbol = token.symbol.to_uppercase();
        for r in series.iter_mut() {
            r.tags.insert(Tag::TokenSymbol, symbol.clone());
        }
    }
}
