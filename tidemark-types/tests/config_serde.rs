use std::time::Duration;

use tidemark_types::{EntityCatalog, GapFillConfig, ScheduleConfig, TidemarkConfig};

#[test]
fn catalog_loads_from_json() {
    let json = r#"{
        "staking": { "name": "eth-staking", "yield_key": "747c1d2a-c668-4682-b9f9-296708a3dd90" },
        "pools": {
            "usdc-eth": {
                "yield_key": "665dc8bc-c79d-4800-97f7-304bf368e547",
                "address": "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640"
            }
        },
        "tokens": {
            "ethereum": { "price_key": "ethereum", "symbol": "eth" }
        }
    }"#;

    let catalog: EntityCatalog = serde_json::from_str(json).expect("catalog json");
    let staking = catalog.staking.as_ref().expect("staking entry");
    assert_eq!(staking.name, "eth-staking");
    assert_eq!(catalog.pools.len(), 1);
    assert_eq!(
        catalog.pool_addresses().get("usdc-eth").map(String::as_str),
        Some("0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640")
    );
    assert_eq!(catalog.tokens["ethereum"].symbol, "eth");
    assert!(!catalog.is_empty());
}

#[test]
fn empty_catalog_object_is_empty() {
    let catalog: EntityCatalog = serde_json::from_str("{}").expect("empty catalog");
    assert!(catalog.is_empty());
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let cfg: TidemarkConfig = serde_json::from_str(r#"{ "window_len": 30 }"#).expect("config");
    assert_eq!(cfg.window_len, 30);
    assert_eq!(cfg.gap_fill, GapFillConfig::default());
    assert_eq!(cfg.fetch_timeout, None);
    assert_eq!(cfg.rng_seed, None);
}

#[test]
fn default_config_matches_reference_window() {
    let cfg = TidemarkConfig::default();
    assert_eq!(cfg.window_len, 365);
    assert_eq!(cfg.gap_fill.search_days, 7);
    assert_eq!(cfg.gap_fill.neighbors_per_side, 2);
}

#[test]
fn schedule_config_roundtrip() {
    let sched = ScheduleConfig {
        interval: Duration::from_secs(3600),
        run_on_startup: false,
    };
    let json = serde_json::to_string(&sched).expect("serialize");
    let de: ScheduleConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(de, sched);
}
