mod helpers;

use proptest::prelude::*;
use tidemark::{Category, HistoryRow};
use tidemark_mock::MemoryStore;

use helpers::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn stored_series_never_exceed_window(window in 1usize..16) {
        let store = MemoryStore::new();
        let tidemark = mock_builder(&store).window_len(window).build().expect("valid builder");
        tokio_test::block_on(tidemark.run()).expect("run ok");

        let staking = tokio_test::block_on(store.rows_of(Category::Yield));
        prop_assert_eq!(staking.len(), window.min(MOCK_STAKING_ROWS));
        // Consecutive days, newest fixture day last.
        for pair in staking.windows(2) {
            prop_assert_eq!(pair[1].timestamp() - pair[0].timestamp(), chrono::Duration::days(1));
        }

        let prices = tokio_test::block_on(store.rows_of(Category::Price));
        for symbol in ["BTC", "ETH", "USDC"] {
            let n = prices
                .iter()
                .filter(|r| matches!(r, HistoryRow::Price(p) if p.token_symbol == symbol))
                .count();
            prop_assert!(n <= window);
        }
        let activity = tokio_test::block_on(store.rows_of(Category::PoolActivity));
        prop_assert!(activity.len() <= 2 * window);
    }
}
