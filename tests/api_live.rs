// Live tests (opt-in): cargo test --features online
#![cfg(feature = "online")]

use eustat_viz::api::fetch_cycle;
use eustat_viz::models::year_window;
use eustat_viz::{DatasetStore, EurostatClient, Indicator};

#[test]
fn live_cycle_returns_all_three_indicators() {
    let client = EurostatClient::default();
    let mut store = DatasetStore::new();
    let n = fetch_cycle(&client, &mut store, &year_window(2022)).expect("eurostat fetch");
    assert!(n > 0);
    for ind in Indicator::ALL {
        assert!(
            !store.query(|r| r.indicator == ind).is_empty(),
            "no records for {ind}"
        );
    }
    assert_eq!(store.country_label("BE"), "Belgium");
}
