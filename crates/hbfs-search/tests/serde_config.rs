#![cfg(feature = "serde")]

use hbfs_search::{SearchConfig, StateDigest};

#[test]
fn partial_config_fills_defaults() {
    let config: SearchConfig =
        serde_json::from_str(r#"{ "max_frontier_len": 500, "weights": { "depth": 2.0 } }"#).expect("deserialize");
    assert_eq!(config.max_frontier_len, 500);
    assert_eq!(config.carry_over_len, SearchConfig::default().carry_over_len);
    assert_eq!(config.weights.depth, 2.0);
    assert_eq!(config.weights.load, -2.0);
    assert!(config.validate().is_ok());
}

#[test]
fn digest_serializes_as_a_number() {
    let value = serde_json::to_value(StateDigest(42)).expect("serialize");
    assert_eq!(value, serde_json::json!(42));
}
