//! End-to-end integration tests

use dr_fair_value::config::{Config, LogFormat};

#[test]
fn test_config_example_loads() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert_eq!(config.pricing.tick_decimals, 2);
    assert_eq!(config.pricing.spread.liquidity_tiers.len(), 3);
    assert_eq!(config.calculator.debounce_ms, 2000);
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
    assert!(config.telemetry.tracker_url.is_none());
}

#[test]
fn test_config_example_matches_defaults() {
    let example: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    let defaults = Config::default();
    assert_eq!(example.pricing.spread, defaults.pricing.spread);
    assert_eq!(example.api.snapshot_url, defaults.api.snapshot_url);
    assert_eq!(example.calculator.placeholder, defaults.calculator.placeholder);
}

#[test]
fn test_config_round_trips_through_toml() {
    let rendered = toml::to_string_pretty(&Config::default()).unwrap();
    let parsed: Config = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed.pricing.spread, Config::default().pricing.spread);
}
