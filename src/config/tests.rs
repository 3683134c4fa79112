use super::{ConfigError, EngineConfig, BACKEND_URL, CURRENCY, INITIAL_BALANCE, SCAN_DURATION_MS, SCAN_STEP, SCAN_TICK_MS, SEED, SUCCESS_RATE};
use crate::scanner::ScanDecider;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

fn from_pairs(pairs: &[(&str, &str)]) -> Result<EngineConfig, ConfigError> {
    let values: HashMap<String, String> = pairs.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    EngineConfig::from_lookup(|key| values.get(key).cloned())
}

#[test]
fn test_defaults_match_demo_constants() -> Result<()> {
    let config = from_pairs(&[])?;

    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.scan_timing.tick, Duration::from_millis(120));
    assert_eq!(config.scan_timing.step, 5);
    assert_eq!(config.scan_timing.duration, Duration::from_millis(2400));
    assert_eq!(config.scan_timing.report_delay, Duration::from_millis(1000));
    assert_eq!(config.success_rate, 0.9);
    assert_eq!(config.initial_balance, Decimal::from_str("2584.23")?);
    assert_eq!(config.currency, "INR");
    assert!(config.backend_url.is_none());

    Ok(())
}

#[test]
fn test_overrides_are_applied() -> Result<()> {
    let config = from_pairs(&[
        (SCAN_TICK_MS, "10"),
        (SCAN_STEP, "50"),
        (SCAN_DURATION_MS, " 20 "),
        (SUCCESS_RATE, "1"),
        (SEED, "7"),
        (INITIAL_BALANCE, "100.50"),
        (CURRENCY, "usd"),
        (BACKEND_URL, "http://localhost:5000/api/biometric")
    ])?;

    assert_eq!(config.scan_timing.tick, Duration::from_millis(10));
    assert_eq!(config.scan_timing.step, 50);
    assert_eq!(config.scan_timing.duration, Duration::from_millis(20));
    assert_eq!(config.success_rate, 1.0);
    assert_eq!(config.seed, Some(7));
    assert_eq!(config.initial_balance, Decimal::from_str("100.50")?);
    assert_eq!(config.currency, "USD");
    assert_eq!(config.backend_url.as_deref(), Some("http://localhost:5000/api/biometric"));
    assert!(config.decider().decide());

    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() {
    assert!(matches!(from_pairs(&[(SCAN_TICK_MS, "fast")]), Err(ConfigError::Invalid { .. })));
    assert!(matches!(from_pairs(&[(SCAN_TICK_MS, "0")]), Err(ConfigError::Invalid { .. })));
    assert!(matches!(from_pairs(&[(SCAN_STEP, "0")]), Err(ConfigError::Invalid { .. })));
    assert!(matches!(from_pairs(&[(SUCCESS_RATE, "1.5")]), Err(ConfigError::Invalid { .. })));
    assert!(matches!(from_pairs(&[(CURRENCY, "RUPEE")]), Err(ConfigError::Invalid { .. })));
    assert!(matches!(from_pairs(&[(INITIAL_BALANCE, "lots")]), Err(ConfigError::Invalid { .. })));
}

#[test]
fn test_blank_backend_url_means_simulation() -> Result<()> {
    let config = from_pairs(&[(BACKEND_URL, "  ")])?;

    assert!(config.backend_url.is_none());

    Ok(())
}

#[test]
fn test_amount_formatting_uses_currency_symbol() -> Result<()> {
    let mut config = EngineConfig::default();

    assert_eq!(config.format_amount(Decimal::from_str("2538.24")?), "₹2538.24");
    assert_eq!(config.format_amount(Decimal::from_str("-5")?), "-₹5.00");

    config.currency = "JPY".to_string();

    assert_eq!(config.format_amount(Decimal::from_str("12.5")?), "JPY 12.50");

    Ok(())
}
