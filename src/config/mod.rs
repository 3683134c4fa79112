mod errors;
#[cfg(test)]
mod tests;

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;

use crate::scanner::{RandomDecider, ScanTiming};

pub use errors::ConfigError;

pub const SCAN_TICK_MS: &str = "BIOPAY_SCAN_TICK_MS";
pub const SCAN_STEP: &str = "BIOPAY_SCAN_STEP";
pub const SCAN_DURATION_MS: &str = "BIOPAY_SCAN_DURATION_MS";
pub const SCAN_REPORT_DELAY_MS: &str = "BIOPAY_SCAN_REPORT_DELAY_MS";
pub const SUCCESS_RATE: &str = "BIOPAY_SUCCESS_RATE";
pub const SEED: &str = "BIOPAY_SEED";
pub const AUTH_DELAY_MS: &str = "BIOPAY_AUTH_DELAY_MS";
pub const REDIRECT_DELAY_MS: &str = "BIOPAY_REDIRECT_DELAY_MS";
pub const INITIAL_BALANCE: &str = "BIOPAY_INITIAL_BALANCE";
pub const CURRENCY: &str = "BIOPAY_CURRENCY";
pub const BACKEND_URL: &str = "BIOPAY_BACKEND_URL";
pub const TOKEN_TTL_SECS: &str = "BIOPAY_TOKEN_TTL_SECS";

/// Runtime settings. Defaults reproduce the demo's fixed timers and odds.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub scan_timing: ScanTiming,
    /// Probability that a simulated scan succeeds.
    pub success_rate: f64,
    /// Seed for the scan outcome generator; random when absent.
    pub seed: Option<u64>,
    /// How long the simulated backend takes to authenticate.
    pub auth_delay: Duration,
    /// Wait before redirecting to the dashboard after an approved payment.
    pub redirect_delay: Duration,
    pub initial_balance: Decimal,
    /// ISO code used when formatting amounts.
    pub currency: String,
    pub backend_url: Option<String>,
    pub token_ttl: Duration
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scan_timing: ScanTiming::default(),
            success_rate: 0.9,
            seed: None,
            auth_delay: Duration::from_millis(2000),
            redirect_delay: Duration::from_millis(5000),
            initial_balance: Decimal::new(258423, 2),
            currency: "INR".to_string(),
            backend_url: None,
            token_ttl: Duration::from_secs(15 * 60)
        }
    }
}

impl EngineConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns for each `BIOPAY_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(tick) = parse::<u64, _>(&lookup, SCAN_TICK_MS)? {
            if tick == 0 {
                return Err(ConfigError::invalid(SCAN_TICK_MS, "0", "must be greater than 0"));
            }
            config.scan_timing.tick = Duration::from_millis(tick);
        }

        if let Some(step) = parse::<u8, _>(&lookup, SCAN_STEP)? {
            if step == 0 || step > 100 {
                return Err(ConfigError::invalid(SCAN_STEP, &step.to_string(), "must be between 1 and 100"));
            }
            config.scan_timing.step = step;
        }

        if let Some(duration) = parse::<u64, _>(&lookup, SCAN_DURATION_MS)? {
            config.scan_timing.duration = Duration::from_millis(duration);
        }

        if let Some(delay) = parse::<u64, _>(&lookup, SCAN_REPORT_DELAY_MS)? {
            config.scan_timing.report_delay = Duration::from_millis(delay);
        }

        if let Some(rate) = parse::<f64, _>(&lookup, SUCCESS_RATE)? {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::invalid(SUCCESS_RATE, &rate.to_string(), "must be between 0 and 1"));
            }
            config.success_rate = rate;
        }

        config.seed = parse::<u64, _>(&lookup, SEED)?;

        if let Some(delay) = parse::<u64, _>(&lookup, AUTH_DELAY_MS)? {
            config.auth_delay = Duration::from_millis(delay);
        }

        if let Some(delay) = parse::<u64, _>(&lookup, REDIRECT_DELAY_MS)? {
            config.redirect_delay = Duration::from_millis(delay);
        }

        if let Some(balance) = parse::<Decimal, _>(&lookup, INITIAL_BALANCE)? {
            config.initial_balance = balance;
        }

        if let Some(currency) = lookup(CURRENCY).map(|value| value.trim().to_uppercase()) {
            if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ConfigError::invalid(CURRENCY, &currency, "must be a three letter currency code"));
            }
            config.currency = currency;
        }

        config.backend_url = lookup(BACKEND_URL)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        if let Some(ttl) = parse::<u64, _>(&lookup, TOKEN_TTL_SECS)? {
            config.token_ttl = Duration::from_secs(ttl);
        }

        Ok(config)
    }

    /// The scan outcome generator these settings describe.
    pub fn decider(&self) -> RandomDecider {
        match self.seed {
            Some(seed) => RandomDecider::seeded(self.success_rate, seed),
            None => RandomDecider::new(self.success_rate)
        }
    }

    /// Formats a value with the configured currency's symbol and two decimals.
    pub fn format_amount(&self, value: Decimal) -> String {
        let symbol = match self.currency.as_str() {
            "INR" => "₹",
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            _ => ""
        };

        let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
        let magnitude = value.abs().round_dp(2);

        if symbol.is_empty() {
            format!("{sign}{} {magnitude:.2}", self.currency)
        } else {
            format!("{sign}{symbol}{magnitude:.2}")
        }
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::invalid(key, &raw, "could not be parsed")),
        None => Ok(None)
    }
}
