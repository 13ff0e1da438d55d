use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::errors::CoreError;
use super::pocket::{default_pockets, Pocket};

/// Default endpoint of the public rates service. Queried as `<url>?base=<CODE>`.
pub const DEFAULT_RATES_URL: &str = "https://api.exchangeratesapi.io/latest";

/// How often the screen refreshes the rate for the selected pair.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration of the exchange screen.
///
/// Every field has a default, so a partial JSON document (or `{}`) is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rates endpoint, without query string.
    pub rates_url: String,

    /// Seconds between two rate refreshes for the selected pair.
    pub poll_interval_secs: u64,

    /// Timeout for a single rate request.
    pub request_timeout_secs: u64,

    /// Seed pockets, in display order. The first two become base and quote.
    pub pockets: Vec<Pocket>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            pockets: default_pockets(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize settings: {e}")))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Reject configurations that cannot run: [`Self::validate_screen`]
    /// plus [`Self::validate_transport`].
    pub fn validate(&self) -> Result<(), CoreError> {
        self.validate_transport()?;
        self.validate_screen()
    }

    /// Check the fields read by the HTTP rates provider.
    pub fn validate_transport(&self) -> Result<(), CoreError> {
        if self.rates_url.trim().is_empty() {
            return Err(CoreError::InvalidSettings("rates_url must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Check the fields read by the exchange screen: poll interval and pockets.
    pub fn validate_screen(&self) -> Result<(), CoreError> {
        if self.poll_interval_secs == 0 {
            return Err(CoreError::InvalidSettings(
                "poll_interval_secs must be greater than zero".into(),
            ));
        }

        let mut seen = HashSet::new();
        for pocket in &self.pockets {
            if !seen.insert(pocket.currency) {
                return Err(CoreError::InvalidSettings(format!(
                    "duplicate pocket for {}",
                    pocket.currency
                )));
            }
            if !pocket.balance.is_finite() || pocket.balance < 0.0 {
                return Err(CoreError::InvalidSettings(format!(
                    "pocket {} has invalid balance {}",
                    pocket.currency, pocket.balance
                )));
            }
        }
        Ok(())
    }
}
