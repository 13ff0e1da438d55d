use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::currency::split_pair_code;
use crate::models::rates::RatesTable;

/// Trait abstraction for exchange-rate sources.
///
/// The screen only talks to this trait, so the public rates service can be
/// swapped for another API (or a fixed table in tests) without touching it.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch every rate quoted against `base` (an ISO code).
    async fn get_rates_by_base(&self, base: &str) -> Result<RatesTable, CoreError>;

    /// Rate for a 6-character pair code such as "GBPUSD": how many units of
    /// the last three letters one unit of the first three buys.
    async fn get_rate_by_currency_pair(&self, pair_code: &str) -> Result<f64, CoreError> {
        let (base, quote) = split_pair_code(pair_code)
            .ok_or_else(|| CoreError::InvalidPair(pair_code.to_string()))?;
        let base = base.to_uppercase();
        let quote = quote.to_uppercase();

        // Same currency → rate is 1.0
        if base == quote {
            return Ok(1.0);
        }

        let table = self.get_rates_by_base(&base).await?;
        if let Some(published) = table.published_on() {
            log::debug!("{} rates for {base} published on {published}", self.name());
        }
        let rate = table
            .rate_for(&quote)
            .ok_or_else(|| CoreError::RateNotAvailable {
                base: base.clone(),
                quote: quote.clone(),
            })?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(CoreError::Api {
                provider: self.name().to_string(),
                message: format!("Invalid rate {rate} for {base} → {quote}"),
            });
        }
        Ok(rate)
    }
}
