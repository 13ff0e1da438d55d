use crate::models::currency::Currency;
use crate::models::pocket::Pocket;
use crate::models::rates::RATE_NOT_LOADED;
use super::rate_service::{RateService, BADGE_DECIMALS};

/// Text shown while the first rate is still loading.
pub const RATE_PLACEHOLDER: &str = "...";

/// Builds the user-facing strings of the exchange screen.
pub struct DisplayService {
    rates: RateService,
}

impl DisplayService {
    pub fn new() -> Self {
        Self {
            rates: RateService::new(),
        }
    }

    /// The rate badge between both fields, e.g. "£1 = €1.1717".
    pub fn rate_badge(&self, base: Currency, quote: Currency, rate: f64) -> String {
        if rate == RATE_NOT_LOADED {
            return RATE_PLACEHOLDER.to_string();
        }
        format!(
            "{}1 = {}{}",
            base.symbol(),
            quote.symbol(),
            self.rates.rate_display(rate, BADGE_DECIMALS)
        )
    }

    /// Balance line of a pocket, e.g. "Balance: £89.22".
    pub fn pocket_label(&self, pocket: &Pocket) -> String {
        format!("Balance: {}{}", pocket.currency.symbol(), pocket.balance)
    }
}

impl Default for DisplayService {
    fn default() -> Self {
        Self::new()
    }
}
