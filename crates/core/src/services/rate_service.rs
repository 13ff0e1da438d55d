use crate::models::screen::AmountSide;

/// Decimals shown for amounts in the exchange fields.
pub const DEFAULT_DECIMALS: usize = 2;

/// Decimals shown for the rate itself (e.g., "£1 = €1.1717").
pub const BADGE_DECIMALS: usize = 4;

/// Rate arithmetic and rate/amount display.
///
/// Pure functions over `f64`. The calculator never rounds; only
/// `rate_display` shortens numbers, and it truncates instead of rounding.
pub struct RateService;

impl RateService {
    pub fn new() -> Self {
        Self
    }

    /// Render a rate (or amount) truncated to `decimals` places.
    ///
    /// Zero and whole numbers are shown without a decimal point. Everything
    /// else is formatted with one extra digit which is then dropped, so
    /// 123.456789 at 2 decimals is "123.45", not "123.46".
    pub fn rate_display(&self, rate: f64, decimals: usize) -> String {
        if !rate.is_finite() {
            return rate.to_string();
        }
        if rate == 0.0 {
            return "0".to_string();
        }
        if rate.fract() == 0.0 {
            return format!("{rate}");
        }

        let mut display = format!("{:.*}", decimals + 1, rate);
        display.pop();
        display
    }

    /// Convert `amount` with a quote-per-base `rate`.
    ///
    /// `from` is the side the amount is expressed in: `Base` multiplies,
    /// `Quote` divides. A zero rate in the `Quote` direction yields inf/NaN,
    /// so callers check the rate is loaded first.
    pub fn calculate_exchange_amount(&self, amount: f64, rate: f64, from: AmountSide) -> f64 {
        match from {
            AmountSide::Base => amount * rate,
            AmountSide::Quote => amount / rate,
        }
    }
}

impl Default for RateService {
    fn default() -> Self {
        Self::new()
    }
}
