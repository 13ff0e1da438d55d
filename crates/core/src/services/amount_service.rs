use crate::models::screen::{AmountSide, ScreenState};
use super::rate_service::{RateService, DEFAULT_DECIMALS};

/// Most digits accepted after the decimal point of a typed amount.
pub const MAX_INPUT_DECIMALS: usize = 2;

/// Keeps the two amount fields of the screen consistent.
///
/// Typed text is sanitized and stored verbatim; the opposite field is always
/// derived from it through the current rate.
pub struct AmountService {
    rates: RateService,
}

impl AmountService {
    pub fn new() -> Self {
        Self {
            rates: RateService::new(),
        }
    }

    /// Reduce typed text to its longest valid prefix.
    ///
    /// Characters are dropped from the end, one at a time, until the text
    /// parses as a finite number with at most `MAX_INPUT_DECIMALS` decimals.
    /// Returns `None` if nothing valid is left. Empty text is a valid zero.
    pub fn sanitize(&self, text: &str) -> Option<(String, f64)> {
        let mut input = text.to_string();
        loop {
            if let Some(amount) = parse_amount(&input) {
                if decimal_places(amount) <= MAX_INPUT_DECIMALS {
                    return Some((input, amount));
                }
            }
            input.pop();
            if input.is_empty() {
                return None;
            }
        }
    }

    /// Handle text typed into `side`.
    ///
    /// On success the typed field holds the sanitized text and the opposite
    /// field the converted amount (empty while no rate is loaded). Returns
    /// `false` and leaves `state` untouched if the text has no valid prefix.
    pub fn reconcile_input(&self, state: &mut ScreenState, side: AmountSide, text: &str) -> bool {
        let Some((typed, amount)) = self.sanitize(text) else {
            log::debug!("Rejected {side:?} amount input {text:?}");
            return false;
        };

        let derived = if state.is_rate_loaded() {
            let exchanged = self
                .rates
                .calculate_exchange_amount(amount, state.rate, side);
            self.rates.rate_display(exchanged, DEFAULT_DECIMALS)
        } else {
            String::new()
        };

        *state.amount_mut(side) = typed;
        *state.amount_mut(side.opposite()) = derived;
        true
    }

    /// Store a freshly fetched rate and re-derive the quote amount from the
    /// pending base amount. Without a base amount the quote field is cleared.
    pub fn apply_rate(&self, state: &mut ScreenState, rate: f64) {
        state.rate = rate;
        let pending = match state.amount(AmountSide::Base) {
            "" => None,
            text => parse_amount(text),
        };
        *state.amount_mut(AmountSide::Quote) = match pending {
            Some(amount) => {
                let exchanged = self
                    .rates
                    .calculate_exchange_amount(amount, rate, AmountSide::Base);
                self.rates.rate_display(exchanged, DEFAULT_DECIMALS)
            }
            None => String::new(),
        };
    }
}

impl Default for AmountService {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric value of an amount field. Blank text counts as zero; NaN and
/// infinities are rejected.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Digits after the decimal point in the shortest representation of `value`.
fn decimal_places(value: f64) -> usize {
    // f64's Display never switches to exponent notation.
    let repr = value.abs().to_string();
    repr.split_once('.').map_or(0, |(_, frac)| frac.len())
}
