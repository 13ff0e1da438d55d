use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// A per-currency balance the user owns.
///
/// There is at most one pocket per currency. Balances only change when an
/// exchange is applied (see `LedgerService::apply_exchange`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub currency: Currency,
    pub balance: f64,
}

impl Pocket {
    pub fn new(currency: Currency, balance: f64) -> Self {
        Self { currency, balance }
    }
}

/// The pockets every new session starts with, in display order.
pub fn default_pockets() -> Vec<Pocket> {
    vec![
        Pocket::new(Currency::Gbp, 89.22),
        Pocket::new(Currency::Eur, 194.83),
        Pocket::new(Currency::Usd, 0.0),
    ]
}
