use serde::{Deserialize, Serialize};

use super::currency::{Currency, CurrencyPair};
use super::pocket::Pocket;
use super::rates::RATE_NOT_LOADED;

/// Which amount field the user is typing into.
///
/// Typing into `Base` converts base → quote; typing into `Quote` converts
/// quote → base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountSide {
    Base,
    Quote,
}

impl AmountSide {
    pub fn opposite(self) -> Self {
        match self {
            AmountSide::Base => AmountSide::Quote,
            AmountSide::Quote => AmountSide::Base,
        }
    }
}

/// Everything the exchange screen renders.
///
/// `base` and `quote` always differ. An empty amount string means the field
/// is not populated. Whichever amount the user typed last is kept verbatim;
/// the other one is derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenState {
    pub pockets: Vec<Pocket>,
    pub base: Currency,
    pub quote: Currency,
    /// Quote units per one base unit; `RATE_NOT_LOADED` until the first fetch succeeds.
    pub rate: f64,
    pub base_amount: String,
    pub quote_amount: String,
}

impl ScreenState {
    pub fn new(pockets: Vec<Pocket>, base: Currency, quote: Currency) -> Self {
        Self {
            pockets,
            base,
            quote,
            rate: RATE_NOT_LOADED,
            base_amount: String::new(),
            quote_amount: String::new(),
        }
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base, self.quote)
    }

    pub fn is_rate_loaded(&self) -> bool {
        self.rate != RATE_NOT_LOADED
    }

    pub fn amount(&self, side: AmountSide) -> &str {
        match side {
            AmountSide::Base => &self.base_amount,
            AmountSide::Quote => &self.quote_amount,
        }
    }

    pub fn amount_mut(&mut self, side: AmountSide) -> &mut String {
        match side {
            AmountSide::Base => &mut self.base_amount,
            AmountSide::Quote => &mut self.quote_amount,
        }
    }

    pub fn clear_amounts(&mut self) {
        self.base_amount.clear();
        self.quote_amount.clear();
    }
}
