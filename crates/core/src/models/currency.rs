use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// A currency that can hold a pocket.
///
/// The set is closed; everything else about a currency (ISO code, symbol,
/// display name) lives in [`CURRENCY_TABLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Gbp,
    Usd,
}

/// One row of the currency configuration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyInfo {
    pub currency: Currency,
    /// ISO 4217 code, uppercase (e.g., "GBP")
    pub code: &'static str,
    /// Display glyph (e.g., "£")
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Every supported currency, one row per `Currency` variant in declaration
/// order. Adding a currency means adding a variant above and a row here.
pub const CURRENCY_TABLE: &[CurrencyInfo] = &[
    CurrencyInfo {
        currency: Currency::Eur,
        code: "EUR",
        symbol: "€",
        name: "Euro",
    },
    CurrencyInfo {
        currency: Currency::Gbp,
        code: "GBP",
        symbol: "£",
        name: "British Pound",
    },
    CurrencyInfo {
        currency: Currency::Usd,
        code: "USD",
        symbol: "$",
        name: "US Dollar",
    },
];

impl Currency {
    /// All supported currencies, in table order.
    pub fn all() -> impl Iterator<Item = Currency> {
        CURRENCY_TABLE.iter().map(|info| info.currency)
    }

    pub fn info(self) -> &'static CurrencyInfo {
        &CURRENCY_TABLE[self as usize]
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    /// Case-insensitive lookup by ISO code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_uppercase();
        CURRENCY_TABLE
            .iter()
            .find(|info| info.code == code)
            .map(|info| info.currency)
            .ok_or_else(|| CoreError::InvalidCurrency(s.to_string()))
    }
}

/// A directed pair of currencies: `base` is converted into `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: Currency,
    pub quote: Currency,
}

impl CurrencyPair {
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// The 6-character pair code, e.g. "GBPUSD".
    pub fn code(&self) -> String {
        format!("{}{}", self.base.code(), self.quote.code())
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = CoreError;

    /// Parse a 6-character pair code; first three characters are the base.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) =
            split_pair_code(s).ok_or_else(|| CoreError::InvalidPair(s.to_string()))?;
        let base = base
            .parse()
            .map_err(|_| CoreError::InvalidPair(s.to_string()))?;
        let quote = quote
            .parse()
            .map_err(|_| CoreError::InvalidPair(s.to_string()))?;
        Ok(Self::new(base, quote))
    }
}

/// Split a pair code into its base and quote halves without interpreting
/// them. Returns `None` unless the code is exactly 6 ASCII characters.
pub fn split_pair_code(code: &str) -> Option<(&str, &str)> {
    if code.len() != 6 || !code.is_ascii() {
        return None;
    }
    Some(code.split_at(3))
}
