use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel rate meaning "no rate has been loaded yet".
pub const RATE_NOT_LOADED: f64 = 0.0;

/// All rates quoted against one base currency, as returned by the rates endpoint.
///
/// Keys are raw ISO codes: the service quotes many more currencies than
/// there are pockets, so they are not narrowed to `Currency` here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
    /// Publication date of the rates, as the service reports it.
    #[serde(default)]
    pub date: Option<String>,
}

impl RatesTable {
    /// Quote-per-one-base rate for `quote`, if the table has it.
    pub fn rate_for(&self, quote: &str) -> Option<f64> {
        self.rates.get(&quote.to_uppercase()).copied()
    }

    /// The publication date as a calendar day. Accepts `2020-05-01` and
    /// RFC 3339 timestamps; anything else is `None`.
    pub fn published_on(&self) -> Option<NaiveDate> {
        let date = self.date.as_deref()?.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
    }
}
