use async_trait::async_trait;
use reqwest::Client;

use crate::errors::CoreError;
use crate::models::rates::RatesTable;
use crate::models::settings::Settings;
use super::traits::RateProvider;

const PROVIDER_NAME: &str = "ExchangeRatesAPI";

/// Public rates service speaking the `exchangeratesapi.io` protocol.
///
/// - **Request**: `GET <rates_url>?base=<CODE>`, no API key.
/// - **Response**: `{ "base": "GBP", "rates": { "EUR": 1.1717, ... }, "date": "2020-05-01" }`
///   (`date` is optional).
///
/// Frankfurter and other ECB mirrors answer the same request shape, so any
/// of them can be configured through `Settings::rates_url`.
pub struct ExchangeRatesApiProvider {
    client: Client,
    rates_url: String,
}

impl ExchangeRatesApiProvider {
    /// Provider for the default endpoint and timeout.
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        let client = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to a default HTTP client: {e}");
                Client::new()
            });
        Self {
            client,
            rates_url: settings.rates_url.trim_end_matches('?').to_string(),
        }
    }

    /// Full request URL for the rates of `base`.
    pub fn rates_url(&self, base: &str) -> String {
        format!("{}?base={}", self.rates_url, base.to_uppercase())
    }
}

impl Default for ExchangeRatesApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a response body of the rates endpoint.
pub fn parse_rates_response(body: &str) -> Result<RatesTable, CoreError> {
    serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER_NAME.into(),
        message: format!("Failed to parse rates response: {e}"),
    })
}

#[async_trait]
impl RateProvider for ExchangeRatesApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn get_rates_by_base(&self, base: &str) -> Result<RatesTable, CoreError> {
        let url = self.rates_url(base);
        log::debug!("Fetching rates for {}", base.to_uppercase());

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_rates_response(&body)
    }
}
