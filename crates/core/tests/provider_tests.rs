// ═══════════════════════════════════════════════════════════════════
// Provider Tests — RateProvider pair lookup, ExchangeRatesApiProvider
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use pocket_exchange_core::errors::CoreError;
use pocket_exchange_core::models::rates::RatesTable;
use pocket_exchange_core::models::settings::Settings;
use pocket_exchange_core::providers::exchange_rates_api::{
    parse_rates_response, ExchangeRatesApiProvider,
};
use pocket_exchange_core::providers::traits::RateProvider;

// ═══════════════════════════════════════════════════════════════════
// Test Helpers — Mock Providers
// ═══════════════════════════════════════════════════════════════════

/// Serves fixed tables keyed by base code and counts requests.
struct MockProvider {
    tables: HashMap<String, HashMap<String, f64>>,
    calls: AtomicUsize,
}

impl MockProvider {
    fn new() -> Self {
        let mut gbp = HashMap::new();
        gbp.insert("EUR".to_string(), 1.1717);
        gbp.insert("USD".to_string(), 1.2497);
        gbp.insert("XXX".to_string(), 0.0);

        let mut tables = HashMap::new();
        tables.insert("GBP".to_string(), gbp);
        Self {
            tables,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RateProvider for MockProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn get_rates_by_base(&self, base: &str) -> Result<RatesTable, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rates = self.tables.get(base).cloned().ok_or_else(|| CoreError::Api {
            provider: "Mock".into(),
            message: format!("unknown base {base}"),
        })?;
        Ok(RatesTable {
            base: base.to_string(),
            rates,
            date: None,
        })
    }
}

/// A provider whose transport always fails.
struct OfflineProvider;

#[async_trait]
impl RateProvider for OfflineProvider {
    fn name(&self) -> &str {
        "Offline"
    }

    async fn get_rates_by_base(&self, _base: &str) -> Result<RatesTable, CoreError> {
        Err(CoreError::Network("offline".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// RateProvider — get_rate_by_currency_pair
// ═══════════════════════════════════════════════════════════════════

mod pair_lookup {
    use super::*;

    #[tokio::test]
    async fn extracts_quote_from_base_table() {
        let provider = MockProvider::new();
        let rate = provider.get_rate_by_currency_pair("GBPEUR").await.unwrap();
        assert_eq!(rate, 1.1717);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pair_code_is_case_insensitive() {
        let provider = MockProvider::new();
        let rate = provider.get_rate_by_currency_pair("gbpusd").await.unwrap();
        assert_eq!(rate, 1.2497);
    }

    #[tokio::test]
    async fn same_currency_is_one_without_request() {
        let provider = MockProvider::new();
        let rate = provider.get_rate_by_currency_pair("EUREUR").await.unwrap();
        assert_eq!(rate, 1.0);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wrong_length_is_invalid_pair() {
        let provider = MockProvider::new();
        let err = provider.get_rate_by_currency_pair("GBPEU").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidPair(ref code) if code == "GBPEU"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_quote_is_rate_not_available() {
        let provider = MockProvider::new();
        let err = provider.get_rate_by_currency_pair("GBPJPY").await.unwrap_err();
        assert!(matches!(
            err,
            CoreError::RateNotAvailable { ref base, ref quote } if base == "GBP" && quote == "JPY"
        ));
    }

    #[tokio::test]
    async fn non_positive_rate_is_rejected() {
        let provider = MockProvider::new();
        let err = provider.get_rate_by_currency_pair("GBPXXX").await.unwrap_err();
        assert!(matches!(err, CoreError::Api { ref provider, .. } if provider == "Mock"));
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let err = OfflineProvider
            .get_rate_by_currency_pair("GBPEUR")
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// ExchangeRatesApiProvider
// ═══════════════════════════════════════════════════════════════════

mod exchange_rates_api {
    use super::*;

    #[test]
    fn name() {
        assert_eq!(ExchangeRatesApiProvider::new().name(), "ExchangeRatesAPI");
    }

    #[test]
    fn default_url_queries_base() {
        let provider = ExchangeRatesApiProvider::default();
        assert_eq!(
            provider.rates_url("gbp"),
            "https://api.exchangeratesapi.io/latest?base=GBP"
        );
    }

    #[test]
    fn url_comes_from_settings() {
        let settings = Settings {
            rates_url: "https://api.frankfurter.dev/v1/latest".into(),
            ..Settings::default()
        };
        let provider = ExchangeRatesApiProvider::with_settings(&settings);
        assert_eq!(
            provider.rates_url("EUR"),
            "https://api.frankfurter.dev/v1/latest?base=EUR"
        );
    }

    #[test]
    fn parses_full_response() {
        let table = parse_rates_response(
            r#"{"base":"EUR","rates":{"GBP":0.8534,"USD":1.0843},"date":"2020-05-01"}"#,
        )
        .unwrap();
        assert_eq!(table.base, "EUR");
        assert_eq!(table.rate_for("GBP"), Some(0.8534));
        assert_eq!(table.rates.len(), 2);
        assert!(table.published_on().is_some());
    }

    #[test]
    fn any_date_format_is_accepted() {
        let table = parse_rates_response(
            r#"{"base":"GBP","rates":{"EUR":1.17},"date":"2020-05-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(table.rate_for("EUR"), Some(1.17));
        assert_eq!(table.date.as_deref(), Some("2020-05-01T00:00:00Z"));

        let table =
            parse_rates_response(r#"{"base":"GBP","rates":{"EUR":1.17},"date":"05/01/2020"}"#)
                .unwrap();
        assert_eq!(table.rate_for("EUR"), Some(1.17));
    }

    #[test]
    fn parses_response_without_date() {
        let table = parse_rates_response(r#"{"base":"USD","rates":{"EUR":0.9216}}"#).unwrap();
        assert_eq!(table.rate_for("EUR"), Some(0.9216));
        assert_eq!(table.date, None);
    }

    #[test]
    fn malformed_body_is_api_error() {
        let err = parse_rates_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, CoreError::Api { ref provider, .. } if provider == "ExchangeRatesAPI"));
    }

    #[test]
    fn error_body_without_rates_is_api_error() {
        let err = parse_rates_response(r#"{"error":"Base 'XYZ' is not supported."}"#).unwrap_err();
        assert!(err.to_string().starts_with("API error (ExchangeRatesAPI)"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let settings = Settings {
            rates_url: "http://127.0.0.1:9/latest".into(),
            request_timeout_secs: 2,
            ..Settings::default()
        };
        let provider = ExchangeRatesApiProvider::with_settings(&settings);
        let err = provider.get_rates_by_base("GBP").await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
        assert!(!err.to_string().contains("base=GBP"));
    }
}
