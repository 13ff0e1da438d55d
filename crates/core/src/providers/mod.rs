pub mod traits;

// API provider implementations
pub mod exchange_rates_api;
