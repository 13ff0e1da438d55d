pub mod amount_service;
pub mod display_service;
pub mod ledger_service;
pub mod rate_poller;
pub mod rate_service;
