use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::models::currency::CurrencyPair;
use crate::providers::traits::RateProvider;

/// Shortest accepted poll period; `tokio::time::interval` rejects zero.
const MIN_POLL_PERIOD: Duration = Duration::from_millis(1);

/// Background refresh of the rate for one currency pair.
///
/// The task fetches immediately, then once per period. Only one request is
/// ever in flight: a fetch still pending when the next tick comes due is
/// dropped and replaced by a fresh one. Dropping the poller aborts the task,
/// and with it any request still in flight, so a late answer can never reach
/// `on_rate`.
pub struct RatePoller {
    pair: CurrencyPair,
    handle: JoinHandle<()>,
    first_fetch: Option<oneshot::Receiver<()>>,
}

impl RatePoller {
    /// Start polling `pair`. `on_rate` runs on the poller task for every
    /// successful fetch; failures are logged and skipped.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F>(
        provider: Arc<dyn RateProvider>,
        pair: CurrencyPair,
        period: Duration,
        on_rate: F,
    ) -> Self
    where
        F: Fn(f64) + Send + 'static,
    {
        let (first_tx, first_rx) = oneshot::channel();
        let period = period.max(MIN_POLL_PERIOD);

        let handle = tokio::spawn(async move {
            let code = pair.code();
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut first_tx = Some(first_tx);

            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                let superseded = tokio::select! {
                    result = provider.get_rate_by_currency_pair(&code) => {
                        match result {
                            Ok(rate) => {
                                log::debug!("{} rate for {code}: {rate}", provider.name());
                                on_rate(rate);
                            }
                            Err(e) => {
                                log::error!("Failed to fetch {code} rate from {}: {e}", provider.name());
                            }
                        }
                        false
                    }
                    _ = ticker.tick() => {
                        log::debug!("{code} fetch still pending at next tick, cancelling it");
                        true
                    }
                };
                if let Some(tx) = first_tx.take() {
                    // Nobody waiting is fine.
                    let _ = tx.send(());
                }
                if !superseded {
                    ticker.tick().await;
                }
            }
        });

        Self {
            pair,
            handle,
            first_fetch: Some(first_rx),
        }
    }

    /// Wait until the first fetch attempt has finished, whether it succeeded,
    /// failed or was replaced by the next tick.
    /// Returns immediately on every later call.
    pub async fn first_fetch(&mut self) {
        if let Some(rx) = self.first_fetch.take() {
            let _ = rx.await;
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stop polling and cancel the request in flight, if any.
    pub fn stop(self) {
        log::debug!("Stopping rate poller for {}", self.pair);
        self.handle.abort();
    }
}

impl Drop for RatePoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
