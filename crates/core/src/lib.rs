pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use models::{
    currency::Currency,
    pocket::Pocket,
    screen::{AmountSide, ScreenState},
    settings::Settings,
};
use providers::traits::RateProvider;
use services::{
    amount_service::{parse_amount, AmountService},
    display_service::DisplayService,
    ledger_service::LedgerService,
    rate_poller::RatePoller,
};

use errors::CoreError;

/// State shared between the screen and its rate poller.
struct Shared {
    screen: ScreenState,
    /// Bumped on every poller restart. A rate fetched under an older value
    /// belongs to a previous selection and is dropped.
    subscription: u64,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Main entry point for the pocket-exchange core library: one exchange screen.
///
/// Owns the screen state and the background rate poller. The poller runs
/// for as long as the screen is mounted and is restarted on every pair
/// change; dropping the screen (or calling [`ExchangeScreen::unmount`])
/// stops it and cancels any rate request still in flight.
#[must_use]
pub struct ExchangeScreen {
    provider: Arc<dyn RateProvider>,
    settings: Settings,
    shared: Arc<Mutex<Shared>>,
    poller: Option<RatePoller>,
    amount_service: AmountService,
    ledger_service: LedgerService,
    display_service: DisplayService,
}

impl std::fmt::Debug for ExchangeScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = lock(&self.shared);
        f.debug_struct("ExchangeScreen")
            .field("provider", &self.provider.name())
            .field("pair", &shared.screen.pair())
            .field("rate", &shared.screen.rate)
            .field("pockets", &shared.screen.pockets.len())
            .field("polling", &self.is_polling())
            .finish()
    }
}

impl ExchangeScreen {
    /// Mount the screen: seed the pockets, select the first two as base and
    /// quote, and start polling the rate. Only the screen's own settings are
    /// checked here; `rates_url` and the request timeout belong to the
    /// provider. Resolves once the first fetch
    /// attempt has finished; a failed fetch leaves the rate not loaded.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn mount(
        provider: Arc<dyn RateProvider>,
        settings: Settings,
    ) -> Result<Self, CoreError> {
        settings.validate_screen()?;

        let pockets = settings.pockets.clone();
        let (base, quote) = match pockets.as_slice() {
            [first, second, ..] => (first.currency, second.currency),
            _ => return Err(CoreError::NotEnoughPockets(pockets.len())),
        };

        let mut screen = Self {
            provider,
            settings,
            shared: Arc::new(Mutex::new(Shared {
                screen: ScreenState::new(pockets, base, quote),
                subscription: 0,
            })),
            poller: None,
            amount_service: AmountService::new(),
            ledger_service: LedgerService::new(),
            display_service: DisplayService::new(),
        };

        log::info!(
            "Mounting exchange screen for {base}{quote} (rates from {})",
            screen.provider.name()
        );
        screen.restart_polling().await;
        Ok(screen)
    }

    /// Stop polling and cancel any in-flight rate request.
    pub fn unmount(mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
        log::info!("Exchange screen unmounted");
    }

    // ── Rate ────────────────────────────────────────────────────────

    /// Fetch the rate for the current pair now, cancelling any fetch in
    /// flight. The poll period restarts from this fetch.
    pub async fn refresh_rate(&mut self) {
        self.restart_polling().await;
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        lock(&self.shared).screen.rate
    }

    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(RatePoller::is_running)
    }

    // ── Pocket selection ────────────────────────────────────────────

    /// Select the pocket to convert from.
    ///
    /// Picking the current quote currency swaps the quote to the previous
    /// base. Returns `false` (and does nothing) if `currency` is already the
    /// base or has no pocket.
    pub async fn select_base(&mut self, currency: Currency) -> bool {
        self.select(AmountSide::Base, currency).await
    }

    /// Select the pocket to convert into. Mirror image of [`Self::select_base`].
    pub async fn select_quote(&mut self, currency: Currency) -> bool {
        self.select(AmountSide::Quote, currency).await
    }

    #[must_use]
    pub fn base(&self) -> Currency {
        lock(&self.shared).screen.base
    }

    #[must_use]
    pub fn quote(&self) -> Currency {
        lock(&self.shared).screen.quote
    }

    // ── Amounts ─────────────────────────────────────────────────────

    /// Handle text typed into the base or quote amount field.
    ///
    /// Returns `false` if the text has no valid numeric prefix; the fields
    /// then keep their previous values.
    pub fn input_amount(&mut self, side: AmountSide, text: &str) -> bool {
        let mut shared = lock(&self.shared);
        self.amount_service
            .reconcile_input(&mut shared.screen, side, text)
    }

    #[must_use]
    pub fn base_amount(&self) -> String {
        lock(&self.shared).screen.base_amount.clone()
    }

    #[must_use]
    pub fn quote_amount(&self) -> String {
        lock(&self.shared).screen.quote_amount.clone()
    }

    // ── Exchange ────────────────────────────────────────────────────

    /// Whether the exchange action is available: the pending base amount
    /// must not exceed the base pocket's balance.
    #[must_use]
    pub fn can_exchange(&self) -> bool {
        let shared = lock(&self.shared);
        let screen = &shared.screen;
        let amount = parse_amount(&screen.base_amount).unwrap_or(0.0);
        !self
            .ledger_service
            .exceeds_balance(screen.base, &screen.pockets, amount)
    }

    /// Move the pending amounts between the base and quote pockets and clear
    /// both fields. Returns `false` without changes when the action is
    /// unavailable or either amount is empty.
    pub fn exchange(&mut self) -> bool {
        if !self.can_exchange() {
            log::debug!("Exchange unavailable: base amount exceeds balance");
            return false;
        }

        let mut shared = lock(&self.shared);
        let screen = &mut shared.screen;
        if screen.base_amount.is_empty() || screen.quote_amount.is_empty() {
            return false;
        }
        let (Some(base_amount), Some(quote_amount)) = (
            parse_amount(&screen.base_amount),
            parse_amount(&screen.quote_amount),
        ) else {
            return false;
        };

        screen.pockets = self.ledger_service.apply_exchange(
            &screen.pockets,
            screen.base,
            base_amount,
            screen.quote,
            quote_amount,
        );
        screen.clear_amounts();

        log::info!(
            "Exchanged {base_amount} {} for {quote_amount} {}",
            screen.base,
            screen.quote
        );
        true
    }

    // ── Read access ─────────────────────────────────────────────────

    /// A snapshot of everything the screen shows.
    #[must_use]
    pub fn state(&self) -> ScreenState {
        lock(&self.shared).screen.clone()
    }

    #[must_use]
    pub fn pockets(&self) -> Vec<Pocket> {
        lock(&self.shared).screen.pockets.clone()
    }

    /// The rate badge, e.g. "£1 = €1.1717", or "..." before the first rate.
    #[must_use]
    pub fn rate_badge(&self) -> String {
        let shared = lock(&self.shared);
        let screen = &shared.screen;
        self.display_service
            .rate_badge(screen.base, screen.quote, screen.rate)
    }

    /// Balance line for every pocket, in display order.
    #[must_use]
    pub fn pocket_labels(&self) -> Vec<(Currency, String)> {
        lock(&self.shared)
            .screen
            .pockets
            .iter()
            .map(|p| (p.currency, self.display_service.pocket_label(p)))
            .collect()
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn select(&mut self, side: AmountSide, currency: Currency) -> bool {
        {
            let mut shared = lock(&self.shared);
            let screen = &mut shared.screen;

            if self
                .ledger_service
                .find_pocket(currency, &screen.pockets)
                .is_none()
            {
                log::warn!("Ignoring selection of {currency}: no such pocket");
                return false;
            }

            let (current, other) = match side {
                AmountSide::Base => (&mut screen.base, &mut screen.quote),
                AmountSide::Quote => (&mut screen.quote, &mut screen.base),
            };
            if *current == currency {
                return false;
            }
            if *other == currency {
                *other = *current;
            }
            *current = currency;
            log::info!("Selected pair {}", screen.pair());
        }

        self.restart_polling().await;
        true
    }

    /// Replace the poller with a fresh one for the current pair and wait for
    /// its first fetch.
    async fn restart_polling(&mut self) {
        if let Some(old) = self.poller.take() {
            old.stop();
        }

        let (pair, subscription) = {
            let mut shared = lock(&self.shared);
            shared.subscription += 1;
            (shared.screen.pair(), shared.subscription)
        };

        let shared = Arc::clone(&self.shared);
        let on_rate = move |rate: f64| {
            let mut shared = lock(&shared);
            if shared.subscription != subscription {
                log::debug!("Discarding stale {pair} rate {rate}");
                return;
            }
            AmountService::new().apply_rate(&mut shared.screen, rate);
        };

        let poller = RatePoller::spawn(
            Arc::clone(&self.provider),
            pair,
            self.settings.poll_interval(),
            on_rate,
        );
        self.poller.insert(poller).first_fetch().await;
    }
}
