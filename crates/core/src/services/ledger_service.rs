use crate::models::currency::Currency;
use crate::models::pocket::Pocket;

/// Read and update pocket balances.
///
/// Pure business logic over a short ordered list of pockets. Nothing here
/// mutates its input; updates return a fresh list in the same order.
pub struct LedgerService;

impl LedgerService {
    pub fn new() -> Self {
        Self
    }

    /// The pocket holding `currency`, if any.
    pub fn find_pocket<'a>(&self, currency: Currency, pockets: &'a [Pocket]) -> Option<&'a Pocket> {
        pockets.iter().find(|p| p.currency == currency)
    }

    /// Whether debiting `amount` from the `currency` pocket is impossible.
    ///
    /// A missing pocket always exceeds. A balance equal to `amount` does not.
    pub fn exceeds_balance(&self, currency: Currency, pockets: &[Pocket], amount: f64) -> bool {
        self.find_pocket(currency, pockets)
            .map_or(true, |pocket| pocket.balance < amount)
    }

    /// Debit `base_amount` from the base pocket and credit `quote_amount` to
    /// the quote pocket. Other pockets are copied unchanged.
    pub fn apply_exchange(
        &self,
        pockets: &[Pocket],
        base: Currency,
        base_amount: f64,
        quote: Currency,
        quote_amount: f64,
    ) -> Vec<Pocket> {
        pockets
            .iter()
            .map(|pocket| {
                if pocket.currency == base {
                    Pocket::new(pocket.currency, pocket.balance - base_amount)
                } else if pocket.currency == quote {
                    Pocket::new(pocket.currency, pocket.balance + quote_amount)
                } else {
                    pocket.clone()
                }
            })
            .collect()
    }
}

impl Default for LedgerService {
    fn default() -> Self {
        Self::new()
    }
}
