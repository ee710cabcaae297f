//! Best-price selection across bookmakers.

use rust_decimal::Decimal;

use crate::snapshot::MarketQuotes;

/// Best observed price for one outcome and the bookmaker that offered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPrice {
    /// Outcome name.
    pub outcome: String,
    /// Highest decimal price seen for this outcome.
    pub price: Decimal,
    /// Bookmaker credited with the price.
    pub bookmaker: String,
}

/// Per-outcome best prices for one event/market, in first-seen outcome order.
#[derive(Debug, Clone, Default)]
pub struct BestPriceSelection {
    entries: Vec<BestPrice>,
}

impl BestPriceSelection {
    /// Best prices in first-seen outcome order.
    pub fn entries(&self) -> &[BestPrice] {
        &self.entries
    }

    /// Number of distinct outcomes, for cardinality checking.
    pub fn outcome_count(&self) -> usize {
        self.entries.len()
    }

    /// Look up the best price for one outcome name.
    pub fn get(&self, outcome: &str) -> Option<&BestPrice> {
        self.entries.iter().find(|entry| entry.outcome == outcome)
    }

    /// Prices in entry order, as fed to the evaluator and allocator.
    pub fn prices(&self) -> Vec<Decimal> {
        self.entries.iter().map(|entry| entry.price).collect()
    }
}

/// Find the single best price per distinct outcome across all bookmakers.
///
/// One pass over the quotes; an entry is replaced only on a strictly greater
/// price, so ties go to the earlier-encountered bookmaker. That tie-break
/// decides which bookmaker gets credited (and alerted on), so it is part of
/// the contract, not an accident of iteration order.
pub fn select_best_prices(quotes: &MarketQuotes) -> BestPriceSelection {
    let mut selection = BestPriceSelection::default();

    for (outcome, outcome_quotes) in quotes.outcomes() {
        for quote in outcome_quotes {
            match selection
                .entries
                .iter()
                .position(|entry| entry.outcome == *outcome)
            {
                Some(index) => {
                    let entry = &mut selection.entries[index];
                    if quote.price > entry.price {
                        entry.price = quote.price;
                        entry.bookmaker = quote.bookmaker.clone();
                    }
                }
                None => selection.entries.push(BestPrice {
                    outcome: outcome.clone(),
                    price: quote.price,
                    bookmaker: quote.bookmaker.clone(),
                }),
            }
        }
    }

    selection
}
