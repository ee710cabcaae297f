//! Inverse-odds-sum evaluation and margin thresholding.

use rust_decimal::{Decimal, RoundingStrategy};

use super::selector::BestPriceSelection;

/// Result of evaluating one market's best prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Exact inverse-odds sum, Σ 1/price.
    pub inverse_sum: Decimal,
    /// Profit margin as a percentage, (1 - inverse_sum) * 100, rounded to
    /// 2 decimal places half-to-even.
    pub percent_profit: Decimal,
}

/// Round a display value to 2 decimal places.
///
/// Half-to-even ("banker's rounding"), matching `Decimal`'s default and
/// pinned here so the margin threshold comparison is deterministic.
pub(crate) fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Evaluate best prices for a risk-free margin.
///
/// Returns `None` when the inverse-odds sum is >= 1 (no arbitrage) or the
/// rounded percent profit falls below `min_margin * 100` — both are normal
/// negative results, not errors. The comparison runs entirely in `Decimal`;
/// converting to binary float here would corrupt detection exactly at the
/// margin boundary.
///
/// The threshold is boundary inclusive: a margin exactly equal to
/// `min_margin * 100` percent is accepted.
pub fn evaluate(selection: &BestPriceSelection, min_margin: Decimal) -> Option<Evaluation> {
    if selection.outcome_count() == 0 {
        return None;
    }

    let inverse_sum: Decimal = selection
        .entries()
        .iter()
        .map(|entry| Decimal::ONE / entry.price)
        .sum();

    if inverse_sum >= Decimal::ONE {
        return None;
    }

    let percent_profit = round_display((Decimal::ONE - inverse_sum) * Decimal::ONE_HUNDRED);

    if percent_profit < min_margin * Decimal::ONE_HUNDRED {
        return None;
    }

    Some(Evaluation {
        inverse_sum,
        percent_profit,
    })
}
