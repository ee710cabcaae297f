//! Equal-payout stake allocation and budget sizing.

use rust_decimal::Decimal;

/// Exact per-outcome stake split for one opportunity.
///
/// All values are unrounded `Decimal`s; rounding happens once, at record
/// assembly, never mid-computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StakePlan {
    /// Per-outcome stakes, in the order the prices were given.
    pub stakes: Vec<Decimal>,
    /// Per-outcome payouts (stake * price); equal by construction.
    pub payouts: Vec<Decimal>,
    /// Total stake invested.
    pub total_stake: Decimal,
    /// min(payout) - total_stake, guaranteed whichever outcome occurs.
    pub guaranteed_profit: Decimal,
}

/// Split a total stake so every outcome pays out the same amount.
///
/// General K-way form: `stake_i = total * (1/price_i) / Σ(1/price_j)`.
/// For K=2 this reduces to the familiar `total / (1 + price_1/price_2)`.
/// Every payout lands at `total / Σ(1/price)`, so the guaranteed profit is
/// `total * (1 - Σ(1/price)) / Σ(1/price)` — never below the commonly
/// quoted `total * (1 - Σ(1/price))` margin figure.
///
/// Callers must pass at least one price, each >= 1; the detector only
/// reaches this point with a validated best-price selection.
pub fn allocate_stakes(total_stake: Decimal, prices: &[Decimal]) -> StakePlan {
    let inverse_sum: Decimal = prices.iter().map(|price| Decimal::ONE / price).sum();

    let stakes: Vec<Decimal> = prices
        .iter()
        .map(|price| total_stake * (Decimal::ONE / price) / inverse_sum)
        .collect();

    let payouts: Vec<Decimal> = stakes
        .iter()
        .zip(prices)
        .map(|(stake, price)| stake * price)
        .collect();

    let min_payout = payouts
        .iter()
        .copied()
        .min()
        .unwrap_or(Decimal::ZERO);

    StakePlan {
        guaranteed_profit: min_payout - total_stake,
        stakes,
        payouts,
        total_stake,
    }
}

/// Fractional-Kelly-style stake budget derivation.
///
/// The budget is `bankroll * min(margin * kelly_multiplier, max_fraction)`.
/// This is business policy, not part of the allocator's contract: the
/// allocator splits whatever budget it is given.
#[derive(Debug, Clone, Copy)]
pub struct BudgetPolicy {
    /// Stake fraction per unit of margin.
    pub kelly_multiplier: Decimal,
    /// Hard cap on the bankroll fraction staked on one opportunity.
    pub max_fraction: Decimal,
}

impl BudgetPolicy {
    /// Stake budget for an opportunity with the given margin fraction
    /// (e.g., 0.036 for a 3.6% arb).
    pub fn budget(&self, bankroll: Decimal, margin: Decimal) -> Decimal {
        let fraction = (margin * self.kelly_multiplier).min(self.max_fraction);
        bankroll * fraction
    }
}
