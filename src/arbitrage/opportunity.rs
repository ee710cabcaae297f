//! Assembled opportunity records for downstream collaborators.

use rust_decimal::Decimal;
use serde::Serialize;
use time::OffsetDateTime;

use super::allocator::StakePlan;
use super::dedup::OpportunityKey;
use super::evaluator::{round_display, Evaluation};
use super::selector::BestPriceSelection;
use crate::event::Event;

/// One staked leg of an opportunity.
#[derive(Debug, Clone, Serialize)]
pub struct OpportunityLeg {
    /// Outcome name.
    pub outcome: String,
    /// Bookmaker offering the best price.
    pub bookmaker: String,
    /// Best decimal price.
    pub price: Decimal,
    /// Stake on this leg, rounded to cents.
    pub stake: Decimal,
    /// Payout if this outcome occurs, rounded to cents.
    pub payout: Decimal,
}

/// A detected risk-free opportunity, ready for logging, alerting, or
/// simulated execution. This is the boundary object handed to external
/// collaborators; stakes and payouts are rounded to cents here and nowhere
/// earlier.
#[derive(Debug, Clone, Serialize)]
pub struct Opportunity {
    /// Provider event id.
    pub event_id: String,
    /// Sport category label.
    pub sport: String,
    /// Home participant.
    pub home_team: String,
    /// Away participant.
    pub away_team: String,
    /// Market key this opportunity was found in.
    pub market: String,
    /// Per-outcome legs in best-price selection order.
    pub legs: Vec<OpportunityLeg>,
    /// Exact inverse-odds sum at detection.
    pub inverse_sum: Decimal,
    /// Percent profit margin, 2 decimal places.
    pub percent_profit: Decimal,
    /// Total stake split across the legs.
    pub total_stake: Decimal,
    /// Guaranteed profit at the allocated stakes, rounded to cents.
    pub guaranteed_profit: Decimal,
    /// Scheduled event start.
    #[serde(with = "time::serde::rfc3339")]
    pub commence_time: OffsetDateTime,
    /// When the opportunity was detected.
    #[serde(with = "time::serde::rfc3339")]
    pub detected_at: OffsetDateTime,
}

impl Opportunity {
    /// Assemble the final record from the detection pipeline's pieces.
    pub fn assemble(
        event: &Event,
        market: &str,
        selection: &BestPriceSelection,
        evaluation: &Evaluation,
        plan: &StakePlan,
    ) -> Self {
        let legs = selection
            .entries()
            .iter()
            .zip(plan.stakes.iter().zip(&plan.payouts))
            .map(|(best, (stake, payout))| OpportunityLeg {
                outcome: best.outcome.clone(),
                bookmaker: best.bookmaker.clone(),
                price: best.price,
                stake: round_display(*stake),
                payout: round_display(*payout),
            })
            .collect();

        Self {
            event_id: event.id.clone(),
            sport: event.sport.clone(),
            home_team: event.home_team.clone(),
            away_team: event.away_team.clone(),
            market: market.to_string(),
            legs,
            inverse_sum: evaluation.inverse_sum,
            percent_profit: evaluation.percent_profit,
            total_stake: plan.total_stake,
            guaranteed_profit: round_display(plan.guaranteed_profit),
            commence_time: event.commence_time,
            detected_at: OffsetDateTime::now_utc(),
        }
    }

    /// Dedup identity for this opportunity's priced legs.
    pub fn dedup_key(event: &Event, market: &str, selection: &BestPriceSelection) -> OpportunityKey {
        OpportunityKey::new(
            event.id.clone(),
            market,
            selection
                .entries()
                .iter()
                .map(|best| (best.outcome.clone(), best.price, best.bookmaker.clone()))
                .collect(),
        )
    }
}
