//! Arbitrage detection driver: normalize, select, evaluate, dedup, size.

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use super::allocator::{allocate_stakes, BudgetPolicy};
use super::dedup::DedupGate;
use super::evaluator::evaluate;
use super::opportunity::Opportunity;
use super::selector::select_best_prices;
use crate::config::Config;
use crate::error::ConfigError;
use crate::event::RawEvent;
use crate::metrics;
use crate::snapshot::normalize_event;

/// Scans odds snapshots for cross-bookmaker arbitrage.
///
/// Holds all detection parameters explicitly; nothing here reads the
/// process environment. Pure computation, no I/O: the caller decides when
/// snapshots arrive and what to do with the returned records.
///
/// The embedded dedup gate makes `detect` stateful across calls. One
/// detector instance is single-writer; callers polling multiple sports
/// concurrently should use one instance per sport or serialize access.
#[derive(Debug)]
pub struct ArbitrageDetector {
    outcome_count: usize,
    min_margin: Decimal,
    markets_to_scan: Vec<String>,
    total_stake: Decimal,
    dedup: DedupGate,
}

impl ArbitrageDetector {
    /// Build a detector from validated configuration.
    ///
    /// Fails fast on invalid options so no snapshot is ever processed with
    /// bad parameters.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            outcome_count: config.outcome_count,
            min_margin: config.min_margin,
            markets_to_scan: config.markets_to_scan.clone(),
            total_stake: config.total_stake,
            dedup: DedupGate::new(
                config.dedup_capacity,
                Duration::from_secs(config.dedup_ttl_seconds),
            ),
        })
    }

    /// Budget policy derived from the same configuration, for callers that
    /// size stakes off a live bankroll instead of the fixed `total_stake`.
    pub fn budget_policy(config: &Config) -> BudgetPolicy {
        BudgetPolicy {
            kelly_multiplier: config.kelly_multiplier,
            max_fraction: config.max_stake_per_arb,
        }
    }

    /// Scan a batch of raw events and return every new opportunity.
    ///
    /// Per-item failures (malformed events, bad quotes) are logged and
    /// skipped; the batch never aborts.
    #[instrument(skip_all, fields(events = events.len()))]
    pub fn detect(&mut self, events: &[RawEvent]) -> Vec<Opportunity> {
        let _timer = metrics::timer_detection();
        let mut opportunities = Vec::new();

        for raw in events {
            let normalized = match normalize_event(raw, &self.markets_to_scan) {
                Ok(normalized) => normalized,
                Err(err) => {
                    warn!(error = %err, "Rejecting malformed event");
                    metrics::inc_events_rejected();
                    continue;
                }
            };

            for (market_key, quotes) in &normalized.markets {
                metrics::inc_markets_scanned();

                if quotes.distinct_bookmakers() < 2 {
                    debug!(
                        event_id = %normalized.event.id,
                        market = %market_key,
                        "Fewer than two bookmakers, market not evaluable"
                    );
                    continue;
                }

                let selection = select_best_prices(quotes);
                if selection.outcome_count() != self.outcome_count {
                    // Partial markets are skipped, not treated as
                    // zero-probability; surplus outcomes (e.g. a tie leaking
                    // into a 2-way scan) also disqualify.
                    debug!(
                        event_id = %normalized.event.id,
                        market = %market_key,
                        outcomes = selection.outcome_count(),
                        expected = self.outcome_count,
                        "Outcome cardinality mismatch, skipping market"
                    );
                    continue;
                }

                let Some(evaluation) = evaluate(&selection, self.min_margin) else {
                    continue;
                };

                let key = Opportunity::dedup_key(&normalized.event, market_key, &selection);
                if self.dedup.is_duplicate(&key) {
                    debug!(
                        event_id = %normalized.event.id,
                        market = %market_key,
                        "Opportunity already reported at these prices"
                    );
                    metrics::inc_opportunities_suppressed();
                    continue;
                }
                self.dedup.mark_seen(key);

                let plan = allocate_stakes(self.total_stake, &selection.prices());
                let opportunity = Opportunity::assemble(
                    &normalized.event,
                    market_key,
                    &selection,
                    &evaluation,
                    &plan,
                );

                info!(
                    event_id = %opportunity.event_id,
                    market = %opportunity.market,
                    percent_profit = %opportunity.percent_profit,
                    guaranteed_profit = %opportunity.guaranteed_profit,
                    "Arbitrage opportunity detected"
                );
                metrics::inc_opportunities_detected();
                opportunities.push(opportunity);
            }
        }

        opportunities
    }
}
