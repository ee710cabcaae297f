//! Reshapes raw provider events into canonical per-market quote tables.

use std::collections::HashSet;

use tracing::warn;

use crate::error::SnapshotError;
use crate::event::types::{parse_commence_time, parse_price};
use crate::event::{Event, Quote, RawEvent};
use crate::metrics;

/// Quotes for one market of one event, grouped by outcome name.
///
/// Outcome order is first-seen; quote order within an outcome is ingestion
/// order. Both orderings are load-bearing: best-price selection breaks price
/// ties in favor of the earlier-encountered bookmaker.
#[derive(Debug, Clone, Default)]
pub struct MarketQuotes {
    outcomes: Vec<(String, Vec<Quote>)>,
}

impl MarketQuotes {
    /// Append a quote, creating its outcome bucket if new.
    pub fn push(&mut self, quote: Quote) {
        match self
            .outcomes
            .iter()
            .position(|(name, _)| *name == quote.outcome)
        {
            Some(index) => self.outcomes[index].1.push(quote),
            None => self.outcomes.push((quote.outcome.clone(), vec![quote])),
        }
    }

    /// Outcome buckets in first-seen order.
    pub fn outcomes(&self) -> &[(String, Vec<Quote>)] {
        &self.outcomes
    }

    /// Number of distinct outcome names observed.
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of distinct bookmakers that contributed at least one quote.
    pub fn distinct_bookmakers(&self) -> usize {
        let mut seen = HashSet::new();
        for (_, quotes) in &self.outcomes {
            for quote in quotes {
                seen.insert(quote.bookmaker.as_str());
            }
        }
        seen.len()
    }

    /// True if no quote survived normalization for this market.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// A validated event with its per-market quote tables.
#[derive(Debug, Clone)]
pub struct NormalizedEvent {
    /// Canonical event identity.
    pub event: Event,
    /// Requested market key → quotes, in the order keys were requested.
    /// Markets nobody published still appear, empty, so callers can tell
    /// "no quotes" apart from "not requested".
    pub markets: Vec<(String, MarketQuotes)>,
}

impl NormalizedEvent {
    /// Quotes for one requested market key.
    pub fn market(&self, key: &str) -> Option<&MarketQuotes> {
        self.markets
            .iter()
            .find(|(market_key, _)| market_key == key)
            .map(|(_, quotes)| quotes)
    }
}

/// Validate one raw event and collect quotes for the requested markets.
///
/// A missing or unparseable identity field (id, team names, commence time)
/// rejects the whole event. Within an accepted event, malformed bookmaker,
/// market, or outcome blocks are skipped with a warning so one bad block
/// never discards valid quotes from other bookmakers.
pub fn normalize_event(
    raw: &RawEvent,
    markets_to_scan: &[String],
) -> Result<NormalizedEvent, SnapshotError> {
    let id = require(raw.id.as_deref(), "id")?;
    let home_team = require(raw.home_team.as_deref(), "home_team")?;
    let away_team = require(raw.away_team.as_deref(), "away_team")?;
    let commence_raw = raw
        .commence_time
        .as_ref()
        .ok_or(SnapshotError::MissingEventField {
            field: "commence_time",
        })?;
    let commence_time = parse_commence_time(commence_raw)?;

    let event = Event {
        id: id.to_string(),
        sport: raw.sport_key.clone().unwrap_or_else(|| "unknown".to_string()),
        home_team: home_team.to_string(),
        away_team: away_team.to_string(),
        commence_time,
    };

    let mut markets: Vec<(String, MarketQuotes)> = markets_to_scan
        .iter()
        .map(|key| (key.clone(), MarketQuotes::default()))
        .collect();

    for bookmaker in &raw.bookmakers {
        let Some(bookmaker_key) = bookmaker.key.as_deref() else {
            warn!(event_id = %event.id, "Skipping bookmaker block without key");
            metrics::inc_quotes_skipped();
            continue;
        };

        for market in &bookmaker.markets {
            let Some(market_key) = market.key.as_deref() else {
                warn!(
                    event_id = %event.id,
                    bookmaker = bookmaker_key,
                    "Skipping market block without key"
                );
                metrics::inc_quotes_skipped();
                continue;
            };

            let Some((_, quotes)) = markets
                .iter_mut()
                .find(|(key, _)| key == market_key)
            else {
                continue; // market not requested
            };

            for outcome in &market.outcomes {
                let (Some(name), Some(price_raw)) = (outcome.name.as_deref(), outcome.price.as_ref())
                else {
                    warn!(
                        event_id = %event.id,
                        bookmaker = bookmaker_key,
                        market = market_key,
                        "Skipping outcome missing name or price"
                    );
                    metrics::inc_quotes_skipped();
                    continue;
                };

                let price = match parse_price(price_raw) {
                    Ok(price) => price,
                    Err(err) => {
                        warn!(
                            event_id = %event.id,
                            bookmaker = bookmaker_key,
                            market = market_key,
                            outcome = name,
                            error = %err,
                            "Skipping quote with invalid price"
                        );
                        metrics::inc_quotes_skipped();
                        continue;
                    }
                };

                quotes.push(Quote {
                    bookmaker: bookmaker_key.to_string(),
                    outcome: name.to_string(),
                    price,
                });
            }
        }
    }

    Ok(NormalizedEvent { event, markets })
}

fn require<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, SnapshotError> {
    match value {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(SnapshotError::MissingEventField { field }),
    }
}
