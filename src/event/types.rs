//! Domain types for events and quotes, plus raw provider payload shapes.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{QuoteError, SnapshotError};

/// A sporting fixture, immutable once ingested from a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// Provider-assigned unique identifier.
    pub id: String,
    /// Sport category label (e.g., "basketball_nba").
    pub sport: String,
    /// Home participant name.
    pub home_team: String,
    /// Away participant name.
    pub away_team: String,
    /// Scheduled start time.
    #[serde(with = "time::serde::rfc3339")]
    pub commence_time: OffsetDateTime,
}

/// A single bookmaker's price for one named outcome of one market.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Bookmaker identifier (e.g., "pinnacle").
    pub bookmaker: String,
    /// Outcome name, the discriminator for opposite outcomes.
    pub outcome: String,
    /// Decimal price: payout multiple per unit stake, >= 1.
    pub price: Decimal,
}

/// Raw event record as received from the odds provider.
///
/// Every field is optional so one malformed block can be skipped (or the
/// event rejected) instead of failing deserialization of the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Provider event id.
    pub id: Option<String>,
    /// Sport key.
    #[serde(default)]
    pub sport_key: Option<String>,
    /// Home team name.
    pub home_team: Option<String>,
    /// Away team name.
    pub away_team: Option<String>,
    /// Start time: ISO-8601 string or numeric Unix timestamp.
    pub commence_time: Option<serde_json::Value>,
    /// Bookmaker blocks.
    #[serde(default)]
    pub bookmakers: Vec<RawBookmaker>,
}

/// One bookmaker's block within a raw event.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBookmaker {
    /// Bookmaker key.
    pub key: Option<String>,
    /// Markets published by this bookmaker.
    #[serde(default)]
    pub markets: Vec<RawMarket>,
}

/// One market within a bookmaker block.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMarket {
    /// Market key (e.g., "h2h").
    pub key: Option<String>,
    /// Outcome prices.
    #[serde(default)]
    pub outcomes: Vec<RawOutcome>,
}

/// One priced outcome within a market.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOutcome {
    /// Outcome name.
    pub name: Option<String>,
    /// Price, kept as raw JSON so the original text representation is
    /// available for exact decimal parsing.
    pub price: Option<serde_json::Value>,
}

/// Parse a commence time that may be an RFC 3339 string or a Unix timestamp
/// (integer or fractional seconds).
pub fn parse_commence_time(raw: &serde_json::Value) -> Result<OffsetDateTime, SnapshotError> {
    let bad = || SnapshotError::BadCommenceTime {
        raw: raw.to_string(),
    };

    match raw {
        serde_json::Value::String(s) => OffsetDateTime::parse(s, &Rfc3339).map_err(|_| bad()),
        serde_json::Value::Number(n) => {
            let secs = if let Some(i) = n.as_i64() {
                i
            } else if let Some(f) = n.as_f64() {
                f.trunc() as i64
            } else {
                return Err(bad());
            };
            OffsetDateTime::from_unix_timestamp(secs).map_err(|_| bad())
        }
        _ => Err(bad()),
    }
}

/// Parse a price with exact decimal semantics.
///
/// JSON numbers are parsed from their original literal text (preserved by
/// serde_json's `arbitrary_precision` feature), so `2.10` becomes exactly
/// `Decimal(2.10)` with no binary-float rounding in between. Prices below
/// 1 are rejected: a decimal odd pays at least the stake back.
pub fn parse_price(raw: &serde_json::Value) -> Result<Decimal, QuoteError> {
    let text = match raw {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        other => {
            return Err(QuoteError::Unparseable {
                raw: other.to_string(),
            })
        }
    };

    let price = Decimal::from_str(&text).map_err(|_| QuoteError::Unparseable { raw: text })?;

    if price < Decimal::ONE {
        return Err(QuoteError::OutOfDomain { price });
    }

    Ok(price)
}
