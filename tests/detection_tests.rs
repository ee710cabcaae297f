//! End-to-end detection tests against the public API.
//!
//! Feeds raw provider-shaped JSON through the full pipeline: normalize →
//! best-price select → evaluate → dedup → allocate → record.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use sports_arb::arbitrage::ArbitrageDetector;
use sports_arb::event::RawEvent;
use sports_arb::Config;

fn detector_with(config: Config) -> ArbitrageDetector {
    ArbitrageDetector::new(&config).unwrap()
}

fn detector() -> ArbitrageDetector {
    detector_with(Config::default())
}

fn event(value: serde_json::Value) -> RawEvent {
    serde_json::from_value(value).unwrap()
}

/// Lakers @ 2.10 (bookX) vs Celtics @ 2.05 (bookY): the reference
/// profitable snapshot.
fn lakers_celtics() -> RawEvent {
    event(json!({
        "id": "nba-lal-bos-20260301",
        "sport_key": "basketball_nba",
        "home_team": "Lakers",
        "away_team": "Celtics",
        "commence_time": "2026-03-01T19:30:00Z",
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 2.10},
                {"name": "Celtics", "price": 1.85}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 1.92},
                {"name": "Celtics", "price": 2.05}
            ]}]}
        ]
    }))
}

#[test]
fn profitable_two_way_snapshot_is_detected_and_sized() {
    let mut detector = detector();

    let opportunities = detector.detect(&[lakers_celtics()]);
    assert_eq!(opportunities.len(), 1);

    let opp = &opportunities[0];
    assert_eq!(opp.event_id, "nba-lal-bos-20260301");
    assert_eq!(opp.market, "h2h");
    assert_eq!(opp.percent_profit, dec!(3.60));

    // Best prices come from different books, with the right attribution.
    assert_eq!(opp.legs[0].outcome, "Lakers");
    assert_eq!(opp.legs[0].bookmaker, "bookX");
    assert_eq!(opp.legs[0].price, dec!(2.10));
    assert_eq!(opp.legs[1].outcome, "Celtics");
    assert_eq!(opp.legs[1].bookmaker, "bookY");
    assert_eq!(opp.legs[1].price, dec!(2.05));

    // Reference stake split on the default $100.
    assert_eq!(opp.legs[0].stake, dec!(49.40));
    assert_eq!(opp.legs[1].stake, dec!(50.60));
}

#[test]
fn payouts_equal_and_beat_total_stake() {
    let mut detector = detector();
    let opp = detector.detect(&[lakers_celtics()]).remove(0);

    let cent = dec!(0.01);
    for leg in &opp.legs {
        // Every outcome pays out the same (within rounding) and strictly
        // more than the total stake: the definition of arbitrage.
        assert!((leg.payout - opp.legs[0].payout).abs() <= cent);
        assert!(leg.payout > opp.total_stake);
        assert!((leg.payout - (opp.total_stake + opp.guaranteed_profit)).abs() <= cent);
    }
    assert!(opp.guaranteed_profit > Decimal::ZERO);
}

#[test]
fn unprofitable_snapshot_yields_nothing() {
    let mut detector = detector();

    // 1/1.90 + 1/1.90 > 1: no risk-free combination exists.
    let raw = event(json!({
        "id": "nba-1",
        "home_team": "Lakers",
        "away_team": "Celtics",
        "commence_time": 1772393400,
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 1.90}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Celtics", "price": 1.90}
            ]}]}
        ]
    }));

    assert!(detector.detect(&[raw]).is_empty());
}

#[test]
fn missing_outcome_skips_market_silently() {
    let mut detector = detector();

    // Nobody prices Celtics: the market is skipped, not evaluated.
    let raw = event(json!({
        "id": "nba-1",
        "home_team": "Lakers",
        "away_team": "Celtics",
        "commence_time": 1772393400,
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 12.0}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 11.5}
            ]}]}
        ]
    }));

    assert!(detector.detect(&[raw]).is_empty());
}

#[test]
fn identical_snapshot_twice_produces_one_record() {
    let mut detector = detector();
    let raw = lakers_celtics();

    let mut total = detector.detect(std::slice::from_ref(&raw));
    total.extend(detector.detect(std::slice::from_ref(&raw)));

    assert_eq!(total.len(), 1);
}

#[test]
fn price_moved_by_a_thousandth_is_a_new_opportunity() {
    let mut detector = detector();

    let make = |price: &str| {
        event(json!({
            "id": "nba-1",
            "home_team": "Lakers",
            "away_team": "Celtics",
            "commence_time": 1772393400,
            "bookmakers": [
                {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                    {"name": "Lakers", "price": price}
                ]}]},
                {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                    {"name": "Celtics", "price": 2.05}
                ]}]}
            ]
        }))
    };

    let first = detector.detect(&[make("2.100")]);
    let second = detector.detect(&[make("2.101")]);

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_ne!(first[0].legs[0].price, second[0].legs[0].price);
}

#[test]
fn margin_threshold_boundary_is_inclusive() {
    // 2.06/2.06 → percent profit 2.91 exactly after display rounding.
    let raw = event(json!({
        "id": "nba-1",
        "home_team": "Lakers",
        "away_team": "Celtics",
        "commence_time": 1772393400,
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Lakers", "price": 2.06}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Celtics", "price": 2.06}
            ]}]}
        ]
    }));

    let mut at_boundary = detector_with(Config {
        min_margin: dec!(0.0291),
        ..Config::default()
    });
    assert_eq!(at_boundary.detect(std::slice::from_ref(&raw)).len(), 1);

    let mut above_boundary = detector_with(Config {
        min_margin: dec!(0.0292),
        ..Config::default()
    });
    assert!(above_boundary.detect(std::slice::from_ref(&raw)).is_empty());
}

#[test]
fn three_way_market_with_configured_cardinality() {
    let raw = event(json!({
        "id": "epl-1",
        "sport_key": "soccer_epl",
        "home_team": "Arsenal",
        "away_team": "Chelsea",
        "commence_time": "2026-03-07T15:00:00Z",
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Arsenal", "price": 3.2},
                {"name": "Draw", "price": 3.1},
                {"name": "Chelsea", "price": 2.4}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Arsenal", "price": 2.9},
                {"name": "Draw", "price": 3.6},
                {"name": "Chelsea", "price": 2.5}
            ]}]}
        ]
    }));

    // The default 2-way detector refuses the 3-outcome market.
    assert!(detector().detect(std::slice::from_ref(&raw)).is_empty());

    // Configured for 3-way it evaluates: 1/3.2 + 1/3.6 + 1/2.5 = 0.99028.
    let mut three_way = detector_with(Config {
        outcome_count: 3,
        ..Config::default()
    });
    let opportunities = three_way.detect(std::slice::from_ref(&raw));
    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].legs.len(), 3);
    assert_eq!(opportunities[0].percent_profit, dec!(0.97));
}

#[test]
fn malformed_and_valid_events_mix_without_aborting() {
    let mut detector = detector();

    let missing_identity = event(json!({
        "home_team": "Lakers",
        "away_team": "Celtics"
    }));
    let bad_quotes = event(json!({
        "id": "nba-2",
        "home_team": "Suns",
        "away_team": "Nuggets",
        "commence_time": 1772393400,
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Suns", "price": "not-a-price"},
                {"name": "Nuggets", "price": -3}
            ]}]}
        ]
    }));

    let opportunities = detector.detect(&[missing_identity, bad_quotes, lakers_celtics()]);

    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].event_id, "nba-lal-bos-20260301");
}

#[test]
fn unix_and_iso_timestamps_both_accepted() {
    let mut detector = detector();

    let iso = detector.detect(&[lakers_celtics()]).remove(0);
    assert_eq!(iso.commence_time.unix_timestamp(), 1772393400);

    let raw = event(json!({
        "id": "nba-3",
        "home_team": "Heat",
        "away_team": "Knicks",
        "commence_time": 1772393400,
        "bookmakers": [
            {"key": "bookX", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Heat", "price": 2.10}
            ]}]},
            {"key": "bookY", "markets": [{"key": "h2h", "outcomes": [
                {"name": "Knicks", "price": 2.05}
            ]}]}
        ]
    }));
    let unix = detector.detect(&[raw]).remove(0);
    assert_eq!(unix.commence_time, iso.commence_time);
}
