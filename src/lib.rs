//! Cross-bookmaker sports betting arbitrage detection engine.
//!
//! The engine ingests odds snapshots (event → bookmaker → market → outcome),
//! finds the best decimal price per outcome across bookmakers, and checks
//! whether the inverse-odds sum falls below 1.00:
//!
//! ```text
//! Bookmaker X: Lakers  @ 2.10
//! Bookmaker Y: Celtics @ 2.05
//! ─────────────────────────────
//! 1/2.10 + 1/2.05 = 0.9640 < 1.00 ✅
//! Margin: 3.60% guaranteed, whichever team wins
//! ```
//!
//! When a margin clears the configured threshold, stakes are split so every
//! outcome pays out the same amount, and the opportunity is recorded once
//! (deduplicated across polling cycles).
//!
//! All odds math runs on [`rust_decimal::Decimal`]; binary floating point is
//! never used for prices, inverse sums, or stakes.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`event`]: Event and quote domain types, raw provider shapes
//! - [`snapshot`]: Snapshot normalization and validation
//! - [`arbitrage`]: Best-price selection, evaluation, stake allocation, dedup
//! - [`logging`]: Tracing subscriber setup for embedding applications
//! - [`metrics`]: Counters and latency histograms

pub mod arbitrage;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod metrics;
pub mod snapshot;

pub use arbitrage::{ArbitrageDetector, Opportunity};
pub use config::Config;
pub use error::{ArbError, Result};
