//! Odds snapshot normalization.
//!
//! This module handles:
//! - Validating event identity fields
//! - Reshaping raw provider payloads into per-market quote tables
//! - Skipping malformed bookmaker/market/outcome blocks with a warning

pub mod normalizer;

pub use normalizer::{normalize_event, MarketQuotes, NormalizedEvent};
