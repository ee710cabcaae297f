//! Event and quote domain types.
//!
//! This module handles:
//! - Canonical event identity and quote types
//! - Raw provider payload shapes (serde)
//! - Flexible commence-time and exact decimal price parsing

pub mod types;

pub use types::{Event, Quote, RawBookmaker, RawEvent, RawMarket, RawOutcome};
