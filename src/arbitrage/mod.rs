//! Arbitrage module for detecting and sizing opportunities.
//!
//! This module handles:
//! - Best-price selection across bookmakers
//! - Inverse-odds-sum evaluation and margin thresholding
//! - Equal-payout stake allocation
//! - Deduplication of repeated detections
//! - Assembly of opportunity records for downstream collaborators

pub mod allocator;
pub mod dedup;
pub mod detector;
pub mod evaluator;
pub mod opportunity;
pub mod selector;

pub use allocator::{allocate_stakes, BudgetPolicy, StakePlan};
pub use dedup::{DedupGate, OpportunityKey};
pub use detector::ArbitrageDetector;
pub use evaluator::{evaluate, Evaluation};
pub use opportunity::{Opportunity, OpportunityLeg};
pub use selector::{select_best_prices, BestPrice, BestPriceSelection};
