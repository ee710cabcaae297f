//! Deduplication of repeated opportunity detections.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use rust_decimal::Decimal;
use time::OffsetDateTime;

/// Identity of one priced opportunity.
///
/// Includes the exact best price per outcome, so the same event/market
/// re-fires when odds move even slightly: a new price is a new opportunity.
/// Legs are sorted so bookmaker iteration order never affects identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpportunityKey {
    event_id: String,
    market: String,
    legs: Vec<(String, Decimal, String)>,
}

impl OpportunityKey {
    /// Build a key from (outcome, best price, bookmaker) legs.
    pub fn new(
        event_id: impl Into<String>,
        market: impl Into<String>,
        mut legs: Vec<(String, Decimal, String)>,
    ) -> Self {
        // Normalize prices so 2.1 and 2.10 hash identically, then sort for
        // order independence.
        for (_, price, _) in &mut legs {
            *price = price.normalize();
        }
        legs.sort();
        Self {
            event_id: event_id.into(),
            market: market.into(),
            legs,
        }
    }
}

/// Bounded set of recently seen opportunity keys.
///
/// Entries expire after a TTL and the set holds at most `capacity` keys,
/// evicting oldest-first, so a long-running process never grows without
/// bound. Single-writer, single-reader within one evaluation pass; callers
/// sharing one gate across concurrent pollers must serialize access.
#[derive(Debug)]
pub struct DedupGate {
    seen: HashMap<OpportunityKey, OffsetDateTime>,
    order: VecDeque<OpportunityKey>,
    capacity: usize,
    ttl: Duration,
}

impl DedupGate {
    /// Create a gate remembering at most `capacity` keys for `ttl` each.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            seen: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            ttl,
        }
    }

    /// Whether this key was marked seen within the TTL window.
    pub fn is_duplicate(&self, key: &OpportunityKey) -> bool {
        match self.seen.get(key) {
            Some(marked_at) => self.fresh(*marked_at, OffsetDateTime::now_utc()),
            None => false,
        }
    }

    /// Remember a key, evicting expired and over-capacity entries.
    pub fn mark_seen(&mut self, key: OpportunityKey) {
        let now = OffsetDateTime::now_utc();
        self.evict_expired(now);

        match self.seen.entry(key.clone()) {
            Entry::Occupied(mut entry) => {
                entry.insert(now);
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                self.order.push_back(key);
            }
        }

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.seen.remove(&oldest);
            }
        }
    }

    /// Number of keys currently remembered (expired entries included until
    /// the next `mark_seen` sweeps them).
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// True if no key is remembered.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    fn fresh(&self, marked_at: OffsetDateTime, now: OffsetDateTime) -> bool {
        (now - marked_at) < self.ttl
    }

    fn evict_expired(&mut self, now: OffsetDateTime) {
        while let Some(front) = self.order.front() {
            let expired = match self.seen.get(front) {
                Some(marked_at) => !self.fresh(*marked_at, now),
                None => true,
            };
            // A re-marked key keeps its original `order` slot with a fresh
            // timestamp; the sweep stops there.
            if !expired {
                break;
            }
            if let Some(key) = self.order.pop_front() {
                self.seen.remove(&key);
            }
        }
    }
}
