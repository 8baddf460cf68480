//! Bounded diagnostics log of recent cycle decisions
//!
//! Operator-facing only; nothing in the decision path reads it back.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One cycle's classification and arbitration outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub timestamp_ms: u64,
    /// Enriched detections this cycle produced
    pub detections: usize,
    /// Class announced this cycle, if arbitration emitted a directive
    pub announced: Option<String>,
    /// Interval the sampler chose for the next cycle
    pub next_interval_ms: u64,
}

/// Most-recent-N ring of cycle decisions
#[derive(Debug)]
pub struct DecisionLog {
    entries: VecDeque<DecisionEntry>,
    capacity: usize,
}

impl DecisionLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, entry: DecisionEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Oldest-first snapshot of the retained entries
    pub fn recent(&self) -> Vec<DecisionEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
