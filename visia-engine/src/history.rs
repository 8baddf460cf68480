//! Announcement bookkeeping for cooldown gating
//!
//! Per-class last-announcement timestamps plus a dedicated global
//! timestamp, kept as an explicit field rather than a sentinel key so a
//! real class name can never collide with it. Mutated exclusively by the
//! arbitrator, immediately after it commits to emitting a directive.

use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct AnnouncementHistory {
    per_class_ms: HashMap<String, u64>,
    last_global_ms: Option<u64>,
}

impl AnnouncementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once at least `cooldown_ms` has passed since any announcement.
    /// A history with no announcements counts as elapsed.
    pub fn global_elapsed(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.last_global_ms {
            Some(last) => now_ms.saturating_sub(last) >= cooldown_ms,
            None => true,
        }
    }

    /// True once at least `cooldown_ms` has passed since this class was
    /// last announced. An unseen class counts as elapsed.
    pub fn class_elapsed(&self, class_label: &str, now_ms: u64, cooldown_ms: u64) -> bool {
        match self.per_class_ms.get(class_label) {
            Some(last) => now_ms.saturating_sub(*last) >= cooldown_ms,
            None => true,
        }
    }

    /// Commit an announcement. Timestamps only ever move forward to `now`.
    pub fn record(&mut self, class_label: &str, now_ms: u64) {
        let entry = self.per_class_ms.entry(class_label.to_string()).or_insert(0);
        *entry = (*entry).max(now_ms);
        self.last_global_ms = Some(self.last_global_ms.unwrap_or(0).max(now_ms));
    }

    pub fn last_global(&self) -> Option<u64> {
        self.last_global_ms
    }

    pub fn last_for_class(&self, class_label: &str) -> Option<u64> {
        self.per_class_ms.get(class_label).copied()
    }
}
