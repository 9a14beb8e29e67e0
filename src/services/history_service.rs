//! In-memory scan history.
//!
//! Keeps the most recent scans, newest first, up to a fixed capacity.
//! Shared by all request handlers behind a mutex.

use crate::models::history::ScanRecord;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug)]
pub struct ScanHistory {
    limit: usize,
    entries: Mutex<VecDeque<ScanRecord>>,
}

impl ScanHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: Mutex::new(VecDeque::with_capacity(limit)),
        }
    }

    /// Record a scan at the front, evicting the oldest entry when full.
    pub fn record(&self, record: ScanRecord) {
        let mut entries = self.lock();
        entries.push_front(record);
        entries.truncate(self.limit);
    }

    /// Snapshot of the history, newest first.
    pub fn snapshot(&self) -> Vec<ScanRecord> {
        self.lock().iter().cloned().collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ScanRecord>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
