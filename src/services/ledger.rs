//! Executed-intent ledger. Guards against sending the same intent to the
//! venue twice when the move to `done` failed after a successful execution.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone, Debug)]
struct LedgerEntry {
    ticket: u64,
    recorded_at: Instant,
}

#[derive(Clone)]
pub struct IntentLedger {
    entries: Arc<DashMap<String, LedgerEntry>>,
    retention: Duration,
}

impl IntentLedger {
    pub fn new(retention: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            retention,
        }
    }

    pub fn record(&self, intent_id: &str, ticket: u64) {
        self.entries.insert(
            intent_id.to_string(),
            LedgerEntry {
                ticket,
                recorded_at: Instant::now(),
            },
        );
    }

    /// Ticket of a previous execution of this intent, if still retained
    pub fn ticket_for(&self, intent_id: &str) -> Option<u64> {
        self.entries
            .get(intent_id)
            .filter(|e| e.recorded_at.elapsed() < self.retention)
            .map(|e| e.ticket)
    }

    /// Drop entries older than the retention window; returns how many went
    pub fn prune(&self) -> usize {
        let before = self.entries.len();
        let retention = self.retention;
        self.entries.retain(|_, e| e.recorded_at.elapsed() < retention);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("Pruned {} ledger entries", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_lookup() {
        let ledger = IntentLedger::new(Duration::from_secs(60));
        assert!(ledger.is_empty());

        ledger.record("i1", 42);
        assert_eq!(ledger.ticket_for("i1"), Some(42));
        assert_eq!(ledger.ticket_for("i2"), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_expired_entries_are_invisible_and_pruned() {
        let ledger = IntentLedger::new(Duration::ZERO);
        ledger.record("i1", 42);

        assert_eq!(ledger.ticket_for("i1"), None);
        assert_eq!(ledger.prune(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_prune_keeps_fresh_entries() {
        let ledger = IntentLedger::new(Duration::from_secs(3600));
        ledger.record("i1", 1);
        ledger.record("i2", 2);
        assert_eq!(ledger.prune(), 0);
        assert_eq!(ledger.len(), 2);
    }
}
