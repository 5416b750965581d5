use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct TrackerMetrics {
    events_recorded: AtomicU64,
    events_sent: AtomicU64,
    events_dropped: AtomicU64,
    events_requeued: AtomicU64,
    batches_sent: AtomicU64,
    flush_failures: AtomicU64,
    interest_signals: AtomicU64,
    source_reports: AtomicU64,
}

impl TrackerMetrics {
    pub fn record_event(&self) {
        self.events_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_batch(&self, event_count: usize) {
        self.batches_sent.fetch_add(1, Ordering::Relaxed);
        self.events_sent
            .fetch_add(event_count as u64, Ordering::Relaxed);
    }

    pub fn record_flush_failure(&self) {
        self.flush_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dropped(&self, count: usize) {
        self.events_dropped
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_requeued(&self, count: usize) {
        self.events_requeued
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_interest(&self) {
        self.interest_signals.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_source(&self) {
        self.source_reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_recorded: self.events_recorded.load(Ordering::Relaxed),
            events_sent: self.events_sent.load(Ordering::Relaxed),
            events_dropped: self.events_dropped.load(Ordering::Relaxed),
            events_requeued: self.events_requeued.load(Ordering::Relaxed),
            batches_sent: self.batches_sent.load(Ordering::Relaxed),
            flush_failures: self.flush_failures.load(Ordering::Relaxed),
            interest_signals: self.interest_signals.load(Ordering::Relaxed),
            source_reports: self.source_reports.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of the counters, cheap to log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub events_recorded: u64,
    pub events_sent: u64,
    pub events_dropped: u64,
    pub events_requeued: u64,
    pub batches_sent: u64,
    pub flush_failures: u64,
    pub interest_signals: u64,
    pub source_reports: u64,
}
