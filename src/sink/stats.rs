use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a remote sink has shipped and lost.
///
/// Delivery is at-most-once: lines of a failed batch are counted in
/// `lines_dropped` and never resent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub batches_sent: u64,
    pub lines_sent: u64,
    pub batches_failed: u64,
    pub lines_dropped: u64,
}

#[derive(Debug, Default)]
pub(crate) struct AtomicDeliveryStats {
    batches_sent: AtomicU64,
    lines_sent: AtomicU64,
    batches_failed: AtomicU64,
    lines_dropped: AtomicU64,
}

impl AtomicDeliveryStats {
    pub(crate) fn record_delivered(&self, lines: usize) {
        self.batches_sent.fetch_add(1, Ordering::Relaxed);
        self.lines_sent.fetch_add(lines as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self, lines: usize) {
        self.batches_failed.fetch_add(1, Ordering::Relaxed);
        self.lines_dropped.fetch_add(lines as u64, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> DeliveryStats {
        DeliveryStats {
            batches_sent: self.batches_sent.load(Ordering::Relaxed),
            lines_sent: self.lines_sent.load(Ordering::Relaxed),
            batches_failed: self.batches_failed.load(Ordering::Relaxed),
            lines_dropped: self.lines_dropped.load(Ordering::Relaxed),
        }
    }
}
