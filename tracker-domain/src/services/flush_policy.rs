// Flush failure policy
// Delivery is at-most-once in production: a failed batch is dropped.
// Debug mode keeps the batch for the next attempt.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureDisposition {
    /// Put the batch back at the front of the live queue.
    Requeue,
    /// Discard the batch.
    Drop,
}

pub fn on_flush_failure(debug: bool) -> FailureDisposition {
    if debug {
        FailureDisposition::Requeue
    } else {
        FailureDisposition::Drop
    }
}
