//! Debounced query input.
//!
//! Keystrokes arrive faster than it is worth re-running the pipeline. The
//! debouncer keeps exactly one timer task alive: each new keystroke aborts
//! the pending task and schedules a fresh one, so only the last value in a
//! quiet period is delivered (last write wins).
//!
//! Delivered values carry a sequence number. Cancelling bumps the
//! sequence, which turns a value that already left the timer task but was
//! not yet consumed into a stale one the owner can discard.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::trace;

/// A query value that survived the quiet period
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebouncedQuery {
    pub seq: u64,
    pub query: String,
}

/// Receiving end for debounced values
pub type DebouncedQueries = mpsc::UnboundedReceiver<DebouncedQuery>;

/// Single-slot cancel-and-reschedule timer.
///
/// `push` spawns onto the current Tokio runtime and must be called from
/// within one.
#[derive(Debug)]
pub struct QueryDebouncer {
    delay: Duration,
    seq: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<DebouncedQuery>,
}

impl QueryDebouncer {
    pub fn new(delay: Duration) -> (Self, DebouncedQueries) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            seq: 0,
            pending: None,
            tx,
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value with `raw` and restart the timer.
    pub fn push(&mut self, raw: impl Into<String>) {
        self.abort_pending();
        self.seq += 1;

        let message = DebouncedQuery {
            seq: self.seq,
            query: raw.into(),
        };
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            trace!("Debounced query ready (seq {})", message.seq);
            // The receiver is gone when the page is torn down
            let _ = tx.send(message);
        }));
    }

    /// Drop the pending value, if any, and invalidate anything in flight.
    pub fn cancel(&mut self) {
        self.abort_pending();
        self.seq += 1;
    }

    /// Whether `message` is the latest value pushed and not cancelled
    pub fn is_current(&self, message: &DebouncedQuery) -> bool {
        message.seq == self.seq
    }

    /// Whether a timer is still running
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn abort_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.abort_pending();
    }
}
