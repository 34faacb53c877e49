//! Delayed, cancelable actions
//!
//! Arming a timer spawns a task that sleeps and then posts the [`Timer`] to the
//! fired-timer channel. Cancelling aborts the sleeping task. A timer that
//! already fired before it was cancelled still reaches the dispatcher, so the
//! receiving side must check it against what is currently armed
//! (see `Session::claim_timer`).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::types::ChannelId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Promote a waiting session to running
    AutoStart,
    /// End the given round without a winner
    RoundTimeout { round: u32 },
}

/// A fired (or armed) timer, addressed to the session in `channel`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    pub id: TimerId,
    pub channel: ChannelId,
    pub kind: TimerKind,
}

/// Handle to an armed timer
#[derive(Debug)]
pub struct ArmedTimer {
    pub id: TimerId,
    abort: AbortHandle,
}

impl ArmedTimer {
    /// Stop the timer from firing (no effect if it already fired)
    pub fn cancel(self) {
        self.abort.abort();
    }
}

pub struct Scheduler {
    next_id: AtomicU64,
    fired_tx: mpsc::UnboundedSender<Timer>,
}

impl Scheduler {
    /// Create a scheduler and the receiving end of its fired-timer channel
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Timer>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: AtomicU64::new(1),
            fired_tx,
        };
        (scheduler, fired_rx)
    }

    /// Arm a one-shot timer that fires after `delay`
    pub fn arm(&self, delay: Duration, channel: ChannelId, kind: TimerKind) -> ArmedTimer {
        let id = TimerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let timer = Timer { id, channel, kind };
        let tx = self.fired_tx.clone();

        tracing::debug!("Arming {} ({:?}) in {:?}", id, timer.kind, delay);

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(timer).is_err() {
                tracing::debug!("Timer dispatcher gone, dropping {}", id);
            }
        });

        ArmedTimer {
            id,
            abort: handle.abort_handle(),
        }
    }
}
