use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::trace;

/// Token for one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Armed {
    handle: TimerHandle,
    task: AbortHandle,
}

/// One-shot timers delivered as events on the main loop's channel.
///
/// At most one timer is live. Arming replaces the previous one, and a tick
/// only counts if [`Scheduler::fire`] still recognises its handle, so a tick
/// that was already queued when it got cancelled is dropped.
#[derive(Debug)]
pub struct Scheduler<E> {
    events: mpsc::UnboundedSender<E>,
    next_id: u64,
    armed: Option<Armed>,
}

impl<E: Send + 'static> Scheduler<E> {
    pub fn new(events: mpsc::UnboundedSender<E>) -> Self {
        Self {
            events,
            next_id: 0,
            armed: None,
        }
    }

    /// Delivers `callback(handle)` after `interval`. Must be called from
    /// within a tokio runtime.
    pub fn arm<F>(&mut self, interval: Duration, callback: F) -> TimerHandle
    where
        F: FnOnce(TimerHandle) -> E + Send + 'static,
    {
        self.disarm();
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);

        let events = self.events.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = events.send(callback(handle));
        });
        trace!(?handle, ?interval, "timer armed");

        self.armed = Some(Armed {
            handle,
            task: task.abort_handle(),
        });
        handle
    }

    /// Cancels `handle` if it is still live. Safe to repeat, and safe after
    /// the timer fired.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.is_live(handle) {
            self.disarm();
        }
    }

    /// Claims a delivered tick. Returns `false` for stale handles.
    pub fn fire(&mut self, handle: TimerHandle) -> bool {
        if !self.is_live(handle) {
            trace!(?handle, "dropping stale tick");
            return false;
        }
        self.armed = None;
        true
    }

    pub fn is_live(&self, handle: TimerHandle) -> bool {
        self.armed.as_ref().is_some_and(|a| a.handle == handle)
    }

    pub fn live(&self) -> Option<TimerHandle> {
        self.armed.as_ref().map(|a| a.handle)
    }

    fn disarm(&mut self) {
        if let Some(armed) = self.armed.take() {
            armed.task.abort();
            trace!(handle = ?armed.handle, "timer cancelled");
        }
    }
}
