//! Deferred callbacks keyed to the app clock.
//!
//! A [`Deferred`] holds at most one pending payload. Scheduling again replaces
//! the pending one, so only the newest request can ever fire. Time is passed in
//! explicitly as the elapsed app time, which keeps the owners testable without
//! a running `App`.

use std::time::Duration;

/// Identifies one scheduled callback. Stale handles never match a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Pending<T> {
    handle: TimerHandle,
    due: Duration,
    payload: T,
}

#[derive(Debug)]
pub struct Deferred<T> {
    pending: Option<Pending<T>>,
    next_id: u64,
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self {
            pending: None,
            next_id: 0,
        }
    }
}

impl<T> Deferred<T> {
    /// Schedule `payload` to fire at `now + delay`, superseding any pending callback.
    pub fn schedule(&mut self, now: Duration, delay: Duration, payload: T) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending = Some(Pending {
            handle,
            due: now + delay,
            payload,
        });
        handle
    }

    /// Drop the pending callback, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.pending.as_ref().is_some_and(|p| p.handle == handle)
    }

    pub fn due(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the payload if its deadline has been reached.
    pub fn fire(&mut self, now: Duration) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.due) {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }
}
