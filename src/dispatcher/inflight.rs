//! In-flight task accounting and the completion barrier

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

/// Number of tasks that have been started but not yet reached a terminal
/// state.
///
/// Increments and decrements both happen under the same mutex. The
/// decrement lives in `InFlightGuard::drop`, so it runs exactly once per
/// task on every exit path, unwinding included.
#[derive(Debug, Default)]
pub struct InFlight {
    count: Mutex<usize>,
    idle: Notify,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register one task. Keep the guard alive for the task's whole life.
    pub fn enter(self: &Arc<Self>) -> InFlightGuard {
        *self.lock() += 1;
        InFlightGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Current count, read under the lock
    pub fn current(&self) -> usize {
        *self.lock()
    }

    /// Wait until the count reaches zero.
    ///
    /// Returns immediately if nothing is in flight. Registration with the
    /// `Notify` happens before the count is checked, so a decrement that
    /// lands in between cannot be missed.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.current() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        self.count.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds one slot in an `InFlight` count; releases it on drop
#[derive(Debug)]
pub struct InFlightGuard {
    tracker: Arc<InFlight>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut count = self.tracker.lock();
        *count -= 1;
        if *count == 0 {
            self.tracker.idle.notify_waiters();
        }
    }
}
