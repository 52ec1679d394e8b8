//! Animation tick scheduling.
//!
//! DESIGN
//! ======
//! Each card gets at most one local task that waits on a fixed interval and
//! runs a single `on_tick` step per period. The card lives in an
//! `Rc<RefCell<_>>` shared with the host's event handlers; everything runs
//! on one thread inside a `tokio::task::LocalSet`, so a step and an event
//! handler never overlap and no lock is needed.
//!
//! CANCELLATION
//! ============
//! The task holds a strong reference to its card. Dropping the returned
//! [`TickHandle`] (or calling [`TickHandle::cancel`]) aborts the task so that
//! reference is released along with the card. [`TickHandle::shutdown`] also
//! waits until the task is gone.

#[cfg(test)]
#[path = "ticker_test.rs"]
mod ticker_test;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::card::{Action, Card, RectangleProvider};

/// Shortest period accepted; `tokio::time::interval` rejects zero.
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Owner of a running tick task. Aborts the task when dropped.
#[must_use = "dropping a TickHandle cancels the tick task"]
#[derive(Debug)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    /// Stop the task without waiting for it to unwind.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Whether the task has stopped running.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel the task and wait until it, and everything it captured, is dropped.
    pub async fn shutdown(mut self) {
        let Some(task) = self.task.take() else {
            return;
        };
        task.abort();
        match task.await {
            Ok(()) => {}
            Err(err) if err.is_cancelled() => debug!("tick task cancelled"),
            Err(err) => warn!(%err, "tick task ended abnormally"),
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Run `step` once per `period` on the current `LocalSet` until cancelled.
///
/// The first step runs one full period after spawning. Missed periods are
/// skipped rather than replayed in a burst.
pub fn spawn_tick_loop<F>(period: Duration, mut step: F) -> TickHandle
where
    F: FnMut() + 'static,
{
    let period = period.max(MIN_TICK_PERIOD);
    debug!(period_ms = period.as_millis(), "tick loop started");
    let task = tokio::task::spawn_local(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;
        loop {
            interval.tick().await;
            step();
        }
    });
    TickHandle { task: Some(task) }
}

/// Drive `card.on_tick()` every `period`, passing any resulting actions to `sink`.
///
/// A frame is skipped (with a warning) if the card is already borrowed when
/// the tick fires.
pub fn spawn_ticker<P, S>(card: Rc<RefCell<Card<P>>>, period: Duration, mut sink: S) -> TickHandle
where
    P: RectangleProvider + 'static,
    S: FnMut(&[Action]) + 'static,
{
    spawn_tick_loop(period, move || {
        let actions = match card.try_borrow_mut() {
            Ok(mut card) => card.on_tick(),
            Err(err) => {
                warn!(%err, "card busy, skipping tick");
                return;
            }
        };
        if !actions.is_empty() {
            sink(&actions);
        }
    })
}
