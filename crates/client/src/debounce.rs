//! Timer-based coalescing for bursty input.
//!
//! `Debouncer` collapses calls inside a quiet window into the last one;
//! `Throttle` lets the first call of each window through and drops the rest.
//! Both sit on tokio timers, so they need a runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A delayed action that can be called off.
///
/// Dropping the timer cancels it.
#[derive(Debug)]
pub struct CancellableTimer {
    handle: Option<JoinHandle<()>>,
}

impl CancellableTimer {
    /// Run `action` once `delay` has elapsed, unless cancelled first.
    pub fn start<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        Self { handle: Some(handle) }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// `true` until the action has run or the timer was cancelled.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CancellableTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

type Sink<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Deliver only the last value of each burst, `window` after the burst ends.
pub struct Debouncer<T> {
    window: Duration,
    sink: Sink<T>,
    timer: Option<CancellableTimer>,
}

impl<T> core::fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Debouncer")
            .field("window", &self.window)
            .field("pending", &self.is_pending())
            .finish()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new(window: Duration, sink: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            window,
            sink: Arc::new(sink),
            timer: None,
        }
    }

    /// Debouncer whose settled values arrive on a channel.
    pub fn channel(window: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self::new(window, move |value| {
            if tx.send(value).is_err() {
                tracing::debug!("debounced value dropped: receiver closed");
            }
        });
        (debouncer, rx)
    }

    /// Replace any pending value with `value` and restart the window.
    pub fn call(&mut self, value: T) {
        self.cancel();
        let sink = Arc::clone(&self.sink);
        self.timer = Some(CancellableTimer::start(self.window, move || sink(value)));
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

impl<T> Debouncer<T> {
    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn is_pending(&self) -> bool {
        self.timer.as_ref().is_some_and(CancellableTimer::is_pending)
    }
}

/// Admit at most one call per `window`.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last_admitted: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_admitted: None,
        }
    }

    /// `true` if a call may run now; starts a new window when it does.
    pub fn try_acquire(&mut self) -> bool {
        let now = Instant::now();
        match self.last_admitted {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_admitted = Some(now);
                true
            }
        }
    }

    /// Run `f` if the throttle admits it.
    pub fn call<R>(&mut self, f: impl FnOnce() -> R) -> Option<R> {
        self.try_acquire().then(f)
    }
}
