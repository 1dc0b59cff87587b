//! Trailing-edge debounce with an explicit pending-timer handle.
//!
//! Every call made while a window is open cancels the window's timer and
//! re-arms it, replacing the pending input. When the timer finally elapses the
//! action runs once with the last input and every caller of that window
//! receives the same result.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub type Action<K, R> = Arc<dyn Fn(K) -> BoxFuture<'static, R> + Send + Sync>;

/// Timer task of the currently open window.
pub struct PendingTimer {
    handle: JoinHandle<()>,
}

impl PendingTimer {
    pub fn cancel(self) {
        self.handle.abort();
    }
}

struct Window<K, R> {
    generation: u64,
    latest: K,
    waiters: Vec<oneshot::Sender<R>>,
    timer: Option<PendingTimer>,
}

struct Shared<K, R> {
    next_generation: u64,
    pending: Option<Window<K, R>>,
    fired: u64,
}

pub struct Debouncer<K, R> {
    quiet: Duration,
    action: Action<K, R>,
    state: Arc<Mutex<Shared<K, R>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<K, R> Debouncer<K, R>
where
    K: Send + 'static,
    R: Clone + Send + 'static,
{
    pub fn new(quiet: Duration, action: Action<K, R>) -> Self {
        Debouncer {
            quiet,
            action,
            state: Arc::new(Mutex::new(Shared {
                next_generation: 0,
                pending: None,
                fired: 0,
            })),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Join the open window (or open one) with `input` as its latest value.
    /// The receiver resolves once the window fires; it errors only if the
    /// debouncer is dropped first.
    pub fn call(&self, input: K) -> oneshot::Receiver<R> {
        let (tx, rx) = oneshot::channel();
        let mut shared = lock(&self.state);
        shared.next_generation += 1;
        let generation = shared.next_generation;

        match shared.pending.as_mut() {
            Some(window) => {
                if let Some(timer) = window.timer.take() {
                    timer.cancel();
                }
                window.generation = generation;
                window.latest = input;
                window.waiters.push(tx);
            }
            None => {
                shared.pending = Some(Window {
                    generation,
                    latest: input,
                    waiters: vec![tx],
                    timer: None,
                });
            }
        }

        let timer = self.reschedule(generation);
        if let Some(window) = shared.pending.as_mut() {
            window.timer = Some(timer);
        }
        rx
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.state).pending.is_some()
    }

    /// Number of windows that have elapsed and run the action.
    pub fn fired(&self) -> u64 {
        lock(&self.state).fired
    }

    fn reschedule(&self, generation: u64) -> PendingTimer {
        let state = Arc::clone(&self.state);
        let action = Arc::clone(&self.action);
        let quiet = self.quiet;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiet).await;

            // A superseded timer may get here before its abort lands.
            let window = {
                let mut shared = lock(&state);
                let current = shared
                    .pending
                    .as_ref()
                    .is_some_and(|w| w.generation == generation);
                if current {
                    shared.fired += 1;
                    shared.pending.take()
                } else {
                    None
                }
            };
            let Some(window) = window else {
                return;
            };

            let result = (action)(window.latest).await;
            for waiter in window.waiters {
                let _ = waiter.send(result.clone());
            }
        });

        PendingTimer { handle }
    }
}

impl<K, R> Drop for Debouncer<K, R> {
    fn drop(&mut self) {
        let mut shared = lock(&self.state);
        if let Some(timer) = shared.pending.as_mut().and_then(|w| w.timer.take()) {
            timer.cancel();
        }
    }
}
