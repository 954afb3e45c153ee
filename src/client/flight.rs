//! Single-flight de-duplication of concurrent identical requests.

use std::collections::HashMap;
use std::future::Future;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use tokio::sync::oneshot;

/// Runs at most one piece of work per key at a time.
///
/// The first caller for a key (the leader) runs the work; callers arriving
/// while it is in flight wait for, and receive a clone of, the leader's
/// result. The key is released as soon as the work settles.
pub struct SingleFlight<V> {
    calls: Mutex<HashMap<String, Vec<oneshot::Sender<V>>>>,
}

impl<V: Clone> SingleFlight<V> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub async fn run<F, Fut>(&self, key: &str, work: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        loop {
            let waiter = {
                let mut calls = self.calls.lock();
                match calls.get_mut(key) {
                    Some(waiters) => {
                        let (tx, rx) = oneshot::channel();
                        waiters.push(tx);
                        Some(rx)
                    }
                    None => {
                        calls.insert(key.to_string(), Vec::new());
                        None
                    }
                }
            };

            let Some(rx) = waiter else {
                return self.lead(key, work).await;
            };

            tracing::debug!(key, "joining in-flight request");
            match rx.await {
                Ok(value) => return value,
                // Leader was dropped before settling; contend again.
                Err(_) => continue,
            }
        }
    }

    async fn lead<F, Fut>(&self, key: &str, work: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        // Releases the key (and with it every waiter) if we are cancelled.
        let guard = scopeguard::guard((), |()| {
            self.calls.lock().remove(key);
        });

        let value = work().await;
        ScopeGuard::into_inner(guard);

        let waiters = self.calls.lock().remove(key).unwrap_or_default();
        for waiter in waiters {
            let _ = waiter.send(value.clone());
        }
        value
    }

    /// Number of keys currently in flight.
    pub fn in_flight(&self) -> usize {
        self.calls.lock().len()
    }
}

impl<V: Clone> Default for SingleFlight<V> {
    fn default() -> Self {
        Self::new()
    }
}
