use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

type SharedCall<T> = Shared<BoxFuture<'static, ChartResult<T>>>;
type InflightMap<T> = Arc<Mutex<HashMap<String, SharedCall<T>>>>;

/// Collapses concurrent calls for the same key into one underlying call.
///
/// The first caller for a key starts the work on the tokio runtime; callers
/// arriving while it runs await the same result, success or failure. The
/// key is released as soon as the work settles, so later calls start fresh.
/// Dropping a waiting caller never cancels the shared work.
pub struct SingleFlight<T> {
    inflight: InflightMap<T>,
}

impl<T> fmt::Debug for SingleFlight<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingleFlight")
            .field("in_flight", &self.inflight.lock().len())
            .finish()
    }
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

struct InflightGuard<T> {
    inflight: InflightMap<T>,
    key: String,
}

impl<T> Drop for InflightGuard<T> {
    fn drop(&mut self) {
        self.inflight.lock().remove(&self.key);
    }
}

impl<T> SingleFlight<T>
where
    T: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `call` unless a call for `key` is already in flight, in which
    /// case that call's outcome is returned instead.
    ///
    /// Must be awaited inside a tokio runtime.
    pub async fn run<F, Fut>(&self, key: &str, call: F) -> ChartResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ChartResult<T>> + Send + 'static,
    {
        let shared = {
            let mut inflight = self.inflight.lock();
            if let Some(existing) = inflight.get(key) {
                trace!(key, "joining in-flight call");
                existing.clone()
            } else {
                let guard = InflightGuard {
                    inflight: Arc::clone(&self.inflight),
                    key: key.to_owned(),
                };
                let work = call();
                // Registered under the same lock the guard takes on drop, so
                // a call that settles immediately cannot leave a stale entry.
                let handle = tokio::spawn(async move {
                    let _guard = guard;
                    work.await
                });
                let shared = async move {
                    handle.await.unwrap_or_else(|err| {
                        warn!(error = %err, "coalesced call aborted");
                        Err(ChartError::Transport(format!("coalesced call aborted: {err}")))
                    })
                }
                .boxed()
                .shared();
                inflight.insert(key.to_owned(), shared.clone());
                shared
            }
        };
        shared.await
    }

    /// Number of keys with a call currently running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inflight.lock().len()
    }

    #[must_use]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.inflight.lock().contains_key(key)
    }
}
