use std::fmt;
use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::time::{Duration, Instant};

/// How long a fetched value is served without asking the server again.
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60);

/// A value is stale when it was never fetched or is at least `window` old.
pub fn is_stale(now: Instant, fetched_at: Option<Instant>, window: Duration) -> bool {
    match fetched_at {
        None => true,
        Some(at) => now.saturating_duration_since(at) >= window,
    }
}

/// What a hook hands to the view: the last good value plus loading/error flags.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<V> {
    pub data: Option<V>,
    /// True while the first fetch for the key is in flight.
    pub is_loading: bool,
    /// True while any fetch for the key is in flight.
    pub is_validating: bool,
    pub error: Option<String>,
}

impl<V> QueryState<V> {
    pub fn idle() -> Self {
        Self {
            data: None,
            is_loading: false,
            is_validating: false,
            error: None,
        }
    }
}

struct Entry<V> {
    value: Option<V>,
    fetched_at: Option<Instant>,
    error: Option<String>,
    in_flight: bool,
    // Bumped whenever a fetch settles; lets waiters reuse the result they queued behind.
    settled: u64,
}

impl<V: Clone> Entry<V> {
    fn snapshot(&self) -> QueryState<V> {
        QueryState {
            data: self.value.clone(),
            is_loading: self.in_flight && self.value.is_none(),
            is_validating: self.in_flight,
            error: self.error.clone(),
        }
    }
}

struct Slot<V> {
    entry: Mutex<Entry<V>>,
    flight: tokio::sync::Mutex<()>,
}

impl<V> Slot<V> {
    fn new() -> Self {
        Self {
            entry: Mutex::new(Entry {
                value: None,
                fetched_at: None,
                error: None,
                in_flight: false,
                settled: 0,
            }),
            flight: tokio::sync::Mutex::new(()),
        }
    }
}

/// Marks a slot in flight for as long as it lives, so a fetch that is
/// cancelled mid-await does not leave the key stuck loading.
struct InFlight<'a, V> {
    entry: &'a Mutex<Entry<V>>,
    armed: bool,
}

impl<'a, V: Clone> InFlight<'a, V> {
    fn start(entry: &'a Mutex<Entry<V>>) -> Self {
        entry.lock().in_flight = true;
        Self { entry, armed: true }
    }

    fn settle<E: fmt::Display>(mut self, key: &str, result: Result<V, E>) -> QueryState<V> {
        self.armed = false;
        let mut entry = self.entry.lock();
        entry.in_flight = false;
        entry.settled += 1;
        match result {
            Ok(value) => {
                entry.value = Some(value);
                entry.fetched_at = Some(Instant::now());
                entry.error = None;
            }
            Err(e) => {
                tracing::warn!("Fetch for {} failed: {}", key, e);
                entry.error = Some(e.to_string());
            }
        }
        entry.snapshot()
    }
}

impl<V> Drop for InFlight<'_, V> {
    fn drop(&mut self) {
        if self.armed {
            self.entry.lock().in_flight = false;
        }
    }
}

/// Keyed cache with stale-while-revalidate semantics and one in-flight fetch per key.
pub struct QueryCache<V> {
    slots: Arc<DashMap<String, Arc<Slot<V>>>>,
    stale_time: Duration,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
            stale_time: self.stale_time,
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Default for QueryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Send + Sync + 'static> QueryCache<V> {
    pub fn new() -> Self {
        Self::with_stale_time(DEFAULT_STALE_TIME)
    }

    pub fn with_stale_time(stale_time: Duration) -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            stale_time,
        }
    }

    pub fn stale_time(&self) -> Duration {
        self.stale_time
    }

    fn slot(&self, key: &str) -> Arc<Slot<V>> {
        self.slots
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Slot::new()))
            .clone()
    }

    /// Current state for `key` without triggering a fetch.
    pub fn peek(&self, key: &str) -> QueryState<V> {
        match self.slots.get(key) {
            Some(slot) => slot.entry.lock().snapshot(),
            None => QueryState::idle(),
        }
    }

    /// Returns the cached value when fresh; otherwise runs `fetcher`.
    ///
    /// Callers that arrive while a fetch for the same key is running wait for
    /// it and share its outcome instead of issuing their own request. A failed
    /// fetch keeps the previous value and records the error; the next call
    /// tries again. Dropping the returned future mid-fetch clears the
    /// loading flags and lets the next caller fetch.
    pub async fn fetch<F, Fut, E>(&self, key: &str, fetcher: F) -> QueryState<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
        E: fmt::Display,
    {
        let slot = self.slot(key);
        let seen = slot.entry.lock().settled;

        let _turn = slot.flight.lock().await;
        {
            let entry = slot.entry.lock();
            if entry.settled != seen || !is_stale(Instant::now(), entry.fetched_at, self.stale_time) {
                return entry.snapshot();
            }
        }

        let flight = InFlight::start(&slot.entry);
        tracing::debug!("Fetching {}", key);
        let result = fetcher().await;
        flight.settle(key, result)
    }

    /// Marks `key` stale so the next `fetch` goes to the server. The old value
    /// stays visible until then.
    pub fn invalidate(&self, key: &str) {
        if let Some(slot) = self.slots.get(key) {
            slot.entry.lock().fetched_at = None;
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_fetcher(
        calls: &Arc<AtomicUsize>,
        value: &'static str,
    ) -> impl FnOnce() -> std::future::Ready<Result<String, String>> {
        let calls = Arc::clone(calls);
        move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(value.to_string()))
        }
    }

    #[test]
    fn test_is_stale() {
        let now = Instant::now();
        let window = Duration::from_secs(60);
        assert!(is_stale(now, None, window));
        assert!(!is_stale(now, Some(now), window));
        assert!(!is_stale(now + Duration::from_secs(59), Some(now), window));
        assert!(is_stale(now + Duration::from_secs(60), Some(now), window));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_value_is_served_from_cache() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        assert_eq!(first.data.as_deref(), Some("Budi"));

        tokio::time::advance(Duration::from_secs(30)).await;
        let second = cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        assert_eq!(second.data.as_deref(), Some("Budi"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetches_after_window() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        tokio::time::advance(Duration::from_secs(61)).await;
        let state = cache.fetch("me", counting_fetcher(&calls, "Budi Santoso")).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(state.data.as_deref(), Some("Budi Santoso"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_share_one_fetch() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks = (0..5).map(|_| {
            let cache = cache.clone();
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                cache
                    .fetch("me", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                        Ok::<_, String>("Budi".to_string())
                    })
                    .await
            })
        });
        let results = futures::future::join_all(tasks).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for result in results {
            assert_eq!(result.unwrap().data.as_deref(), Some("Budi"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch("a", counting_fetcher(&calls, "A")).await;
        cache.fetch("b", counting_fetcher(&calls, "B")).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.peek("a").data.as_deref(), Some("A"));
        assert_eq!(cache.peek("b").data.as_deref(), Some("B"));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_keeps_previous_value_and_retries_next_time() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        tokio::time::advance(Duration::from_secs(61)).await;

        let failed = cache
            .fetch("me", || async { Err::<String, _>("503 Service Unavailable") })
            .await;
        assert_eq!(failed.data.as_deref(), Some("Budi"));
        assert_eq!(failed.error.as_deref(), Some("503 Service Unavailable"));

        let recovered = cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(recovered.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_forces_refetch() {
        let cache = QueryCache::<String>::new();
        let calls = Arc::new(AtomicUsize::new(0));

        cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        cache.invalidate("me");
        assert_eq!(cache.peek("me").data.as_deref(), Some("Budi"));

        cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_peek_reports_loading_during_first_fetch() {
        let cache = QueryCache::<String>::new();
        assert_eq!(cache.peek("me"), QueryState::idle());

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let background = cache.clone();
        let handle = tokio::spawn(async move {
            background
                .fetch("me", move || async move {
                    let _ = rx.await;
                    Ok::<_, String>("Budi".to_string())
                })
                .await
        });

        // let the spawned fetch reach its await point
        tokio::task::yield_now().await;
        while !cache.peek("me").is_loading {
            tokio::task::yield_now().await;
        }
        let loading = cache.peek("me");
        assert!(loading.is_validating);
        assert!(loading.data.is_none());

        tx.send(()).unwrap();
        let done = handle.await.unwrap();
        assert!(!done.is_loading);
        assert_eq!(done.data.as_deref(), Some("Budi"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_fetch_clears_loading_flags() {
        let cache = QueryCache::<String>::new();
        let background = cache.clone();
        let handle = tokio::spawn(async move {
            background
                .fetch("me", || std::future::pending::<Result<String, String>>())
                .await
        });

        while !cache.peek("me").is_loading {
            tokio::task::yield_now().await;
        }
        handle.abort();
        assert!(handle.await.unwrap_err().is_cancelled());

        let state = cache.peek("me");
        assert!(!state.is_loading);
        assert!(!state.is_validating);

        let calls = Arc::new(AtomicUsize::new(0));
        let state = cache.fetch("me", counting_fetcher(&calls, "Budi")).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.data.as_deref(), Some("Budi"));
    }
}
