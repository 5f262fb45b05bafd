//! In-memory feature flag cache with background refresh
//!
//! Provides a `FlagCache` that holds the most recently fetched flag snapshot
//! and decides, on each query, whether the snapshot is stale enough to
//! warrant a fire-and-forget refresh from the configured [`FlagSource`].

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::warn;

use crate::flags::{FlagSnapshot, FlagSource};

/// How old a snapshot may get before a query schedules a refresh (5 minutes)
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Shared state behind a `FlagCache` handle
///
/// Mutated only by the refresh completion path. The mutex is held only for
/// cloning or replacing the snapshot pointer, never across an await.
struct CacheInner {
    /// Where flag values are fetched from
    source: Box<dyn FlagSource>,
    /// Staleness threshold for cached snapshots
    stale_after: chrono::Duration,
    /// The last successfully fetched snapshot, if any
    snapshot: Mutex<Option<Arc<FlagSnapshot>>>,
    /// Guard against overlapping refresh operations
    refresh_in_flight: AtomicBool,
}

impl CacheInner {
    /// Fetches a new snapshot and commits it, then clears the in-flight guard
    ///
    /// A failed fetch leaves the previous snapshot untouched; the next stale
    /// query will schedule another attempt.
    async fn run_refresh(&self) {
        match self.source.fetch_flags().await {
            Ok(values) => {
                *self.snapshot.lock() = Some(Arc::new(FlagSnapshot::now(values)));
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh feature flags");
            }
        }
        self.refresh_in_flight.store(false, Ordering::Release);
    }
}

/// In-memory cache of feature flag values with asynchronous refresh
///
/// All flags implicitly start toggled off: until the first successful fetch
/// completes, every query returns `false`. Queries on a snapshot older than
/// the staleness threshold schedule a background refresh, but still answer
/// from the cached data; it is only later queries that see the new values.
///
/// Cloning the cache is cheap and every clone shares the same state, so one
/// instance can be constructed at application startup and handed to each
/// consumer.
#[derive(Clone)]
pub struct FlagCache {
    inner: Arc<CacheInner>,
}

impl FlagCache {
    /// Creates a cache over the given source with the default staleness
    /// threshold of [`DEFAULT_STALE_AFTER`]
    pub fn new(source: impl FlagSource) -> Self {
        Self::with_stale_after(source, DEFAULT_STALE_AFTER)
    }

    /// Creates a cache with a custom staleness threshold
    ///
    /// Useful for testing or for deployments where flags are expected to
    /// change faster or slower than the default assumes.
    pub fn with_stale_after(source: impl FlagSource, stale_after: Duration) -> Self {
        let stale_after =
            chrono::Duration::from_std(stale_after).unwrap_or(chrono::Duration::MAX);
        Self {
            inner: Arc::new(CacheInner {
                source: Box::new(source),
                stale_after,
                snapshot: Mutex::new(None),
                refresh_in_flight: AtomicBool::new(false),
            }),
        }
    }

    /// Returns whether the named flag is currently enabled
    ///
    /// Answers synchronously from the cached snapshot and never blocks on
    /// the network. If the snapshot is absent or stale, a background refresh
    /// is scheduled first; this call still answers from the old data.
    ///
    /// # Returns
    /// * `false` if no fetch has succeeded yet
    /// * `false` (with a warning) if the flag name is unknown to the server
    /// * the server-provided boolean otherwise, with no coercion
    pub fn is_enabled(&self, name: &str) -> bool {
        let snapshot = self.inner.snapshot.lock().clone();

        let needs_refresh = snapshot
            .as_ref()
            .map_or(true, |s| s.is_stale(self.inner.stale_after));
        if needs_refresh {
            self.refresh();
        }

        let Some(snapshot) = snapshot else {
            return false;
        };
        match snapshot.values.get(name) {
            Some(enabled) => *enabled,
            None => {
                warn!(flag = name, "looked up unknown feature flag");
                false
            }
        }
    }

    /// Schedules a fire-and-forget refresh of the flag snapshot
    ///
    /// Returns immediately. If a refresh is already in flight this is a
    /// no-op; refreshes are never queued. On success the snapshot is
    /// replaced wholesale; on failure it is left untouched and a warning is
    /// emitted. Outside a Tokio runtime the refresh is skipped with a
    /// warning rather than panicking.
    pub fn refresh(&self) {
        if self.inner.refresh_in_flight.swap(true, Ordering::AcqRel) {
            return;
        }
        match Handle::try_current() {
            Ok(handle) => {
                let inner = Arc::clone(&self.inner);
                handle.spawn(async move { inner.run_refresh().await });
            }
            Err(_) => {
                self.inner.refresh_in_flight.store(false, Ordering::Release);
                warn!("flag refresh skipped: no async runtime available");
            }
        }
    }

    /// Refreshes the flag snapshot and waits for it to complete
    ///
    /// Same semantics as [`refresh`](Self::refresh), awaited inline; exposed
    /// for eager warm-up before the first query. Returns without fetching if
    /// a refresh is already in flight.
    pub async fn refresh_and_wait(&self) {
        if self.inner.refresh_in_flight.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.run_refresh().await;
    }

    /// Returns the current snapshot, if any fetch has succeeded yet
    pub fn snapshot(&self) -> Option<Arc<FlagSnapshot>> {
        self.inner.snapshot.lock().clone()
    }
}

impl fmt::Debug for FlagCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagCache")
            .field("stale_after", &self.inner.stale_after)
            .field("has_snapshot", &self.inner.snapshot.lock().is_some())
            .field(
                "refresh_in_flight",
                &self.inner.refresh_in_flight.load(Ordering::Acquire),
            )
            .finish()
    }
}
