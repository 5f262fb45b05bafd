//! Core data model for feature flags
//!
//! This module contains the types shared between the flag cache and the
//! HTTP client: the wire-level flag mapping, the timestamped snapshot the
//! cache holds, and the `FlagSource` seam used to fetch flag values.

pub mod client;

pub use client::{FlagsClient, FlagsError};

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use futures::future::BoxFuture;

/// Mapping from flag name to its boolean value
///
/// This is exactly the shape of the flags endpoint's JSON response body:
/// a flat object of booleans, with no nesting or metadata.
pub type FlagValues = HashMap<String, bool>;

/// An immutable capture of all flag values at a point in time
///
/// Snapshots are replaced wholesale by each successful fetch, never merged.
/// Consumers should treat any flag value as able to change between queries
/// and re-query rather than hold on to results.
#[derive(Debug, Clone)]
pub struct FlagSnapshot {
    /// The flag values as returned by the last successful fetch
    pub values: FlagValues,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FlagSnapshot {
    /// Creates a snapshot of the given values, stamped with the current time
    pub fn now(values: FlagValues) -> Self {
        Self {
            values,
            fetched_at: Utc::now(),
        }
    }

    /// Returns true if this snapshot is older than `stale_after`
    ///
    /// Staleness is advisory: a stale snapshot is still served to callers
    /// while a background refresh replaces it.
    pub fn is_stale(&self, stale_after: Duration) -> bool {
        Utc::now() - self.fetched_at > stale_after
    }
}

/// A source of flag values that the cache can refresh from
///
/// The production implementation is [`FlagsClient`]; tests substitute an
/// in-memory source. The returned future is boxed and `'static` so the cache
/// can drive it from a spawned background task.
pub trait FlagSource: Send + Sync + 'static {
    /// Fetches the complete flag set from the backing source
    fn fetch_flags(&self) -> BoxFuture<'static, Result<FlagValues, FlagsError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_now_records_current_time() {
        let before = Utc::now();
        let snapshot = FlagSnapshot::now(FlagValues::new());
        let after = Utc::now();

        assert!(snapshot.fetched_at >= before);
        assert!(snapshot.fetched_at <= after);
    }

    #[test]
    fn test_fresh_snapshot_is_not_stale() {
        let snapshot = FlagSnapshot::now(FlagValues::new());
        assert!(!snapshot.is_stale(Duration::minutes(5)));
    }

    #[test]
    fn test_old_snapshot_is_stale() {
        let snapshot = FlagSnapshot {
            values: FlagValues::new(),
            fetched_at: Utc::now() - Duration::minutes(10),
        };
        assert!(snapshot.is_stale(Duration::minutes(5)));
    }

    #[test]
    fn test_snapshot_at_zero_threshold_is_stale() {
        let snapshot = FlagSnapshot {
            values: FlagValues::new(),
            fetched_at: Utc::now() - Duration::milliseconds(1),
        };
        assert!(snapshot.is_stale(Duration::zero()));
    }
}
