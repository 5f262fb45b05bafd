//! Flagcache Library
//!
//! A client for the application's feature flag endpoint. Flag values are
//! cached in memory and queried synchronously; the cache refreshes itself
//! asynchronously in the background whenever a query finds it stale.

pub mod cache;
pub mod cli;
pub mod flags;

pub use cache::{FlagCache, DEFAULT_STALE_AFTER};
pub use flags::{FlagSnapshot, FlagSource, FlagValues, FlagsClient, FlagsError};
