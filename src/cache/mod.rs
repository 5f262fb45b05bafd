//! Cache module for feature flag values
//!
//! This module provides the in-memory flag cache that answers boolean flag
//! queries instantly from the last fetched snapshot and keeps that snapshot
//! reasonably fresh via asynchronous background refresh. Queries never block
//! on network activity; a stale snapshot is served while a refresh replaces
//! it in the background.

mod flag_cache;

pub use flag_cache::{FlagCache, DEFAULT_STALE_AFTER};
