//! Command-line interface parsing for flagcache
//!
//! This module handles parsing of CLI arguments using clap. The binary warms
//! the cache once against the given endpoint and then either lists all flags
//! or checks a single named flag.

use clap::Parser;

/// Flagcache - Query a service's feature flags from the command line
#[derive(Parser, Debug)]
#[command(name = "flagcache")]
#[command(about = "Fetch and query feature flags from a flags endpoint")]
#[command(version)]
pub struct Cli {
    /// Base URL of the service exposing the flags endpoint
    ///
    /// The flag values are fetched from `<URL>/app/features`, which must
    /// return a JSON object mapping flag names to booleans.
    #[arg(long, value_name = "URL")]
    pub endpoint: String,

    /// Flag name to check; all flags are listed when omitted
    ///
    /// When a name is given the binary prints `enabled` or `disabled` and
    /// exits with status 0 or 1 respectively, for use in scripts.
    #[arg(value_name = "FLAG")]
    pub flag: Option<String>,
}
