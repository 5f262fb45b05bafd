//! Flagcache - Query a service's feature flags from the command line
//!
//! Fetches the flag set from the given endpoint once, then either lists all
//! flags or checks a single named flag. The exit status reflects the flag
//! state so the binary can gate shell scripts.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flagcache::cli::Cli;
use flagcache::{FlagCache, FlagsClient};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = FlagsClient::new(&cli.endpoint);
    let cache = FlagCache::new(client);

    // Eager warm-up: one fetch before answering anything
    cache.refresh_and_wait().await;

    let Some(snapshot) = cache.snapshot() else {
        eprintln!("error: failed to fetch flags from {}", cli.endpoint);
        return ExitCode::from(2);
    };

    match cli.flag {
        Some(name) => {
            if cache.is_enabled(&name) {
                println!("enabled");
                ExitCode::SUCCESS
            } else {
                println!("disabled");
                ExitCode::FAILURE
            }
        }
        None => {
            let mut names: Vec<&String> = snapshot.values.keys().collect();
            names.sort();
            for name in names {
                println!("{}\t{}", name, snapshot.values[name]);
            }
            ExitCode::SUCCESS
        }
    }
}
