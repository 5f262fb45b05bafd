//! Integration tests for CLI argument handling
//!
//! Tests the --endpoint option and flag-name positional from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_flagcache"))
        .args(args)
        .output()
        .expect("Failed to execute flagcache")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("flagcache"), "Help should mention flagcache");
    assert!(
        stdout.contains("endpoint"),
        "Help should mention --endpoint option"
    );
}

#[test]
fn test_missing_endpoint_prints_error_and_exits() {
    let output = run_cli(&["new_ui"]);
    assert!(
        !output.status.success(),
        "Expected missing --endpoint to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("endpoint") || stderr.contains("required"),
        "Should print error message about missing endpoint: {}",
        stderr
    );
}

#[test]
fn test_unreachable_endpoint_exits_with_fetch_error() {
    // Nothing listens on this port; the warm-up fetch fails, the cache stays
    // empty, and the binary reports a fetch error with status 2
    let output = run_cli(&["--endpoint", "http://127.0.0.1:1", "new_ui"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to fetch flags"),
        "Should report the failed fetch: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use flagcache::cli::Cli;

    #[test]
    fn test_cli_endpoint_is_required() {
        let result = Cli::try_parse_from(["flagcache"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_flag_is_optional() {
        let cli = Cli::parse_from(["flagcache", "--endpoint", "http://localhost:8080"]);
        assert!(cli.flag.is_none());
    }

    #[test]
    fn test_cli_flag_positional_is_captured() {
        let cli = Cli::parse_from(["flagcache", "--endpoint", "http://localhost:8080", "new_ui"]);
        assert_eq!(cli.flag.as_deref(), Some("new_ui"));
    }
}
