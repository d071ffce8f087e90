//! Integration tests for CLI argument handling
//!
//! Tests the --page and --neo-date flags from the command line. Invalid values
//! must be rejected before the terminal is touched.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_orbitx"))
        .args(args)
        .output()
        .expect("Failed to execute orbitx")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("orbitx"), "Help should mention orbitx");
    assert!(stdout.contains("--page"), "Help should mention --page flag");
    assert!(stdout.contains("--neo-date"), "Help should mention --neo-date flag");
}

#[test]
fn test_invalid_page_prints_error_and_exits() {
    let output = run_cli(&["--page", "jupiter"]);
    assert!(!output.status.success(), "Expected invalid page to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid page"),
        "Should print error message about invalid page: {}",
        stderr
    );
}

#[test]
fn test_invalid_date_prints_error_and_exits() {
    let output = run_cli(&["--neo-date", "2025-13-01"]);
    assert!(!output.status.success(), "Expected invalid date to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid date"),
        "Should print error message about invalid date: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--telescope"]);
    assert!(!output.status.success());
}

#[test]
fn test_page_with_help_is_valid() {
    // With --help, it should succeed regardless of other flags
    let output = run_cli(&["--page", "neo", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use orbitx::app::Page;
    use orbitx::cli::{Cli, StartupConfig};
    use orbitx::config::AppConfig;

    #[test]
    fn test_cli_no_args_starts_home() {
        let cli = Cli::parse_from(["orbitx"]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(startup.start_page, Page::Home);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "orbitx",
            "--page",
            "earth",
            "--api-key",
            "my-key",
            "--neo-date",
            "2024-07-04",
        ]);
        let startup = StartupConfig::from_cli(&cli).unwrap();
        let mut config = AppConfig::default();
        config.apply_startup(&startup);

        assert_eq!(startup.start_page, Page::EarthView);
        assert_eq!(config.api_key, "my-key");
        assert_eq!(config.neo_date.to_string(), "2024-07-04");
    }
}
