// Argument parsing tests

use appstats::cli::Cli;
use clap::Parser;

#[test]
fn test_cli_app_name_only() {
    let cli = Cli::try_parse_from(["appstats", "web"]).unwrap();
    assert_eq!(cli.app_name, "web");
    assert_eq!(cli.port, None);
}

#[test]
fn test_cli_app_name_and_port() {
    let cli = Cli::try_parse_from(["appstats", "web", "9090"]).unwrap();
    assert_eq!(cli.port, Some(9090));
}

#[test]
fn test_cli_explicit_config() {
    let cli = Cli::try_parse_from(["appstats", "--config", "/etc/appstats.toml", "web"]).unwrap();
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/etc/appstats.toml"))
    );
}

#[test]
fn test_cli_requires_app_name() {
    assert!(Cli::try_parse_from(["appstats"]).is_err());
}

#[test]
fn test_cli_rejects_port_zero() {
    assert!(Cli::try_parse_from(["appstats", "web", "0"]).is_err());
}

#[test]
fn test_cli_rejects_non_numeric_port() {
    assert!(Cli::try_parse_from(["appstats", "web", "http"]).is_err());
}
