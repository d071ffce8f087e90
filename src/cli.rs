//! Command-line interface parsing for OrbitX
//!
//! This module handles parsing of CLI arguments using clap. Flags override the
//! config file; `--api-key` can also come from `NASA_API_KEY`.

use chrono::NaiveDate;
use clap::Parser;
use thiserror::Error;

use crate::app::Page;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified page name is not recognized
    #[error("Invalid page: '{0}'. Valid pages: home, iss, neo, exoplanets, earth, weather, missions")]
    InvalidPage(String),

    /// The NEO date is not a calendar date
    #[error("Invalid date: '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// OrbitX - Live space data in your terminal
#[derive(Parser, Debug)]
#[command(name = "orbitx")]
#[command(about = "Terminal dashboard for ISS position, near-Earth objects, exoplanets, Earth imagery, space weather and Mars missions")]
#[command(version)]
pub struct Cli {
    /// Page to open on startup
    ///
    /// Valid pages: home, iss, neo, exoplanets, earth, weather, missions
    #[arg(long, value_name = "PAGE")]
    pub page: Option<String>,

    /// Close-approach date for the near-Earth objects page
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub neo_date: Option<String>,

    /// NASA API key (defaults to DEMO_KEY)
    #[arg(long, value_name = "KEY", env = "NASA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Do not read or write the local feed cache
    #[arg(long)]
    pub no_cache: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupConfig {
    pub start_page: Page,
    pub api_key: Option<String>,
    pub neo_date: Option<NaiveDate>,
    pub no_cache: bool,
}

/// Parses a page name, accepting a few aliases
pub fn parse_page_arg(s: &str) -> Result<Page, CliError> {
    Page::from_arg(s).ok_or_else(|| CliError::InvalidPage(s.to_string()))
}

pub fn parse_date_arg(s: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the page or date is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let start_page = cli
            .page
            .as_deref()
            .map(parse_page_arg)
            .transpose()?
            .unwrap_or_default();
        let neo_date = cli.neo_date.as_deref().map(parse_date_arg).transpose()?;
        let api_key = cli.api_key.clone().filter(|key| !key.trim().is_empty());

        Ok(StartupConfig {
            start_page,
            api_key,
            neo_date,
            no_cache: cli.no_cache,
        })
    }
}
