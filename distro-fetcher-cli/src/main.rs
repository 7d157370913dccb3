//! ubuntu-fetcher - query Ubuntu cloud image releases
//!
//! Runs exactly one query per invocation against the published catalog
//! (or a local copy of it).

use anyhow::{Context, Result};
use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use distro_fetcher_core::config::FetcherConfig;

mod release_cli;

use release_cli::Query;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "ubuntu-fetcher",
    about = "List supported Ubuntu cloud image releases and their disk image digests",
    version,
    after_help = "Examples:\n    ubuntu-fetcher --list-releases\n    ubuntu-fetcher --hash 2025-04-03"
)]
struct Cli {
    #[clap(flatten)]
    operation: Operation,

    /// Show at most this many releases with --list-releases
    #[clap(long, value_name = "N", requires = "list_releases")]
    max_count: Option<usize>,

    /// Catalog URL (overrides the configured one)
    #[clap(long)]
    url: Option<String>,

    /// Read the catalog from a local file instead of downloading it
    #[clap(long, value_name = "PATH", conflicts_with = "url")]
    catalog_file: Option<PathBuf>,

    /// Architecture to select (default: amd64)
    #[clap(long)]
    arch: Option<String>,

    /// Output results as JSON
    #[clap(long)]
    json: bool,

    /// Configuration file (default: platform config dir)
    #[clap(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Set log level
    #[clap(long, default_value = "warn")]
    log_level: LogLevel,
}

/// The one query to run
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Operation {
    /// List all supported Ubuntu releases
    #[clap(long)]
    list_releases: bool,

    /// Get the current Ubuntu LTS version
    #[clap(long)]
    current_lts: bool,

    /// Get the SHA256 digest of the 'disk1.img' file for a release date
    #[clap(long, value_name = "RELEASE_DATE")]
    hash: Option<String>,
}

impl Operation {
    fn into_query(self, max_count: Option<usize>) -> Query {
        if let Some(date) = self.hash {
            Query::Hash { date }
        } else if self.current_lts {
            Query::CurrentLts
        } else {
            Query::ListReleases { max_count }
        }
    }
}

/// Initialize tracing with CLI flags
///
/// RUST_LOG directives are honoured on top of --log-level.
fn initialize_tracing(log_level: &LogLevel) {
    let mut filter = EnvFilter::new(log_level.to_filter_directive());

    if let Ok(env) = std::env::var("RUST_LOG") {
        for directive in env.split(',').filter(|d| !d.is_empty()) {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    // Logs go to stderr; stdout carries only results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the config file and apply CLI overrides
fn resolve_config(cli: &Cli) -> Result<FetcherConfig> {
    let mut config = match &cli.config {
        Some(path) => FetcherConfig::load_from_path(path)?,
        None => FetcherConfig::load().context("Failed to load configuration")?,
    };

    if let Some(url) = &cli.url {
        config.url = url.clone();
    }
    if let Some(arch) = &cli.arch {
        config.arch = arch.clone();
    }

    config.validate().context("Invalid command-line override")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_tracing(&cli.log_level);

    let config = resolve_config(&cli)?;
    let query = cli.operation.into_query(cli.max_count);

    match cli.catalog_file {
        Some(path) => release_cli::run_from_file(path, &config, query, cli.json).await,
        None => release_cli::run_from_url(&config, query, cli.json).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_operation_required() {
        assert!(Cli::try_parse_from(["ubuntu-fetcher"]).is_err());
        assert!(
            Cli::try_parse_from(["ubuntu-fetcher", "--list-releases", "--current-lts"]).is_err()
        );
        assert!(Cli::try_parse_from(["ubuntu-fetcher", "--hash"]).is_err());
    }

    #[test]
    fn test_parse_queries() {
        let cli = Cli::try_parse_from(["ubuntu-fetcher", "--list-releases", "--max-count", "3"])
            .unwrap();
        let max = cli.max_count;
        assert_eq!(
            cli.operation.into_query(max),
            Query::ListReleases { max_count: Some(3) }
        );

        let cli = Cli::try_parse_from(["ubuntu-fetcher", "--current-lts"]).unwrap();
        assert_eq!(cli.operation.into_query(None), Query::CurrentLts);

        let cli = Cli::try_parse_from(["ubuntu-fetcher", "--hash", "2025-04-03"]).unwrap();
        assert_eq!(
            cli.operation.into_query(None),
            Query::Hash {
                date: "2025-04-03".to_string()
            }
        );
    }

    #[test]
    fn test_max_count_only_with_list_releases() {
        assert!(
            Cli::try_parse_from(["ubuntu-fetcher", "--hash", "2025-04-03", "--max-count", "1"])
                .is_err()
        );
        assert!(
            Cli::try_parse_from(["ubuntu-fetcher", "--current-lts", "--max-count", "1"]).is_err()
        );
    }

    #[test]
    fn test_url_and_catalog_file_conflict() {
        let result = Cli::try_parse_from([
            "ubuntu-fetcher",
            "--list-releases",
            "--url",
            "https://example.com/catalog.json",
            "--catalog-file",
            "catalog.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "arch: arm64\nmax_attempts: 2\n").unwrap();

        let cli = Cli::try_parse_from([
            "ubuntu-fetcher",
            "--current-lts",
            "--config",
            config_path.to_str().unwrap(),
            "--url",
            "https://mirror.example.com/download.json",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.url, "https://mirror.example.com/download.json");
        assert_eq!(config.arch, "arm64");
        assert_eq!(config.max_attempts, 2);
    }

    #[test]
    fn test_invalid_overrides_are_rejected() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let config_arg = config_path.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "ubuntu-fetcher",
            "--list-releases",
            "--config",
            config_arg,
            "--arch",
            "",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());

        let cli = Cli::try_parse_from([
            "ubuntu-fetcher",
            "--current-lts",
            "--config",
            config_arg,
            "--url",
            "ftp://x",
        ])
        .unwrap();
        assert!(resolve_config(&cli).is_err());
    }
}
