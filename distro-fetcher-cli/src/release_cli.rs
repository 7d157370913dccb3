//! Release query commands
//!
//! Builds a fetcher over the chosen catalog source, runs one query and
//! renders the answer as text or JSON on stdout.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

use distro_fetcher_core::catalog::{
    CatalogSource, FileCatalogSource, ReleaseRecord, LIST_HEADER, LIST_RULE,
};
use distro_fetcher_core::config::FetcherConfig;
use distro_fetcher_core::DistroFetcher;

/// One query per invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    ListReleases { max_count: Option<usize> },
    CurrentLts,
    Hash { date: String },
}

/// JSON payload for --current-lts
#[derive(Serialize)]
struct CurrentLtsOut<'a> {
    current_lts: &'a str,
}

/// JSON payload for --hash
#[derive(Serialize)]
struct DigestOut<'a> {
    date: &'a str,
    file: &'static str,
    sha256: &'a str,
}

/// Run `query` against a catalog saved on disk
pub async fn run_from_file(
    path: PathBuf,
    config: &FetcherConfig,
    query: Query,
    json: bool,
) -> Result<()> {
    let fetcher = DistroFetcher::new(FileCatalogSource::new(path)).with_arch(&config.arch);
    execute(&fetcher, query, json).await
}

/// Run `query` against the configured catalog URL
#[cfg(feature = "http")]
pub async fn run_from_url(config: &FetcherConfig, query: Query, json: bool) -> Result<()> {
    use distro_fetcher_core::catalog::HttpCatalogSource;

    let source =
        HttpCatalogSource::from_config(config).context("Failed to set up catalog download")?;
    let fetcher = DistroFetcher::new(source).with_arch(&config.arch);
    execute(&fetcher, query, json).await
}

/// Stub for when the http feature is disabled
#[cfg(not(feature = "http"))]
pub async fn run_from_url(_config: &FetcherConfig, _query: Query, _json: bool) -> Result<()> {
    anyhow::bail!("HTTP support is not enabled. Use --catalog-file or rebuild with --features http")
}

async fn execute<S: CatalogSource>(
    fetcher: &DistroFetcher<S>,
    query: Query,
    json: bool,
) -> Result<()> {
    tracing::debug!("Running {:?} for {}", query, fetcher.arch());
    match query {
        Query::ListReleases { max_count } => {
            if json {
                let records = fetcher
                    .supported_release_records(max_count)
                    .await
                    .context("Failed to list supported releases")?;
                println!("{}", render_records_json(&records)?);
            } else {
                let releases = fetcher
                    .supported_releases(max_count)
                    .await
                    .context("Failed to list supported releases")?;
                print!("{}", render_release_list(&releases));
            }
        }
        Query::CurrentLts => {
            let lts = fetcher
                .current_lts_version()
                .await
                .context("Failed to determine the current LTS release")?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&CurrentLtsOut { current_lts: &lts })?
                );
            } else {
                println!("{}", render_current_lts(&lts));
            }
        }
        Query::Hash { date } => {
            let digest = fetcher
                .disk1_sha256(&date)
                .await
                .with_context(|| format!("Failed to look up the disk image digest for {date}"))?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&DigestOut {
                        date: &date,
                        file: "disk1.img",
                        sha256: &digest,
                    })?
                );
            } else {
                println!("{}", render_digest(&date, &digest));
            }
        }
    }

    Ok(())
}

fn render_release_list(releases: &[String]) -> String {
    let mut out = format!("{LIST_HEADER}\n{LIST_RULE}\n");
    for release in releases {
        out.push_str(release);
        out.push('\n');
    }
    out
}

fn render_records_json(records: &[ReleaseRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).context("Failed to serialize releases")
}

fn render_current_lts(lts: &str) -> String {
    format!("Current Ubuntu LTS version: {lts}")
}

fn render_digest(date: &str, digest: &str) -> String {
    format!("Hash SHA256 digest of file 'disk1.img' for release date {date}: {digest}")
}
