//! Release queries over a catalog source
//!
//! Every query fetches and parses a fresh catalog; nothing is kept between
//! calls.

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::{
    current_lts, normalize_release_date, Catalog, CatalogError, CatalogSource, ReleaseRecord,
    DEFAULT_ARCH, UNKNOWN,
};

/// Answers release questions using whatever source supplies the catalog
pub struct DistroFetcher<S> {
    source: S,
    arch: String,
    today: Option<NaiveDate>,
}

impl<S: CatalogSource> DistroFetcher<S> {
    /// Create a fetcher for the default architecture
    pub fn new(source: S) -> Self {
        Self {
            source,
            arch: DEFAULT_ARCH.to_string(),
            today: None,
        }
    }

    /// Select the architecture matched against `disk1.img` paths
    pub fn with_arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Evaluate support windows against a fixed day instead of the clock
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Architecture in use
    pub fn arch(&self) -> &str {
        &self.arch
    }

    async fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        debug!("Loading catalog from {}", self.source.describe());
        let content = self.source.fetch().await?;
        Catalog::from_json(&content)
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(crate::catalog::today)
    }

    /// Supported releases as formatted lines, newest first
    pub async fn supported_releases(
        &self,
        max_count: Option<usize>,
    ) -> Result<Vec<String>, CatalogError> {
        let catalog = self.load_catalog().await?;
        Ok(catalog.supported_releases_on(self.today(), &self.arch, max_count))
    }

    /// Supported releases as records, in the same order as [`Self::supported_releases`]
    pub async fn supported_release_records(
        &self,
        max_count: Option<usize>,
    ) -> Result<Vec<ReleaseRecord>, CatalogError> {
        let catalog = self.load_catalog().await?;
        Ok(catalog.ranked_records_on(self.today(), &self.arch, max_count))
    }

    /// Formatted line of the newest LTS release, or `"unknown"`
    pub async fn current_lts_version(&self) -> Result<String, CatalogError> {
        let ranked = self.supported_releases(None).await?;
        Ok(current_lts(&ranked))
    }

    /// SHA-256 of the `disk1.img` published on `date`, or `"unknown"`.
    ///
    /// A malformed date is answered without touching the source.
    pub async fn disk1_sha256(&self, date: &str) -> Result<String, CatalogError> {
        if normalize_release_date(date).is_none() {
            debug!("Release date {:?} is malformed; not fetching", date);
            return Ok(UNKNOWN.to_string());
        }

        let catalog = self.load_catalog().await?;
        Ok(catalog.disk1_sha256(date))
    }
}
