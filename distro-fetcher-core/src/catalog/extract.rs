//! Supported release extraction
//!
//! Walks products → versions → items and keeps every build that is still
//! inside its support window, ships a `disk1.img` for the requested
//! architecture and carries a well-formed pubname.

use chrono::NaiveDate;
use tracing::{debug, trace};

use super::date::{has_expired_on, today};
use super::index::{Catalog, Product, VersionEntry};
use super::pubname::Pubname;
use super::release::{rank, rank_records, ReleaseRecord, LTS_MARKER};

impl Catalog {
    /// Release records for `arch` that are supported today, in catalog order
    pub fn release_records(&self, arch: &str) -> Vec<ReleaseRecord> {
        self.release_records_on(today(), arch)
    }

    /// Release records for `arch` that are supported on `today`, in catalog order
    pub fn release_records_on(&self, today: NaiveDate, arch: &str) -> Vec<ReleaseRecord> {
        let records: Vec<ReleaseRecord> = self
            .products()
            .flat_map(|(key, product)| product_records(key, product, today, arch))
            .collect();

        debug!(
            "Extracted {} {} release(s) from {} product(s)",
            records.len(),
            arch,
            self.product_count()
        );
        records
    }

    /// Formatted, newest-first release lines, at most `max_count` of them
    pub fn supported_releases_on(
        &self,
        today: NaiveDate,
        arch: &str,
        max_count: Option<usize>,
    ) -> Vec<String> {
        let lines = self
            .release_records_on(today, arch)
            .iter()
            .map(ToString::to_string)
            .collect();
        rank(lines, max_count)
    }

    /// Newest-first release records, at most `max_count` of them
    pub fn ranked_records_on(
        &self,
        today: NaiveDate,
        arch: &str,
        max_count: Option<usize>,
    ) -> Vec<ReleaseRecord> {
        rank_records(self.release_records_on(today, arch), max_count)
    }
}

fn product_records(key: &str, product: &Product, today: NaiveDate, arch: &str) -> Vec<ReleaseRecord> {
    let Some(support_eol) = product.support_eol.value() else {
        debug!("Skipping product {}: no support_eol", key);
        return Vec::new();
    };
    if has_expired_on(support_eol, today) {
        debug!("Skipping product {}: support ended {}", key, support_eol);
        return Vec::new();
    }

    let Some(release_title) = product.release_title.value() else {
        debug!("Skipping product {}: no release_title", key);
        return Vec::new();
    };
    let is_lts = release_title.contains(LTS_MARKER);

    let Some(versions) = product.versions.value() else {
        debug!("Skipping product {}: no versions", key);
        return Vec::new();
    };

    versions
        .iter()
        .filter_map(|(date_key, entry)| {
            let record = release_record(date_key, entry.value()?, is_lts, arch);
            if record.is_none() {
                trace!("Skipping version {} of {}", date_key, key);
            }
            record
        })
        .collect()
}

fn release_record(
    date_key: &str,
    entry: &VersionEntry,
    is_lts: bool,
    arch: &str,
) -> Option<ReleaseRecord> {
    let path = entry.disk_image()?.path.value()?;
    if !path.contains(arch) {
        return None;
    }

    let pubname = Pubname::parse(entry.pubname.value()?)?;
    let date = iso_date_from_key(date_key)?;

    Some(ReleaseRecord {
        date,
        version: pubname.version.to_string(),
        codename: pubname.codename.to_string(),
        is_lts,
    })
}

/// Turn a compact `YYYYMMDD` version key into `YYYY-MM-DD`.
///
/// Keys that are not exactly 8 bytes are rejected.
pub fn iso_date_from_key(key: &str) -> Option<String> {
    if key.len() != 8 {
        return None;
    }
    Some(format!("{}-{}-{}", key.get(0..4)?, key.get(4..6)?, key.get(6..8)?))
}
