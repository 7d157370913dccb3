//! Date-keyed `disk1.img` digest lookup

use tracing::debug;

use super::index::Catalog;
use super::release::UNKNOWN;

/// Normalize a release date to the compact `YYYYMMDD` version key.
///
/// Hyphens are stripped, so both `2025-04-03` and `20250403` are accepted.
/// Anything that does not leave exactly eight digits is rejected.
pub fn normalize_release_date(date: &str) -> Option<String> {
    let compact = date.replace('-', "");
    (compact.len() == 8 && compact.bytes().all(|b| b.is_ascii_digit())).then_some(compact)
}

impl Catalog {
    /// SHA-256 of the `disk1.img` released on `date`, or [`UNKNOWN`]
    pub fn disk1_sha256(&self, date: &str) -> String {
        self.find_disk1_sha256(date)
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Look up the `disk1.img` digest for `date`.
    ///
    /// Products are scanned in key order and the first one holding the date
    /// key decides the answer, even when that entry has no digest.
    pub fn find_disk1_sha256(&self, date: &str) -> Option<String> {
        let Some(key) = normalize_release_date(date) else {
            debug!("Rejecting malformed release date {:?}", date);
            return None;
        };

        let (product_key, entry) = self.products().find_map(|(product_key, product)| {
            let entry = product.versions.value()?.get(&key)?;
            Some((product_key, entry))
        })?;

        debug!("Release {} found under product {}", key, product_key);
        entry.value()?.disk_image()?.sha256.value().cloned()
    }
}
