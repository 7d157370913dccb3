//! Ubuntu cloud image catalog - release extraction and digest lookup
//!
//! This module turns the published simplestreams catalog into the handful
//! of answers the CLI needs.
//!
//! # Overview
//!
//! The catalog system allows callers to:
//! - List supported releases, newest first
//! - Pick the current LTS release
//! - Look up the `disk1.img` SHA-256 for a release date
//!
//! # Architecture
//!
//! ```text
//! CatalogSource (HTTP / file / in-memory)
//!     │  raw JSON
//!     ▼
//! Catalog::from_json        ← only `products` is mandatory
//!     │
//!     ├── release_records   ← support window, disk1.img + arch, pubname, date key
//!     │       │
//!     │       ▼
//!     │   ReleaseRecord (Display) → rank → current_lts
//!     │
//!     └── disk1_sha256      ← first product holding the date key
//! ```

mod date;
mod digest;
mod error;
mod extract;
mod index;
mod pubname;
mod release;
mod source;

pub use date::{has_expired, has_expired_on, today, SUPPORT_DATE_FORMAT};
pub use digest::normalize_release_date;
pub use error::CatalogError;
pub use extract::iso_date_from_key;
pub use index::{Catalog, Item, Lenient, Product, VersionEntry, DEFAULT_ARCH, DISK_IMAGE_ITEM};
pub use pubname::{Pubname, MIN_TOKENS};
pub use release::{
    current_lts, rank, rank_records, ReleaseRecord, LIST_HEADER, LIST_RULE, LTS_MARKER, UNKNOWN,
};
#[cfg(feature = "http")]
pub use source::HttpCatalogSource;
pub use source::{
    with_retry, CatalogSource, FileCatalogSource, RetryPolicy, StaticCatalogSource,
    DEFAULT_CATALOG_URL,
};

#[cfg(test)]
mod tests;
