//! Catalog document model and parsing
//!
//! The catalog is a simplestreams-style JSON document:
//!
//! ```text
//! products.<product>.support_eol            "2029-05-31"
//! products.<product>.release_title          "24.04 LTS"
//! products.<product>.versions.<YYYYMMDD>
//!     .pubname                              "ubuntu-noble-24.04-amd64-server-20250403"
//!     .items."disk1.img".path               "server/releases/noble/.../...amd64.img"
//!     .items."disk1.img".sha256             "9208750752bc..."
//! ```
//!
//! Only `products` is required. Every field beneath it is wrapped in
//! [`Lenient`], so an absent or wrong-shaped value reads as `None` and the
//! record that needed it is skipped instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

use super::CatalogError;

/// Item name of the primary disk image
pub const DISK_IMAGE_ITEM: &str = "disk1.img";

/// Architecture selected when none is configured
pub const DEFAULT_ARCH: &str = "amd64";

/// A field that is `None` when absent or not of the expected shape
#[derive(Debug, Clone, PartialEq)]
pub struct Lenient<T>(pub Option<T>);

impl<T> Default for Lenient<T> {
    fn default() -> Self {
        Lenient(None)
    }
}

impl<T> Lenient<T> {
    /// Borrow the value if it was present and well-formed
    pub fn value(&self) -> Option<&T> {
        self.0.as_ref()
    }
}

impl<'de, T> Deserialize<'de> for Lenient<T>
where
    T: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Lenient(serde_json::from_value(value).ok()))
    }
}

/// A parsed catalog
///
/// Maps are ordered, so products and versions are always visited in
/// ascending key order.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Products keyed by their opaque product id
    pub products: BTreeMap<String, Lenient<Product>>,
}

/// One product (a release stream for one architecture)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    /// Last supported day, `YYYY-MM-DD`
    #[serde(default)]
    pub support_eol: Lenient<String>,

    /// Human title, e.g. `24.04 LTS`
    #[serde(default)]
    pub release_title: Lenient<String>,

    /// Builds keyed by compact `YYYYMMDD` date
    #[serde(default)]
    pub versions: Lenient<BTreeMap<String, Lenient<VersionEntry>>>,
}

/// One published build of a product
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionEntry {
    /// Publish identifier, see [`super::Pubname`]
    #[serde(default)]
    pub pubname: Lenient<String>,

    /// Downloadable artifacts keyed by item name
    #[serde(default)]
    pub items: Lenient<BTreeMap<String, Lenient<Item>>>,
}

/// A downloadable artifact
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Item {
    /// Storage path relative to the mirror root
    #[serde(default)]
    pub path: Lenient<String>,

    /// SHA-256 of the artifact (hex)
    #[serde(default)]
    pub sha256: Lenient<String>,
}

impl Catalog {
    /// Parse a catalog from raw JSON text.
    ///
    /// Fails only when the text is not JSON, has no `products`, or
    /// `products` is not an object.
    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let mut root: serde_json::Value = serde_json::from_str(content)
            .map_err(|source| CatalogError::InvalidJson { source })?;

        let products = root
            .as_object_mut()
            .and_then(|object| object.remove("products"))
            .ok_or(CatalogError::MissingProducts)?;

        let products = BTreeMap::deserialize(products)
            .map_err(|source| CatalogError::InvalidJson { source })?;

        Ok(Self { products })
    }

    /// Well-formed products in key order
    pub fn products(&self) -> impl Iterator<Item = (&str, &Product)> {
        self.products
            .iter()
            .filter_map(|(key, product)| Some((key.as_str(), product.value()?)))
    }

    /// Number of product keys, well-formed or not
    pub fn product_count(&self) -> usize {
        self.products.len()
    }
}

impl VersionEntry {
    /// The primary disk image item, if present and well-formed
    pub fn disk_image(&self) -> Option<&Item> {
        self.items.value()?.get(DISK_IMAGE_ITEM)?.value()
    }
}
