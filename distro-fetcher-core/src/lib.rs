//! Distro fetcher library exports

pub mod catalog;
pub mod config;
mod fetcher;

pub use fetcher::DistroFetcher;
