//! Publish identifier (`pubname`) parsing
//!
//! A pubname is a hyphen-delimited token string such as
//! `ubuntu-oracular-24.10-amd64-server-20250305`.

/// Minimum number of tokens in an accepted pubname
pub const MIN_TOKENS: usize = 6;

/// Positional fields of a pubname, borrowed from the source string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pubname<'a> {
    /// Distribution, e.g. `ubuntu`
    pub distro: &'a str,

    /// Release codename, e.g. `oracular`
    pub codename: &'a str,

    /// Release version, e.g. `24.10`
    pub version: &'a str,

    /// Architecture token, e.g. `amd64`
    pub arch: &'a str,

    /// Image role, e.g. `server`
    pub role: &'a str,

    /// Build serial, e.g. `20250305`
    pub serial: &'a str,

    /// Any tokens past the sixth
    pub extra: Vec<&'a str>,
}

impl<'a> Pubname<'a> {
    /// Split `identifier` on `-`.
    ///
    /// Returns `None` for fewer than [`MIN_TOKENS`] tokens or an empty codename.
    pub fn parse(identifier: &'a str) -> Option<Self> {
        let tokens: Vec<&'a str> = identifier.split('-').collect();
        if tokens.len() < MIN_TOKENS || tokens[1].is_empty() {
            return None;
        }

        Some(Self {
            distro: tokens[0],
            codename: tokens[1],
            version: tokens[2],
            arch: tokens[3],
            role: tokens[4],
            serial: tokens[5],
            extra: tokens[MIN_TOKENS..].to_vec(),
        })
    }
}
