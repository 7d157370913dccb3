//! Release records, their fixed-width rendering and ranking

use serde::Serialize;
use std::fmt;

/// Substring that marks a long-term-support release
pub const LTS_MARKER: &str = "LTS";

/// Sentinel returned when a lookup finds nothing
pub const UNKNOWN: &str = "unknown";

/// Header printed above a release listing
pub const LIST_HEADER: &str = "Date           Version   Codename";

/// Rule printed between [`LIST_HEADER`] and the listing
pub const LIST_RULE: &str = "------------------------------------------";

const DATE_WIDTH: usize = 10;
const VERSION_WIDTH: usize = 5;
const CODENAME_WIDTH: usize = 12;

/// One supported image release
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Release date, `YYYY-MM-DD`
    pub date: String,

    /// Version string, e.g. `24.04`
    pub version: String,

    /// Lowercase codename as published, e.g. `noble`
    pub codename: String,

    /// Whether the owning product is an LTS release
    pub is_lts: bool,
}

impl ReleaseRecord {
    /// Codename with its first character uppercased
    pub fn display_codename(&self) -> String {
        capitalize(&self.codename)
    }
}

/// Fixed-column line: date, version, codename, then `LTS` when applicable.
///
/// Each column is space-padded on the right or truncated to its width.
impl fmt::Display for ReleaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{date:<dw$.dw$}     {version:<vw$.vw$}     {codename:<cw$.cw$}  {lts}",
            date = self.date,
            version = self.version,
            codename = self.display_codename(),
            lts = if self.is_lts { LTS_MARKER } else { "" },
            dw = DATE_WIDTH,
            vw = VERSION_WIDTH,
            cw = CODENAME_WIDTH,
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sort lines newest-first and keep at most `max_count` of them.
///
/// Lines lead with an ISO date, so descending string order is descending
/// chronological order; equal dates fall back to the rest of the line.
pub fn rank(mut lines: Vec<String>, max_count: Option<usize>) -> Vec<String> {
    lines.sort_unstable_by(|a, b| b.cmp(a));
    if let Some(max) = max_count {
        lines.truncate(max);
    }
    lines
}

/// Order records the same way [`rank`] orders their rendered lines
pub fn rank_records(records: Vec<ReleaseRecord>, max_count: Option<usize>) -> Vec<ReleaseRecord> {
    let mut keyed: Vec<(String, ReleaseRecord)> = records
        .into_iter()
        .map(|record| (record.to_string(), record))
        .collect();
    keyed.sort_unstable_by(|a, b| b.0.cmp(&a.0));
    if let Some(max) = max_count {
        keyed.truncate(max);
    }
    keyed.into_iter().map(|(_, record)| record).collect()
}

/// First LTS line of a ranked listing, or [`UNKNOWN`]
pub fn current_lts(ranked: &[String]) -> String {
    ranked
        .iter()
        .find(|line| line.contains(LTS_MARKER))
        .cloned()
        .unwrap_or_else(|| UNKNOWN.to_string())
}
