//! Support window checks for `support_eol` dates

use chrono::{Local, NaiveDate};

/// Format of `support_eol` values
pub const SUPPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Check whether `date` (`YYYY-MM-DD`) is strictly before today's local date.
///
/// A date that does not parse counts as expired.
pub fn has_expired(date: &str) -> bool {
    has_expired_on(date, today())
}

/// Same as [`has_expired`], measured against `today` instead of the clock.
pub fn has_expired_on(date: &str, today: NaiveDate) -> bool {
    match NaiveDate::parse_from_str(date, SUPPORT_DATE_FORMAT) {
        Ok(parsed) => parsed < today,
        Err(e) => {
            tracing::trace!("Treating unparseable date {:?} as expired: {}", date, e);
            true
        }
    }
}

/// Today's calendar date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
