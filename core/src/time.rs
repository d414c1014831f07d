//! Time related utils.

use chrono::Utc;

/// DateTime in UTC, the only timezone signers care about.
pub type DateTime = chrono::DateTime<Utc>;

/// Current wall-clock time.
#[inline]
pub fn now() -> DateTime {
    Utc::now()
}

/// Format time into date: `20220313`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601 basic format: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}
