//! Utility functions and types.

use std::fmt::{self, Debug, Formatter};

/// Redact wraps a secret so that it can be printed in `Debug` output.
///
/// - Missing or empty secrets print as `EMPTY`.
/// - Secrets shorter than 12 bytes print as `***`.
/// - Longer secrets keep their first and last three characters, enough to tell
///   two keys apart in logs without leaking them.
pub struct Redact<'a>(Option<&'a str>);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(Some(value))
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            None | Some("") => f.write_str("EMPTY"),
            Some(v) => match (v.len() >= 12).then(|| (v.get(..3), v.get(v.len() - 3..))) {
                Some((Some(head), Some(tail))) => write!(f, "{head}***{tail}"),
                _ => f.write_str("***"),
            },
        }
    }
}
