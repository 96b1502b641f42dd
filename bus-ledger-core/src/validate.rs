//! Format checks guarding entry into the ledger.
//!
//! These are plain predicates; the ledger turns a `false` into
//! [`LedgerError::InvalidFormat`](crate::error::LedgerError::InvalidFormat)
//! naming the offending field.

use regex::Regex;
use std::sync::LazyLock;

/// `H:MM AM` or `HH:MM PM`, hour 1-12 (optionally zero padded), one space before the marker.
static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(0?[1-9]|1[0-2]):[0-5][0-9] (?i:AM|PM)$").expect("invalid time pattern")
});

/// Exactly four ASCII decimal digits.
pub fn validate_bus_number(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Twelve-hour clock time such as `9:05 am` or `12:30 PM`. Seconds are not accepted.
pub fn validate_time(s: &str) -> bool {
    TIME_PATTERN.is_match(s)
}

/// Only the literal empty string fails; whitespace counts as content.
pub fn validate_non_empty(s: &str) -> bool {
    !s.is_empty()
}
