use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// `YYYYMMDD_HHMMSS`
pub const STAMP_WIDTH: usize = 15;

static STAMP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}_\d{6}$").unwrap());

/// Parse a full date+time token of exactly [`STAMP_WIDTH`] characters
/// shaped `YYYYMMDD_HHMMSS`. Any deviation in length, digit-ness or
/// separator is a non-match, as is a calendar-invalid date or time.
pub fn parse_stamp(candidate: &str) -> Option<NaiveDateTime> {
    if !STAMP_RE.is_match(candidate) {
        return None;
    }
    NaiveDateTime::parse_from_str(candidate, "%Y%m%d_%H%M%S").ok()
}
