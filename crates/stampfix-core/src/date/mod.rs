pub mod stamp;

use chrono::NaiveDate;

/// A date parsed from a filename or directory name. Month and day are
/// absent when the layout did not carry them; the reconciler borrows
/// the missing parts from the file's current mtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialDate {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Fixed-width date layouts tried against name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `YYYYMMDD`
    Compact,
    /// `YYYY-MM-DD`
    Dashed,
    /// `YYYY-MM`
    YearMonth,
    /// `YYYY`
    Year,
}

impl DateLayout {
    pub const fn width(self) -> usize {
        match self {
            DateLayout::Compact => 8,
            DateLayout::Dashed => 10,
            DateLayout::YearMonth => 7,
            DateLayout::Year => 4,
        }
    }

    /// Parse the prefix of `candidate` whose length matches this layout.
    /// Calendar-invalid dates (month 13, day 32) are rejected.
    pub fn parse_prefix(self, candidate: &str) -> Option<PartialDate> {
        let prefix = candidate.get(..self.width())?;
        let bytes = prefix.as_bytes();

        let digits = |range: std::ops::Range<usize>| -> Option<u32> {
            if !bytes[range.clone()].iter().all(u8::is_ascii_digit) {
                return None;
            }
            prefix[range].parse().ok()
        };

        let year = digits(0..4)? as i32;
        let (month, day) = match self {
            DateLayout::Compact => (Some(digits(4..6)?), Some(digits(6..8)?)),
            DateLayout::Dashed => {
                if bytes[4] != b'-' || bytes[7] != b'-' {
                    return None;
                }
                (Some(digits(5..7)?), Some(digits(8..10)?))
            }
            DateLayout::YearMonth => {
                if bytes[4] != b'-' {
                    return None;
                }
                (Some(digits(5..7)?), None)
            }
            DateLayout::Year => (None, None),
        };

        // Validate what was actually parsed; absent parts default to the
        // first of the month/year, which is always representable.
        NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))?;

        Some(PartialDate { year, month, day })
    }
}

/// Index of the first ASCII digit in `candidate`, skipping vendor
/// prefixes like `IMG_`, `VID_`, `PXL_`.
pub fn first_digit_index(candidate: &str) -> Option<usize> {
    candidate
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
}
