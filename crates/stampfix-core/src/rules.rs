use std::path::Path;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::config::Config;
use crate::date::{self, stamp, DateLayout};
use crate::reconcile;
use crate::stat::FileStat;

/// Outcome of one rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The rule's pattern did not match this file at all.
    NotApplicable,
    /// The pattern matched but the computed instant equals the current
    /// mtime; nothing to correct.
    InSync,
    /// The mtime should be corrected to this instant.
    Adjust(DateTime<Tz>),
}

impl Verdict {
    pub fn is_applicable(&self) -> bool {
        !matches!(self, Verdict::NotApplicable)
    }
}

/// The fixed, ordered set of timestamp heuristics. Each rule is pure
/// and independently evaluable; order only decides which applicable
/// verdict a first-match caller sees first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Date and time in the name, behind an optional vendor prefix.
    ///
    /// Examples:
    ///   IMG_20191127_194031.jpg, VID_20200801_081626_LS.mp4,
    ///   PXL_20230906_111508295.jpg, 20150617_191500.jpg
    DateAndTime,
    /// Date without time in the name, e.g. VID-20200412-WA0000.mp4.
    DateWithoutTime,
    /// Date in an ancestor directory name, e.g. /a/b/2020-12-31/SNC00001.jpg.
    DateInDir,
}

impl Rule {
    pub const ALL: [Rule; 3] = [Rule::DateAndTime, Rule::DateWithoutTime, Rule::DateInDir];

    pub fn name(self) -> &'static str {
        match self {
            Rule::DateAndTime => "date-and-time",
            Rule::DateWithoutTime => "date-without-time",
            Rule::DateInDir => "date-in-dir",
        }
    }

    pub fn evaluate(self, stat: &FileStat, cfg: &Config) -> Verdict {
        match self {
            Rule::DateAndTime => date_and_time(stat, cfg),
            Rule::DateWithoutTime => date_without_time(stat, cfg),
            Rule::DateInDir => date_in_dir(stat, cfg),
        }
    }
}

/// Evaluate rules in declaration order and return the first applicable
/// verdict, or `None` when no rule matches this file.
pub fn first_match(stat: &FileStat, cfg: &Config) -> Option<(Rule, Verdict)> {
    Rule::ALL
        .iter()
        .map(|rule| (*rule, rule.evaluate(stat, cfg)))
        .find(|(_, verdict)| verdict.is_applicable())
}

fn date_and_time(stat: &FileStat, cfg: &Config) -> Verdict {
    let stem = stat.stem();
    let Some(first) = date::first_digit_index(stem) else {
        return Verdict::NotApplicable;
    };
    let Some(token) = stem.get(first..first + stamp::STAMP_WIDTH) else {
        return Verdict::NotApplicable;
    };
    let Some(local) = stamp::parse_stamp(token) else {
        return Verdict::NotApplicable;
    };
    reconcile::with_zone(local, stat, cfg)
}

fn date_without_time(stat: &FileStat, cfg: &Config) -> Verdict {
    let stem = stat.stem();
    let Some(first) = date::first_digit_index(stem) else {
        return Verdict::NotApplicable;
    };
    let candidate = &stem[first..];

    for layout in [DateLayout::Compact, DateLayout::Dashed] {
        if let Some(date) = layout.parse_prefix(candidate) {
            return reconcile::with_stat_time(date, stat, cfg);
        }
    }
    Verdict::NotApplicable
}

fn date_in_dir(stat: &FileStat, cfg: &Config) -> Verdict {
    let Some(name) = anchor_dir_name(&stat.path, cfg) else {
        return Verdict::NotApplicable;
    };

    for layout in [DateLayout::Dashed, DateLayout::YearMonth, DateLayout::Year] {
        let Some(date) = layout.parse_prefix(name) else {
            continue;
        };
        match reconcile::with_stat_time(date, stat, cfg) {
            // borrowed month/day made an impossible date; try a less
            // specific layout
            Verdict::NotApplicable => continue,
            verdict => return verdict,
        }
    }
    Verdict::NotApplicable
}

/// Name of the nearest ancestor directory whose first four characters
/// are digits forming a plausible year. The check is deliberately
/// loose: `1999extra` anchors.
fn anchor_dir_name<'a>(path: &'a Path, cfg: &Config) -> Option<&'a str> {
    for parent in path.ancestors().skip(1) {
        let Some(name) = parent.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(prefix) = name.get(..4) else {
            continue;
        };
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let Ok(year) = prefix.parse::<i32>() else {
            continue;
        };
        if cfg.year_is_plausible(year) {
            return Some(name);
        }
    }
    None
}
