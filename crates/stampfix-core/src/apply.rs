use std::path::PathBuf;

use chrono::DateTime;
use chrono_tz::Tz;
use filetime::FileTime;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::rules::Rule;

/// One decided correction, ready to be written back.
#[derive(Debug, Clone)]
pub struct Correction {
    pub path: PathBuf,
    pub rule: Rule,
    pub current: DateTime<Tz>,
    pub corrected: DateTime<Tz>,
}

pub struct ApplyResult {
    pub applied: u64,
    pub warnings: Vec<String>,
}

/// Write corrected mtimes in parallel. With `dry_run` the planned
/// changes are printed and nothing is touched. Per-file write failures
/// become warnings, not errors.
pub fn apply(corrections: &[Correction], dry_run: bool) -> ApplyResult {
    if dry_run {
        for c in corrections {
            println!(
                "{}: {} -> {} ({})",
                c.path.display(),
                c.current,
                c.corrected,
                c.rule.name()
            );
        }
        return ApplyResult { applied: 0, warnings: Vec::new() };
    }

    let pb = ProgressBar::new(corrections.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} updating mtimes")
            .unwrap(),
    );

    let warnings: Vec<String> = corrections
        .par_iter()
        .filter_map(|c| {
            let ft = FileTime::from_unix_time(
                c.corrected.timestamp(),
                c.corrected.timestamp_subsec_nanos(),
            );
            let result = filetime::set_file_mtime(&c.path, ft)
                .err()
                .map(|err| format!("{}: {}", c.path.display(), err));
            pb.inc(1);
            result
        })
        .collect();

    pb.finish_and_clear();

    ApplyResult {
        applied: corrections.len() as u64 - warnings.len() as u64,
        warnings,
    }
}
