pub mod apply;
pub mod config;
pub mod date;
pub mod reconcile;
pub mod rules;
pub mod scan;
pub mod stat;

use std::path::PathBuf;

pub use config::Config;
pub use rules::{Rule, Verdict};
pub use stat::FileStat;

#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Directories (or single files) to scan.
    pub roots: Vec<PathBuf>,
    /// Report corrections without touching any file.
    pub dry_run: bool,
    /// Print every per-file rule decision.
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub files_scanned: u64,
    pub corrected: u64,
    pub in_sync: u64,
    /// Files no rule matched.
    pub unmatched: u64,
    /// Files whose metadata could not be read.
    pub skipped: u64,
    pub warnings: Vec<String>,
}

/// Run the full pipeline: scan the roots, evaluate the rules per file
/// (first applicable verdict wins), then write the corrections back.
pub fn process(options: &ProcessOptions, cfg: &Config) -> anyhow::Result<ProcessResult> {
    // Stage 1: collect candidate files
    let scan = scan::scan_roots(&options.roots);
    let mut warnings = scan.warnings;
    eprintln!("Found {} media files", scan.files.len());

    // Stage 2: evaluate rules
    let mut corrections: Vec<apply::Correction> = Vec::new();
    let mut in_sync = 0u64;
    let mut unmatched = 0u64;
    let mut skipped = 0u64;

    for path in &scan.files {
        let stat = match FileStat::from_path(path, cfg) {
            Ok(stat) => stat,
            Err(err) => {
                warnings.push(format!("{}: {}", path.display(), err));
                skipped += 1;
                continue;
            }
        };

        match rules::first_match(&stat, cfg) {
            Some((rule, Verdict::Adjust(corrected))) => {
                if options.verbose {
                    eprintln!(
                        "{}: {} -> {} ({})",
                        stat.path.display(),
                        stat.mtime,
                        corrected,
                        rule.name()
                    );
                }
                corrections.push(apply::Correction {
                    path: stat.path,
                    rule,
                    current: stat.mtime,
                    corrected,
                });
            }
            Some((rule, _)) => {
                if options.verbose {
                    eprintln!("{}: in sync ({})", stat.path.display(), rule.name());
                }
                in_sync += 1;
            }
            None => {
                if options.verbose {
                    eprintln!("{}: no date evidence", stat.path.display());
                }
                unmatched += 1;
            }
        }
    }

    // Stage 3: write mtimes back
    let applied = apply::apply(&corrections, options.dry_run);
    warnings.extend(applied.warnings);

    Ok(ProcessResult {
        files_scanned: scan.files.len() as u64,
        corrected: if options.dry_run {
            corrections.len() as u64
        } else {
            applied.applied
        },
        in_sync,
        unmatched,
        skipped,
        warnings,
    })
}
