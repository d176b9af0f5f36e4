use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Result of walking all scan roots.
pub struct ScanResult {
    /// Media files found, sorted for deterministic evaluation order.
    pub files: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Walk each root recursively and collect media files. Unreadable
/// entries become warnings, not errors.
pub fn scan_roots(roots: &[PathBuf]) -> ScanResult {
    let mut files = Vec::new();
    let mut warnings = Vec::new();

    for root in roots {
        eprintln!("Scanning: {}", root.display());
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warnings.push(format!("walk error: {}", err));
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            if !is_media(entry.path()) {
                continue;
            }
            files.push(entry.into_path());
        }
    }

    files.sort();
    ScanResult { files, warnings }
}

/// Check if a path looks like a photo or video. AVCHD `.mts` streams
/// are whitelisted separately; mime_guess maps them outside video/.
fn is_media(path: &Path) -> bool {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let is_mts = filename.to_lowercase().ends_with(".mts");

    match mime_guess::from_path(filename).first() {
        Some(m) => {
            m.type_() == mime_guess::mime::IMAGE || m.type_() == mime_guess::mime::VIDEO || is_mts
        }
        None => is_mts,
    }
}
