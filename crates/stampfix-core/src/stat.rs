use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::config::Config;

/// One file under consideration: its path and its current modification
/// instant, normalized to the system zone. Built fresh per file and
/// immutable during rule evaluation.
#[derive(Debug, Clone)]
pub struct FileStat {
    pub path: PathBuf,
    pub mtime: DateTime<Tz>,
}

impl FileStat {
    pub fn new(path: PathBuf, mtime: DateTime<Tz>) -> Self {
        Self { path, mtime }
    }

    pub fn from_path(path: &Path, cfg: &Config) -> anyhow::Result<Self> {
        let modified = fs::metadata(path)?.modified()?;
        let utc: DateTime<Utc> = modified.into();
        Ok(Self::new(path.to_path_buf(), utc.with_timezone(&cfg.system_zone())))
    }

    /// Filename without the final extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::TimeZone;
    use chrono_tz::Europe;
    use filetime::FileTime;

    #[test]
    fn test_stem() {
        let mtime = Europe::Moscow.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let stat = FileStat::new(PathBuf::from("/a/IMG_20191127_194031.jpg"), mtime);
        assert_eq!(stat.stem(), "IMG_20191127_194031");
    }

    #[test]
    fn test_from_path_reads_mtime_in_system_zone() {
        let cfg = Config::new(Europe::Moscow, vec![]).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("IMG_0001.jpg");
        fs::write(&path, b"x").unwrap();

        let expected = Europe::Moscow.with_ymd_and_hms(2020, 4, 12, 10, 0, 0).unwrap();
        filetime::set_file_mtime(&path, FileTime::from_unix_time(expected.timestamp(), 0))
            .unwrap();

        let stat = FileStat::from_path(&path, &cfg).unwrap();
        assert_eq!(stat.mtime, expected);
        assert_eq!(stat.mtime.timezone(), Europe::Moscow);
    }
}
