use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Datelike, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::Deserialize;

/// One period entry as written in the config file. Start and end are
/// naive local timestamps interpreted in the system zone.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodSpec {
    pub path: PathBuf,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub zone: Tz,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    system_zone: Tz,
    #[serde(default)]
    periods: Vec<PeriodSpec>,
}

/// A historical interval during which files under `path` were authored
/// in `zone` rather than the system zone.
#[derive(Debug, Clone)]
pub struct Period {
    pub path: PathBuf,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub zone: Tz,
}

/// Read-only process-wide configuration: the system zone, the ordered
/// period table, and the set of plausible years derived from it.
#[derive(Debug, Clone)]
pub struct Config {
    system_zone: Tz,
    periods: Vec<Period>,
    valid_years: BTreeSet<i32>,
}

impl Config {
    pub fn new(system_zone: Tz, specs: Vec<PeriodSpec>) -> anyhow::Result<Self> {
        let mut periods = Vec::with_capacity(specs.len());
        let mut valid_years = BTreeSet::new();

        for spec in specs {
            valid_years.extend(spec.start.year()..=spec.end.year());
            periods.push(Period {
                start: in_zone(spec.start, system_zone)
                    .with_context(|| format!("period start for '{}'", spec.path.display()))?,
                end: in_zone(spec.end, system_zone)
                    .with_context(|| format!("period end for '{}'", spec.path.display()))?,
                path: spec.path,
                zone: spec.zone,
            });
        }

        Ok(Self { system_zone, periods, valid_years })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        let file: ConfigFile = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config '{}'", path.display()))?;
        Self::new(file.system_zone, file.periods)
    }

    pub fn system_zone(&self) -> Tz {
        self.system_zone
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn valid_years(&self) -> &BTreeSet<i32> {
        &self.valid_years
    }

    pub fn year_is_plausible(&self, year: i32) -> bool {
        self.valid_years.contains(&year)
    }

    /// The zone to apply to a date found in `path`. Periods are scanned
    /// in reverse declaration order so a later, more specific entry
    /// shadows an earlier, broader one; the candidate instant must fall
    /// inside the period range (inclusive) and the file's parent
    /// directory inside the period scope. Falls back to the system
    /// zone; never errors.
    pub fn zone_for(&self, local: &NaiveDateTime, path: &Path) -> Tz {
        let Some(parent) = path.parent() else {
            return self.system_zone;
        };
        let Some(instant) = in_zone(*local, self.system_zone) else {
            return self.system_zone;
        };

        for period in self.periods.iter().rev() {
            if !parent.starts_with(&period.path) {
                continue;
            }
            if period.start <= instant && instant <= period.end {
                return period.zone;
            }
        }
        self.system_zone
    }
}

/// Interpret a naive local timestamp in `zone`, taking the earlier
/// mapping when DST makes it ambiguous.
pub(crate) fn in_zone(local: NaiveDateTime, zone: Tz) -> Option<DateTime<Tz>> {
    zone.from_local_datetime(&local).earliest()
}
