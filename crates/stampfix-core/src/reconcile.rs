use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::config::{in_zone, Config};
use crate::date::PartialDate;
use crate::rules::Verdict;
use crate::stat::FileStat;

fn plausible_year(year: i32, stat: &FileStat, cfg: &Config) -> bool {
    if cfg.year_is_plausible(year) {
        return true;
    }
    eprintln!(
        "Year {} for file '{}' is outside the configured periods",
        year,
        stat.path.display()
    );
    false
}

/// Reconcile a parsed date+time: attach the zone resolved for the
/// parsed instant and the file's path, then convert to the system
/// zone. Equal to the current mtime means no correction.
pub fn with_zone(local: NaiveDateTime, stat: &FileStat, cfg: &Config) -> Verdict {
    if !plausible_year(local.year(), stat, cfg) {
        return Verdict::InSync;
    }

    let zone = cfg.zone_for(&local, &stat.path);
    let Some(instant) = in_zone(local, zone) else {
        // the local time does not exist in that zone (DST gap)
        return Verdict::InSync;
    };

    let adjusted = instant.with_timezone(&cfg.system_zone());
    if adjusted != stat.mtime {
        Verdict::Adjust(adjusted)
    } else {
        Verdict::InSync
    }
}

/// Reconcile a date with no explicit time: borrow the time-of-day from
/// the current mtime, and the month/day wherever the layout did not
/// carry them. A borrowed day that yields an impossible date (Feb 31)
/// is a non-match so the caller can try its next layout.
pub fn with_stat_time(date: PartialDate, stat: &FileStat, cfg: &Config) -> Verdict {
    if !plausible_year(date.year, stat, cfg) {
        return Verdict::InSync;
    }

    let month = date.month.unwrap_or_else(|| stat.mtime.month());
    let day = date.day.unwrap_or_else(|| stat.mtime.day());
    let Some(day_part) = NaiveDate::from_ymd_opt(date.year, month, day) else {
        return Verdict::NotApplicable;
    };

    let local = day_part.and_time(stat.mtime.time());
    let Some(combined) = in_zone(local, cfg.system_zone()) else {
        return Verdict::InSync;
    };

    if combined != stat.mtime {
        Verdict::Adjust(combined)
    } else {
        Verdict::InSync
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PeriodSpec;
    use chrono::TimeZone;
    use chrono_tz::{Asia, Europe};
    use std::path::PathBuf;

    fn naive(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn test_config() -> Config {
        Config::new(
            Europe::Moscow,
            vec![PeriodSpec {
                path: PathBuf::from("/archive"),
                start: naive("2019-01-01T00:00:00"),
                end: naive("2021-12-31T23:59:59"),
                zone: Asia::Tokyo,
            }],
        )
        .unwrap()
    }

    fn stat_at(path: &str, mtime: &str) -> FileStat {
        FileStat::new(
            PathBuf::from(path),
            Europe::Moscow
                .from_local_datetime(&naive(mtime))
                .unwrap(),
        )
    }

    #[test]
    fn test_with_zone_converts_period_zone_to_system() {
        let cfg = test_config();
        let stat = stat_at("/archive/IMG_20191127_194031.jpg", "2019-11-27T19:40:31");

        let expected = Asia::Tokyo
            .with_ymd_and_hms(2019, 11, 27, 19, 40, 31)
            .unwrap()
            .with_timezone(&Europe::Moscow);
        assert_eq!(
            with_zone(naive("2019-11-27T19:40:31"), &stat, &cfg),
            Verdict::Adjust(expected)
        );
    }

    #[test]
    fn test_with_zone_suppresses_noop() {
        let cfg = test_config();
        // outside every period scope, so the parsed instant is read in
        // the system zone and already equals the mtime
        let stat = stat_at("/other/IMG_20191127_194031.jpg", "2019-11-27T19:40:31");
        assert_eq!(with_zone(naive("2019-11-27T19:40:31"), &stat, &cfg), Verdict::InSync);
    }

    #[test]
    fn test_with_zone_implausible_year_abstains() {
        let cfg = test_config();
        let stat = stat_at("/archive/IMG_19800101_120000.jpg", "2020-01-01T12:00:00");
        assert_eq!(with_zone(naive("1980-01-01T12:00:00"), &stat, &cfg), Verdict::InSync);
    }

    #[test]
    fn test_with_stat_time_borrows_time_of_day() {
        let cfg = test_config();
        let stat = stat_at("/other/VID-20200412-WA0000.mp4", "2020-05-01T10:00:00");

        let date = PartialDate { year: 2020, month: Some(4), day: Some(12) };
        assert_eq!(
            with_stat_time(date, &stat, &cfg),
            Verdict::Adjust(
                Europe::Moscow.with_ymd_and_hms(2020, 4, 12, 10, 0, 0).unwrap()
            )
        );
    }

    #[test]
    fn test_with_stat_time_borrows_month_and_day() {
        let cfg = test_config();
        let stat = stat_at("/other/pic.jpg", "2021-05-07T08:30:00");

        let date = PartialDate { year: 2020, month: None, day: None };
        assert_eq!(
            with_stat_time(date, &stat, &cfg),
            Verdict::Adjust(
                Europe::Moscow.with_ymd_and_hms(2020, 5, 7, 8, 30, 0).unwrap()
            )
        );
    }

    #[test]
    fn test_with_stat_time_noop_and_bad_combinations() {
        let cfg = test_config();

        let stat = stat_at("/other/pic.jpg", "2020-04-12T10:00:00");
        let date = PartialDate { year: 2020, month: Some(4), day: Some(12) };
        assert_eq!(with_stat_time(date, &stat, &cfg), Verdict::InSync);

        // borrowed day 31 does not exist in February
        let stat = stat_at("/other/pic.jpg", "2020-01-31T10:00:00");
        let date = PartialDate { year: 2020, month: Some(2), day: None };
        assert_eq!(with_stat_time(date, &stat, &cfg), Verdict::NotApplicable);
    }
}
