//! Host services: working directory, environment, clock, backoff.
//!
//! Resolvers reach the process only through [`Host`], so a run can be
//! replayed against a fake host in tests.

use rand::Rng;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Process-level services used by resolvers.
pub trait Host {
    /// Current working directory.
    fn current_dir(&self) -> Result<PathBuf, String>;

    /// Environment variable, None if unset or not unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Seconds since the Unix epoch (UTC).
    fn now_epoch_secs(&self) -> u64;

    /// Block the current thread.
    fn sleep(&self, duration: Duration);

    /// Random backoff in whole seconds, inclusive range.
    fn backoff_secs(&self, min: u64, max: u64) -> u64;
}

/// The real process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn current_dir(&self) -> Result<PathBuf, String> {
        std::env::current_dir().map_err(|e| format!("cannot access working directory: {}", e))
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn now_epoch_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn backoff_secs(&self, min: u64, max: u64) -> u64 {
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Broken-down UTC time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtcTime {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl UtcTime {
    /// Convert epoch seconds (no TZ, proleptic Gregorian).
    pub fn from_epoch_secs(secs: u64) -> Self {
        let days = secs / 86400;
        let time_secs = secs % 86400;

        let mut year = 1970i64;
        let mut remaining = days as i64;
        loop {
            let year_days = if is_leap(year) { 366 } else { 365 };
            if remaining < year_days {
                break;
            }
            remaining -= year_days;
            year += 1;
        }
        let leap = is_leap(year);
        let month_days = [31, if leap { 29 } else { 28 }, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        let mut month = 12;
        for (i, &md) in month_days.iter().enumerate() {
            if remaining < md {
                month = i as u32 + 1;
                break;
            }
            remaining -= md;
        }

        UtcTime {
            year,
            month,
            day: remaining as u32 + 1,
            hour: (time_secs / 3600) as u32,
            minute: ((time_secs % 3600) / 60) as u32,
            second: (time_secs % 60) as u32,
        }
    }

    /// `yymmdd-HHMMSS`, the suffix used for created resource names.
    pub fn resource_stamp(&self) -> String {
        format!(
            "{:02}{:02}{:02}-{:02}{:02}{:02}",
            self.year.rem_euclid(100),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }

    /// ISO 8601, e.g. `2026-02-16T14:00:00Z`.
    pub fn iso8601(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Resource name suffix for the host's current time.
pub fn resource_stamp(host: &dyn Host) -> String {
    UtcTime::from_epoch_secs(host.now_epoch_secs()).resource_stamp()
}

fn is_leap(y: i64) -> bool {
    (y % 4 == 0 && y % 100 != 0) || y % 400 == 0
}
