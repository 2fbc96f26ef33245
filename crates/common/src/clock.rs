//! Clock and timing utilities for log time normalization.
//!
//! Head-tracking logs stamp every frame with an absolute wall-clock time.
//! This module provides utilities for:
//! - Parsing the fixed `dd-MM-yyyy HH-mm-ss-fff` timestamp pattern
//! - Anchoring a log to the epoch of its first data record
//! - Breaking an elapsed duration into whole seconds and minutes

use std::fmt;

use chrono::{Duration, NaiveDateTime};

use crate::error::{HeadtrackError, HeadtrackResult};

/// `chrono` format string for log timestamps (`10-03-2016 14-22-10-250`).
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H-%M-%S-%3f";

/// Parse an absolute log timestamp.
///
/// `line` is only used for error context.
pub fn parse_timestamp(raw: &str, line: usize) -> HeadtrackResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|e| {
        HeadtrackError::timestamp_parse(
            line,
            format!("'{raw}' does not match dd-MM-yyyy HH-mm-ss-fff ({e})"),
        )
    })
}

/// Non-negative time elapsed since the first data record of a log.
///
/// Keeps millisecond precision; the whole-second views truncate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Elapsed {
    millis: u64,
}

impl Elapsed {
    pub const ZERO: Elapsed = Elapsed { millis: 0 };

    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::from_millis(secs * 1_000)
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Elapsed time as fractional seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.millis as f64 / 1_000.0
    }

    /// Floor of the total elapsed seconds. This is the emitted value.
    pub fn whole_seconds(&self) -> u64 {
        self.millis / 1_000
    }

    /// Seconds component of the duration, `0..60`.
    pub fn seconds_component(&self) -> u64 {
        self.whole_seconds() % 60
    }

    /// Minutes component of the duration, `0..60`.
    pub fn minutes_component(&self) -> u64 {
        (self.whole_seconds() / 60) % 60
    }

    fn from_duration(delta: Duration) -> Option<Self> {
        u64::try_from(delta.num_milliseconds())
            .ok()
            .map(Self::from_millis)
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.whole_seconds();
        write!(
            f,
            "{}:{:02}:{:02}.{:03}",
            total / 3600,
            self.minutes_component(),
            self.seconds_component(),
            self.millis % 1_000
        )
    }
}

/// Converts absolute record timestamps into time elapsed since the first.
///
/// The first observed timestamp becomes the epoch and is reported as
/// exactly zero without subtracting it from itself.
#[derive(Debug, Clone, Default)]
pub struct LogClock {
    epoch: Option<NaiveDateTime>,
}

impl LogClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The epoch, once the first record has been observed.
    pub fn epoch(&self) -> Option<NaiveDateTime> {
        self.epoch
    }

    /// Observe the raw timestamp of the next record and return its elapsed time.
    pub fn observe(&mut self, raw: &str, line: usize) -> HeadtrackResult<Elapsed> {
        let timestamp = parse_timestamp(raw, line)?;
        match self.epoch {
            None => {
                self.epoch = Some(timestamp);
                Ok(Elapsed::ZERO)
            }
            Some(epoch) => Elapsed::from_duration(timestamp - epoch).ok_or_else(|| {
                HeadtrackError::timestamp_parse(
                    line,
                    format!("'{raw}' precedes the first record ({epoch})"),
                )
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_with_millis() {
        let ts = parse_timestamp("10-03-2016 14-22-10-250", 2).unwrap();
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.minute(), 22);
        assert_eq!(ts.second(), 10);
        assert_eq!(ts.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_timestamp_rejects_other_patterns() {
        let err = parse_timestamp("2016-03-10T14:22:10.250", 5).unwrap_err();
        assert!(matches!(err, HeadtrackError::TimestampParse { line: 5, .. }));
        assert!(parse_timestamp("10-03-2016 14-22-10", 5).is_err());
        assert!(parse_timestamp("", 5).is_err());
    }

    #[test]
    fn test_first_observation_is_zero() {
        let mut clock = LogClock::new();
        let elapsed = clock.observe("10-03-2016 14-22-10-999", 2).unwrap();
        assert_eq!(elapsed, Elapsed::ZERO);
        assert!(clock.epoch().is_some());
    }

    #[test]
    fn test_elapsed_truncates_fractional_seconds() {
        let mut clock = LogClock::new();
        clock.observe("10-03-2016 14-22-10-000", 2).unwrap();
        let elapsed = clock.observe("10-03-2016 14-22-11-999", 3).unwrap();
        assert_eq!(elapsed.as_millis(), 1_999);
        assert_eq!(elapsed.whole_seconds(), 1);
    }

    #[test]
    fn test_elapsed_across_midnight() {
        let mut clock = LogClock::new();
        clock.observe("10-03-2016 23-59-59-500", 2).unwrap();
        let elapsed = clock.observe("11-03-2016 00-00-01-000", 3).unwrap();
        assert_eq!(elapsed.as_millis(), 1_500);
    }

    #[test]
    fn test_timestamp_before_epoch_is_rejected() {
        let mut clock = LogClock::new();
        clock.observe("10-03-2016 14-22-10-000", 2).unwrap();
        let err = clock.observe("10-03-2016 14-22-09-000", 3).unwrap_err();
        assert!(matches!(err, HeadtrackError::TimestampParse { line: 3, .. }));
    }

    #[test]
    fn test_elapsed_components() {
        let elapsed = Elapsed::from_millis(3_725_400); // 1h 2m 5.4s
        assert_eq!(elapsed.whole_seconds(), 3_725);
        assert_eq!(elapsed.seconds_component(), 5);
        assert_eq!(elapsed.minutes_component(), 2);
        assert_eq!(elapsed.to_string(), "1:02:05.400");
        assert!((elapsed.as_secs_f64() - 3725.4).abs() < 1e-9);
    }
}
