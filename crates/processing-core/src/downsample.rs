//! One-sample-per-second downsampling.
//!
//! Logs are recorded at the display framerate. The downsampler keeps the
//! first record and then one record each time the elapsed seconds
//! component moves forward, including when it wraps from 59 back to a low
//! value in a new minute.

use headtrack_common::clock::Elapsed;

/// Phase of the downsampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownsampleState {
    /// No record seen yet.
    AwaitingFirst,
    /// First record emitted; comparing against the last emitted second.
    Steady,
}

/// Decides which records make it into the converted log.
///
/// Only the seconds and minutes *components* of the elapsed time are
/// tracked, so an hour boundary behaves like a minute boundary whose
/// minutes component did not increase.
#[derive(Debug, Clone)]
pub struct Downsampler {
    state: DownsampleState,
    last_second: u64,
    last_minute: u64,
}

impl Default for Downsampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Downsampler {
    pub fn new() -> Self {
        Self {
            state: DownsampleState::AwaitingFirst,
            last_second: 0,
            last_minute: 0,
        }
    }

    pub fn state(&self) -> DownsampleState {
        self.state
    }

    /// Seconds component of the last emitted record.
    pub fn last_second(&self) -> u64 {
        self.last_second
    }

    /// Minutes component of the last emitted record.
    pub fn last_minute(&self) -> u64 {
        self.last_minute
    }

    /// Offer the next record's elapsed time. Returns true if it is kept.
    pub fn accept(&mut self, elapsed: Elapsed) -> bool {
        if self.state == DownsampleState::AwaitingFirst {
            self.state = DownsampleState::Steady;
            return true;
        }

        let second = elapsed.seconds_component();
        let minute = elapsed.minutes_component();
        let mut emit = false;

        if second > self.last_second {
            self.last_second = second;
            self.last_minute = minute;
            emit = true;
        }

        // Seconds wrapped 59 -> 0.. within a later minute.
        if second < self.last_second && minute > self.last_minute {
            self.last_second = second;
            self.last_minute = minute;
            emit = true;
        }

        emit
    }
}
