//! Session summary of a converted log.

use chrono::NaiveDateTime;
use serde::Serialize;

use headtrack_log_model::orientation::EulerAngles;

use crate::convert::ConvertedLog;

/// Min/max of one angle over the kept records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

/// What a conversion would produce, without writing anything.
#[derive(Debug, Clone, Serialize)]
pub struct LogSummary {
    pub data_records: usize,
    pub records_kept: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub duration_secs: f64,
    /// Signed left-orientation ranges: pitch (x), yaw (y), roll (z).
    pub left_x: Option<AngleRange>,
    pub left_y: Option<AngleRange>,
    pub left_z: Option<AngleRange>,
}

impl LogSummary {
    pub fn from_log(log: &ConvertedLog) -> Self {
        let lefts: Vec<EulerAngles> = log.records.iter().map(|r| r.left).collect();
        let last_timestamp = log.epoch.map(|epoch| {
            epoch + chrono::Duration::milliseconds(log.last_elapsed.as_millis() as i64)
        });

        Self {
            data_records: log.data_records,
            records_kept: log.records.len(),
            first_timestamp: log.epoch,
            last_timestamp,
            duration_secs: log.last_elapsed.as_secs_f64(),
            left_x: range(lefts.iter().map(|a| a.x)),
            left_y: range(lefts.iter().map(|a| a.y)),
            left_z: range(lefts.iter().map(|a| a.z)),
        }
    }
}

fn range(values: impl Iterator<Item = f32>) -> Option<AngleRange> {
    values.fold(None, |acc, v| match acc {
        None => Some(AngleRange { min: v, max: v }),
        Some(r) => Some(AngleRange {
            min: r.min.min(v),
            max: r.max.max(v),
        }),
    })
}
