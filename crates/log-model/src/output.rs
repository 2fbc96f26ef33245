//! Rows of the converted elapsed-time log.

use headtrack_common::clock::Elapsed;
use headtrack_common::error::{HeadtrackError, HeadtrackResult};

use crate::orientation::{EulerAngles, Orientation};
use crate::schema::{RawRecord, FIELD_SEPARATOR};

/// Column names of the converted log, in order.
pub const OUTPUT_COLUMNS: [&str; 24] = [
    "frame",
    "timestamp",
    "original_position",
    "position",
    "delta_x",
    "delta_z",
    "left_rotation",
    "left_x",
    "left_y",
    "left_z",
    "right_rotation",
    "right_x",
    "right_y",
    "right_z",
    "base_opacity",
    "left_opacity",
    "right_opacity",
    "auto_tick",
    "auto_duration",
    "auto_spacing",
    "framerate",
    "A_button",
    "B_button",
    "right_trigger",
];

/// Header line of the converted log: quoted column names joined by tabs.
pub fn header_line() -> String {
    OUTPUT_COLUMNS
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// One converted row.
///
/// The `timestamp` column holds whole elapsed seconds. Left angles are
/// signed to `(-180, 180]`; right angles keep the raw `[0, 360)` range.
/// `right_rotation` carries the raw right literal, mirroring how
/// `left_rotation` carries the raw left literal.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub frame: String,
    pub elapsed: Elapsed,
    pub original_position: String,
    pub position: String,
    pub delta_x: String,
    pub delta_z: String,
    pub left_rotation: String,
    pub left: EulerAngles,
    pub right_rotation: String,
    pub right: EulerAngles,
    pub trailing: Vec<String>,
}

impl OutputRecord {
    /// Decode both orientations of a raw record and pair them with its elapsed time.
    ///
    /// Orientation failures are reported as `MalformedRecord` at `line_no`.
    pub fn from_raw(
        raw: &RawRecord<'_>,
        elapsed: Elapsed,
        line_no: usize,
    ) -> HeadtrackResult<Self> {
        let left = decode(raw.left_rotation, "left_rotation", line_no)?.signed();
        let right = decode(raw.right_rotation, "right_rotation", line_no)?;

        Ok(Self {
            frame: raw.frame.to_string(),
            elapsed,
            original_position: raw.original_position.to_string(),
            position: raw.position.to_string(),
            delta_x: raw.delta_x.to_string(),
            delta_z: raw.delta_z.to_string(),
            left_rotation: raw.left_rotation.to_string(),
            left,
            right_rotation: raw.right_rotation.to_string(),
            right,
            trailing: raw.trailing.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Output fields in column order.
    pub fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(OUTPUT_COLUMNS.len());
        fields.push(self.frame.clone());
        fields.push(self.elapsed.whole_seconds().to_string());
        fields.push(self.original_position.clone());
        fields.push(self.position.clone());
        fields.push(self.delta_x.clone());
        fields.push(self.delta_z.clone());
        fields.push(self.left_rotation.clone());
        fields.extend(self.left.columns());
        fields.push(self.right_rotation.clone());
        fields.extend(self.right.columns());
        fields.extend(self.trailing.iter().cloned());
        fields
    }

    /// The row as a tab-separated line, without a line terminator.
    pub fn to_line(&self) -> String {
        self.fields().join(FIELD_SEPARATOR)
    }
}

fn decode(literal: &str, column: &str, line_no: usize) -> HeadtrackResult<EulerAngles> {
    Orientation::parse(literal)
        .map(|orientation| orientation.euler_angles())
        .map_err(|e| match e {
            HeadtrackError::OrientationParse { message } => {
                HeadtrackError::malformed_record(line_no, format!("{column}: {message}"))
            }
            other => other.at_line(line_no),
        })
}
