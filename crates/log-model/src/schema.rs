//! Fixed input schema of a head-tracking log.
//!
//! Every data line is tab-separated. The first eight columns are decoded by
//! name; anything after `right_rotation` is carried through untouched.

use headtrack_common::error::{HeadtrackError, HeadtrackResult};

/// Field separator of both the input and the output log.
pub const FIELD_SEPARATOR: &str = "\t";

/// Column names of the input log, in order.
pub const INPUT_COLUMNS: [&str; 18] = [
    "frame",
    "timestamp",
    "original_position",
    "position",
    "delta_x",
    "delta_z",
    "left_rotation",
    "right_rotation",
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

/// Fields needed to reach the right orientation (index 7).
pub const MIN_FIELDS: usize = 8;

/// Number of trailing pass-through columns in a well-formed line.
pub const EXPECTED_TRAILING_FIELDS: usize = INPUT_COLUMNS.len() - MIN_FIELDS;

/// One data line of the input log, split into named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord<'a> {
    pub frame: &'a str,
    pub timestamp: &'a str,
    pub original_position: &'a str,
    pub position: &'a str,
    pub delta_x: &'a str,
    pub delta_z: &'a str,
    /// Left orientation literal, `(x, y, z, w)`.
    pub left_rotation: &'a str,
    /// Right orientation literal, `(x, y, z, w)`.
    pub right_rotation: &'a str,
    /// Opacity, auto-tick, framerate and button columns.
    pub trailing: Vec<&'a str>,
}

impl<'a> RawRecord<'a> {
    /// Split a data line on tabs and bind the fixed columns.
    ///
    /// Fields are not trimmed. `line_no` is the 1-based line in the file.
    pub fn parse(line: &'a str, line_no: usize) -> HeadtrackResult<Self> {
        let fields: Vec<&'a str> = line.split(FIELD_SEPARATOR).collect();
        if fields.len() < MIN_FIELDS {
            return Err(HeadtrackError::malformed_record(
                line_no,
                format!(
                    "expected at least {MIN_FIELDS} tab-separated fields, found {}",
                    fields.len()
                ),
            ));
        }

        Ok(Self {
            frame: fields[0],
            timestamp: fields[1],
            original_position: fields[2],
            position: fields[3],
            delta_x: fields[4],
            delta_z: fields[5],
            left_rotation: fields[6],
            right_rotation: fields[7],
            trailing: fields[MIN_FIELDS..].to_vec(),
        })
    }

    /// Whether the trailing column count matches the known schema.
    pub fn has_expected_width(&self) -> bool {
        self.trailing.len() == EXPECTED_TRAILING_FIELDS
    }
}
