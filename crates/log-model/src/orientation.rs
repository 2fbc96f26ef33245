//! Orientation literals and Euler-angle decomposition.
//!
//! The recorder writes each head orientation as a quaternion literal
//! `(x, y, z, w)` in single precision. Angles are decomposed with the
//! recorder's own convention:
//!
//! - Rotation order: `R = Ry(y) · Rx(x) · Rz(z)`, i.e. roll about Z is
//!   applied first, then pitch about X, then yaw about Y.
//! - Raw angles are reported in degrees within `[0, 360)`.
//! - Near gimbal lock (pitch of ±90°) roll is folded into yaw and `z = 0`.

use std::str::FromStr;

use nalgebra::{Quaternion, UnitQuaternion};

use headtrack_common::error::{HeadtrackError, HeadtrackResult};

/// Below this norm a literal cannot be normalized into a rotation.
const MIN_QUATERNION_NORM: f32 = 1.0e-6;

/// `|sin(pitch)|` above which yaw and roll are no longer separable.
const GIMBAL_LOCK_THRESHOLD: f32 = 0.9999;

/// A unit rotation decoded from an orientation literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    rotation: UnitQuaternion<f32>,
}

/// Rotation angles about the X, Y and Z axes, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Orientation {
    /// Parse a `(x, y, z, w)` literal. Whitespace around components is ignored.
    pub fn parse(literal: &str) -> HeadtrackResult<Self> {
        let trimmed = literal.trim();
        let inner = trimmed
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| {
                HeadtrackError::orientation_parse(format!(
                    "'{literal}' is not a parenthesized quaternion"
                ))
            })?;

        let components = inner
            .split(',')
            .map(|part| {
                let part = part.trim();
                part.parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| {
                        HeadtrackError::orientation_parse(format!(
                            "'{part}' in '{literal}' is not a number"
                        ))
                    })
            })
            .collect::<HeadtrackResult<Vec<f32>>>()?;

        let [x, y, z, w] = components[..] else {
            return Err(HeadtrackError::orientation_parse(format!(
                "'{literal}' has {} components, expected 4",
                components.len()
            )));
        };

        let rotation = UnitQuaternion::try_new(Quaternion::new(w, x, y, z), MIN_QUATERNION_NORM)
            .ok_or_else(|| {
                HeadtrackError::orientation_parse(format!("'{literal}' has zero length"))
            })?;

        Ok(Self { rotation })
    }

    /// Build an orientation from an existing rotation.
    pub fn from_rotation(rotation: UnitQuaternion<f32>) -> Self {
        Self { rotation }
    }

    /// Euler angles in degrees, each within `[0, 360)`.
    pub fn euler_angles(&self) -> EulerAngles {
        let rotation = self.rotation.to_rotation_matrix();
        let m = rotation.matrix();

        let sin_pitch = (-m[(1, 2)]).clamp(-1.0, 1.0);
        let pitch = sin_pitch.asin();
        let (yaw, roll) = if sin_pitch.abs() < GIMBAL_LOCK_THRESHOLD {
            (m[(0, 2)].atan2(m[(2, 2)]), m[(1, 0)].atan2(m[(1, 1)]))
        } else {
            ((-m[(2, 0)]).atan2(m[(0, 0)]), 0.0)
        };

        EulerAngles {
            x: normalize_degrees(pitch.to_degrees()),
            y: normalize_degrees(yaw.to_degrees()),
            z: normalize_degrees(roll.to_degrees()),
        }
    }
}

impl FromStr for Orientation {
    type Err = HeadtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl EulerAngles {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Map each axis from `[0, 360)` to `(-180, 180]`.
    pub fn signed(self) -> Self {
        Self {
            x: remap_signed(self.x),
            y: remap_signed(self.y),
            z: remap_signed(self.z),
        }
    }

    /// The three angles as output columns, at 7 significant digits.
    pub fn columns(&self) -> [String; 3] {
        [
            format_angle(self.x),
            format_angle(self.y),
            format_angle(self.z),
        ]
    }
}

/// Render an angle with 7 significant digits and no trailing zeros, the
/// precision the recorder itself writes single-precision values with.
pub fn format_angle(degrees: f32) -> String {
    let rounded: f64 = format!("{degrees:.6e}").parse().unwrap_or(f64::from(degrees));
    // -0.0 + 0.0 == +0.0
    (rounded + 0.0).to_string()
}

/// Map an angle in `[0, 360)` to `(-180, 180]`. Exactly 180 stays 180.
pub fn remap_signed(degrees: f32) -> f32 {
    if degrees > 180.0 {
        degrees - 360.0
    } else {
        degrees
    }
}

/// Fold an angle from `(-360, 360]` into `[0, 360)`.
fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    };
    if wrapped >= 360.0 {
        wrapped - 360.0
    } else {
        // -0.0 + 0.0 == +0.0
        wrapped + 0.0
    }
}
