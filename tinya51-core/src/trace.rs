// File:    trace.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Per-bit step records and the result type returned by a transform.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::keystream::StepObservation;
use crate::register::{RegisterSnapshot, X_LENGTH, Y_LENGTH, Z_LENGTH};
use serde::{Deserialize, Serialize};

/// Everything that happened while processing one input bit.
///
/// Field names in JSON follow the visualizer's conventions (`x2`, `rotate_X`,
/// `X_before`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    /// Zero-based position of the input bit.
    pub step: usize,
    /// Control bit of X (cell 2).
    pub x2: u8,
    /// Control bit of Y (cell 7).
    pub y7: u8,
    /// Control bit of Z (cell 8).
    pub z8: u8,
    /// Majority of the three control bits.
    pub majority: u8,
    /// Whether X rotated.
    #[serde(rename = "rotate_X")]
    pub rotate_x: bool,
    /// Whether Y rotated.
    #[serde(rename = "rotate_Y")]
    pub rotate_y: bool,
    /// Whether Z rotated.
    #[serde(rename = "rotate_Z")]
    pub rotate_z: bool,
    /// X before rotation.
    #[serde(rename = "X_before")]
    pub x_before: [u8; X_LENGTH],
    /// Y before rotation.
    #[serde(rename = "Y_before")]
    pub y_before: [u8; Y_LENGTH],
    /// Z before rotation.
    #[serde(rename = "Z_before")]
    pub z_before: [u8; Z_LENGTH],
    /// X after rotation.
    #[serde(rename = "X_after")]
    pub x_after: [u8; X_LENGTH],
    /// Y after rotation.
    #[serde(rename = "Y_after")]
    pub y_after: [u8; Y_LENGTH],
    /// Z after rotation.
    #[serde(rename = "Z_after")]
    pub z_after: [u8; Z_LENGTH],
    /// Keystream bit for this step.
    pub keystream_bit: u8,
    /// Input bit.
    pub data_bit: u8,
    /// Output bit, `data_bit ^ keystream_bit`.
    pub cipher_bit: u8,
}

impl StepTrace {
    /// Builds a trace entry from a keystream observation and the data it was applied to.
    #[must_use]
    pub const fn new(
        step: usize,
        observation: &StepObservation,
        data_bit: u8,
        cipher_bit: u8,
    ) -> Self {
        let [x2, y7, z8] = observation.decision.control_bits;
        let [rotate_x, rotate_y, rotate_z] = observation.decision.rotate;
        Self {
            step,
            x2,
            y7,
            z8,
            majority: observation.decision.majority,
            rotate_x,
            rotate_y,
            rotate_z,
            x_before: observation.before.x,
            y_before: observation.before.y,
            z_before: observation.before.z,
            x_after: observation.after.x,
            y_after: observation.after.y,
            z_after: observation.after.z,
            keystream_bit: observation.keystream_bit,
            data_bit,
            cipher_bit,
        }
    }

    /// Registers before rotation.
    #[must_use]
    pub const fn before(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            x: self.x_before,
            y: self.y_before,
            z: self.z_before,
        }
    }

    /// Registers after rotation.
    #[must_use]
    pub const fn after(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            x: self.x_after,
            y: self.y_after,
            z: self.z_after,
        }
    }
}

/// Output of one encrypt or decrypt call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformResult {
    /// Output bits, same length as the input.
    pub output: String,
    /// One entry per input bit, present only when tracing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepTrace>>,
    /// Registers right after seeding, present only when tracing was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_state: Option<RegisterSnapshot>,
}
