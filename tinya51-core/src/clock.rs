// File:    clock.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Majority vote over the three control bits and the resulting stop/go decision.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::register::RegisterId;

/// Returns `1` when at least two of the three bits are `1`, otherwise `0`.
#[must_use]
pub const fn majority(a: u8, b: u8, c: u8) -> u8 {
    (a & b) | (a & c) | (b & c)
}

/// Which registers rotate on one step, derived from their control bits.
///
/// A register rotates exactly when its control bit agrees with the majority.
/// At least two registers therefore always move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockDecision {
    /// Control bits of X, Y and Z read before rotation.
    pub control_bits: [u8; 3],
    /// Majority of the control bits.
    pub majority: u8,
    /// Rotate flags for X, Y and Z.
    pub rotate: [bool; 3],
}

impl ClockDecision {
    /// Computes the decision for the given control bits of X, Y and Z.
    #[must_use]
    pub fn decide(control_bits: [u8; 3]) -> Self {
        let [a, b, c] = control_bits;
        let majority = majority(a, b, c);
        Self {
            control_bits,
            majority,
            rotate: control_bits.map(|bit| bit == majority),
        }
    }

    /// Whether the named register rotates this step.
    #[must_use]
    pub const fn rotates(&self, id: RegisterId) -> bool {
        match id {
            RegisterId::X => self.rotate[0],
            RegisterId::Y => self.rotate[1],
            RegisterId::Z => self.rotate[2],
        }
    }
}
