// File:    keystream.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Drives one clock cycle over the register bank and derives one keystream bit.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::clock::ClockDecision;
use crate::key::Key;
use crate::register::{RegisterBank, RegisterId, RegisterSnapshot};
use log::trace;

/// Internal state observed around a single clock cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepObservation {
    /// Control bits, majority and rotate flags for the cycle.
    pub decision: ClockDecision,
    /// Registers before any rotation.
    pub before: RegisterSnapshot,
    /// Registers after the selected rotations.
    pub after: RegisterSnapshot,
    /// The keystream bit produced.
    pub keystream_bit: u8,
}

/// Produces keystream bits by clocking a [`RegisterBank`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystreamGenerator {
    registers: RegisterBank,
}

impl KeystreamGenerator {
    /// Creates a generator seeded from `key`.
    #[must_use]
    pub fn new(key: &Key) -> Self {
        Self {
            registers: RegisterBank::seed(key),
        }
    }

    /// Read access to the registers.
    #[must_use]
    pub const fn registers(&self) -> &RegisterBank {
        &self.registers
    }

    /// Runs one clock cycle and returns the keystream bit.
    pub fn step(&mut self) -> u8 {
        let decision = self.clock();
        self.output_bit(decision)
    }

    /// Runs one clock cycle, capturing the registers on both sides of the rotation.
    pub fn step_observed(&mut self) -> StepObservation {
        let before = self.registers.snapshot();
        let decision = self.clock();
        let keystream_bit = self.output_bit(decision);
        StepObservation {
            decision,
            before,
            after: self.registers.snapshot(),
            keystream_bit,
        }
    }

    fn clock(&mut self) -> ClockDecision {
        let decision = ClockDecision::decide(self.registers.control_bits());
        for id in RegisterId::ALL {
            if decision.rotates(id) {
                self.registers.rotate(id);
            }
        }
        decision
    }

    fn output_bit(&self, decision: ClockDecision) -> u8 {
        let [x, y, z] = self.registers.output_bits();
        let bit = x ^ y ^ z;
        trace!(
            "clock: control={:?} majority={} rotate={:?} keystream={bit}",
            decision.control_bits, decision.majority, decision.rotate
        );
        bit
    }
}
