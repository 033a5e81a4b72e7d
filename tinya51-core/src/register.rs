// File:    register.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: The three TinyA5/1 shift registers, their fixed tap layout and in-place rotation.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Register Bank.
//!
//! Three registers named X, Y and Z hold 6, 8 and 9 bits. They are seeded
//! from consecutive slices of the key and only ever change through
//! [`RegisterBank::rotate`], which keeps their length fixed.
//!
//! # Tap layout
//!
//! | Register | Length | Control bit | Feedback taps | Output bit |
//! |----------|--------|-------------|---------------|------------|
//! | X        | 6      | 2           | 3, 4, 5       | 5          |
//! | Y        | 8      | 7           | 6, 7          | 7          |
//! | Z        | 9      | 8           | 3, 7, 8       | 8          |
//!
//! Another published variant of TinyA5/1 reads control bits at {1, 3, 3}
//! with X taps {2, 4, 5} and Z taps {2, 7, 8}. That variant is not supported;
//! ciphertexts produced with it will not decrypt here.

use crate::key::{KEY_LENGTH, Key};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits in register X.
pub const X_LENGTH: usize = 6;
/// Number of bits in register Y.
pub const Y_LENGTH: usize = 8;
/// Number of bits in register Z.
pub const Z_LENGTH: usize = 9;

const _: () = assert!(X_LENGTH + Y_LENGTH + Z_LENGTH == KEY_LENGTH);

/// Fixed bit positions consulted for one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    /// Number of bits in the register.
    pub length: usize,
    /// Position read by the majority clock.
    pub control_bit: usize,
    /// Positions XOR-ed together to form the feedback bit on rotation.
    pub feedback_taps: &'static [usize],
    /// Position read after rotation to form the keystream bit.
    pub output_bit: usize,
}

/// Layout of register X.
pub const X_LAYOUT: RegisterLayout = RegisterLayout {
    length: X_LENGTH,
    control_bit: 2,
    feedback_taps: &[3, 4, 5],
    output_bit: 5,
};

/// Layout of register Y.
pub const Y_LAYOUT: RegisterLayout = RegisterLayout {
    length: Y_LENGTH,
    control_bit: 7,
    feedback_taps: &[6, 7],
    output_bit: 7,
};

/// Layout of register Z.
pub const Z_LAYOUT: RegisterLayout = RegisterLayout {
    length: Z_LENGTH,
    control_bit: 8,
    feedback_taps: &[3, 7, 8],
    output_bit: 8,
};

/// Names one of the three registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterId {
    /// The 6-bit register.
    X,
    /// The 8-bit register.
    Y,
    /// The 9-bit register.
    Z,
}

impl RegisterId {
    /// All registers in key order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// The fixed tap layout of this register.
    #[must_use]
    pub const fn layout(self) -> &'static RegisterLayout {
        match self {
            Self::X => &X_LAYOUT,
            Self::Y => &Y_LAYOUT,
            Self::Z => &Z_LAYOUT,
        }
    }
}

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        };
        f.write_str(name)
    }
}

/// A fixed-length register of single-bit cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register<const N: usize> {
    bits: [u8; N],
}

impl<const N: usize> Register<N> {
    /// Creates a register from bit values, each expected to be `0` or `1`.
    #[must_use]
    pub const fn new(bits: [u8; N]) -> Self {
        Self { bits }
    }

    /// Current cell values, index 0 first.
    #[must_use]
    pub const fn bits(&self) -> &[u8; N] {
        &self.bits
    }

    /// Rotates the register by one position.
    ///
    /// The feedback bit is the XOR of the cells at `taps`. Every cell then
    /// moves one position toward the high end, the top cell is dropped and the
    /// feedback bit lands in cell 0.
    pub fn rotate(&mut self, taps: &[usize]) {
        let feedback = taps.iter().fold(0, |acc, &tap| acc ^ self.bits[tap]);
        self.bits.rotate_right(1);
        self.bits[0] = feedback;
    }
}

/// Copy of all three registers at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterSnapshot {
    /// Contents of register X.
    #[serde(rename = "X")]
    pub x: [u8; X_LENGTH],
    /// Contents of register Y.
    #[serde(rename = "Y")]
    pub y: [u8; Y_LENGTH],
    /// Contents of register Z.
    #[serde(rename = "Z")]
    pub z: [u8; Z_LENGTH],
}

impl RegisterSnapshot {
    /// Bits of the named register.
    #[must_use]
    pub fn register(&self, id: RegisterId) -> &[u8] {
        match id {
            RegisterId::X => &self.x,
            RegisterId::Y => &self.y,
            RegisterId::Z => &self.z,
        }
    }
}

/// The three registers owned by one cipher instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterBank {
    x: Register<X_LENGTH>,
    y: Register<Y_LENGTH>,
    z: Register<Z_LENGTH>,
}

impl RegisterBank {
    /// Seeds the registers from the key: bits 0-5 go to X, 6-13 to Y and 14-22 to Z.
    #[must_use]
    pub fn seed(key: &Key) -> Self {
        let bits = key.bits();
        Self {
            x: Register::new(take(&bits[..X_LENGTH])),
            y: Register::new(take(&bits[X_LENGTH..X_LENGTH + Y_LENGTH])),
            z: Register::new(take(&bits[X_LENGTH + Y_LENGTH..])),
        }
    }

    /// Rotates the named register in place using its feedback taps.
    pub fn rotate(&mut self, id: RegisterId) {
        let taps = id.layout().feedback_taps;
        match id {
            RegisterId::X => self.x.rotate(taps),
            RegisterId::Y => self.y.rotate(taps),
            RegisterId::Z => self.z.rotate(taps),
        }
    }

    /// Reads one bit of the named register.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below the register's length.
    #[must_use]
    pub fn bit(&self, id: RegisterId, index: usize) -> u8 {
        match id {
            RegisterId::X => self.x.bits()[index],
            RegisterId::Y => self.y.bits()[index],
            RegisterId::Z => self.z.bits()[index],
        }
    }

    /// Control bits of X, Y and Z, in that order.
    #[must_use]
    pub fn control_bits(&self) -> [u8; 3] {
        RegisterId::ALL.map(|id| self.bit(id, id.layout().control_bit))
    }

    /// Output bits of X, Y and Z, in that order.
    #[must_use]
    pub fn output_bits(&self) -> [u8; 3] {
        RegisterId::ALL.map(|id| self.bit(id, id.layout().output_bit))
    }

    /// Copies the current register contents.
    #[must_use]
    pub const fn snapshot(&self) -> RegisterSnapshot {
        RegisterSnapshot {
            x: *self.x.bits(),
            y: *self.y.bits(),
            z: *self.z.bits(),
        }
    }
}

fn take<const N: usize>(bits: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(bits);
    out
}
