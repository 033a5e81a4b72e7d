// File:    key.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: The 23-bit TinyA5/1 key and its parsing rules.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::error::KeyFormatError;
use crate::validate::first_non_binary;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of bits in a key. Equal to the combined length of the three registers.
pub const KEY_LENGTH: usize = 23;

/// An accepted key. Construction guarantees exactly [`KEY_LENGTH`] bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    bits: [u8; KEY_LENGTH],
}

impl Key {
    /// Parses a key from a string of `0` and `1` characters.
    ///
    /// # Errors
    ///
    /// Returns [`KeyFormatError::Length`] if the string is not exactly
    /// [`KEY_LENGTH`] characters long, and [`KeyFormatError::Character`] for the
    /// first character that is not a binary digit.
    pub fn parse(text: &str) -> Result<Self, KeyFormatError> {
        let actual = text.chars().count();
        if actual != KEY_LENGTH {
            return Err(KeyFormatError::Length { actual });
        }
        if let Some((position, character)) = first_non_binary(text) {
            return Err(KeyFormatError::Character {
                character,
                position,
            });
        }

        let mut bits = [0u8; KEY_LENGTH];
        for (bit, byte) in bits.iter_mut().zip(text.bytes()) {
            *bit = byte - b'0';
        }
        Ok(Self { bits })
    }

    /// Builds a key directly from bit values. Any non-zero value counts as `1`.
    #[must_use]
    pub fn from_bits(bits: [u8; KEY_LENGTH]) -> Self {
        Self {
            bits: bits.map(|b| u8::from(b != 0)),
        }
    }

    /// The key bits in order, each `0` or `1`.
    #[must_use]
    pub const fn bits(&self) -> &[u8; KEY_LENGTH] {
        &self.bits
    }
}

impl FromStr for Key {
    type Err = KeyFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits {
            write!(f, "{bit}")?;
        }
        Ok(())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
