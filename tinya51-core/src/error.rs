// File:    error.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Error types reported by key parsing, binary data checks and the symbol codec.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CipherError>;

/// Why a key was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    /// The key does not have exactly [`crate::key::KEY_LENGTH`] characters.
    #[error("key must be exactly 23 bits, got {actual}")]
    Length {
        /// Number of characters actually supplied.
        actual: usize,
    },
    /// The key contains something other than `0` or `1`.
    #[error("key must contain only 0s and 1s, found '{character}' at position {position}")]
    Character {
        /// The offending character.
        character: char,
        /// Zero-based character position in the key.
        position: usize,
    },
}

/// Errors produced by the cipher engine and the symbol codec.
///
/// Every variant is raised before any register is touched, so a failed call
/// never yields a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// The key is malformed.
    #[error(transparent)]
    KeyFormat(#[from] KeyFormatError),
    /// Binary input contains a character other than `0` or `1`.
    #[error("data must contain only 0s and 1s, found '{character}' at position {position}")]
    DataFormat {
        /// The offending character.
        character: char,
        /// Zero-based character position in the data.
        position: usize,
    },
    /// A character outside the A-H alphabet was passed to the encoder.
    #[error("character '{character}' not supported, use A-H only")]
    UnsupportedSymbol {
        /// The offending character, as supplied.
        character: char,
    },
    /// A 3-character group is not one of the eight valid bit patterns.
    #[error("invalid binary chunk '{chunk}'")]
    InvalidChunk {
        /// The rejected group.
        chunk: String,
    },
    /// The bit string handed to the decoder cannot be split into 3-bit groups.
    #[error("binary string length must be a multiple of 3, got {length}")]
    ChunkLength {
        /// Length of the rejected bit string.
        length: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_key_length() {
        let err = CipherError::from(KeyFormatError::Length { actual: 5 });
        assert_eq!(err.to_string(), "key must be exactly 23 bits, got 5");
    }

    #[test]
    fn test_display_key_character() {
        let err = CipherError::from(KeyFormatError::Character {
            character: '2',
            position: 4,
        });
        assert_eq!(
            err.to_string(),
            "key must contain only 0s and 1s, found '2' at position 4"
        );
    }

    #[test]
    fn test_display_codec_errors() {
        assert_eq!(
            CipherError::UnsupportedSymbol { character: 'z' }.to_string(),
            "character 'z' not supported, use A-H only"
        );
        assert_eq!(
            CipherError::InvalidChunk {
                chunk: "0x1".to_string()
            }
            .to_string(),
            "invalid binary chunk '0x1'"
        );
        assert_eq!(
            CipherError::ChunkLength { length: 4 }.to_string(),
            "binary string length must be a multiple of 3, got 4"
        );
    }
}
