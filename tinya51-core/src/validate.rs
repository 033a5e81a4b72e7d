// File:    validate.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Advisory input checks for keys, binary data and A-H symbol data.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Front ends run these checks to give early feedback. The cipher engine and
//! the codec enforce the same rules on their own, so skipping a check here
//! never lets bad input through.

use crate::codec;
use crate::error::{CipherError, Result};
use crate::key::Key;
use serde::{Deserialize, Serialize};

/// How user-supplied data is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// A string of `0` and `1` characters.
    #[default]
    Binary,
    /// A string of A-H symbols, three bits each.
    Char,
}

impl InputFormat {
    /// The name used in JSON payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Char => "char",
        }
    }
}

/// Outcome of a check: whether the input is acceptable and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the input passed.
    pub valid: bool,
    /// Human-readable explanation.
    pub message: String,
}

impl Verdict {
    fn pass(message: &str) -> Self {
        Self {
            valid: true,
            message: message.to_string(),
        }
    }

    fn fail(error: &impl ToString) -> Self {
        Self {
            valid: false,
            message: error.to_string(),
        }
    }
}

/// Checks that `key` is exactly 23 binary digits.
#[must_use]
pub fn validate_key(key: &str) -> Verdict {
    match Key::parse(key) {
        Ok(_) => Verdict::pass("Valid key"),
        Err(e) => Verdict::fail(&e),
    }
}

/// Checks that `data` contains only `0` and `1`. The empty string is valid.
#[must_use]
pub fn validate_binary_data(data: &str) -> Verdict {
    match first_non_binary(data) {
        None => Verdict::pass("Valid binary data"),
        Some((position, character)) => Verdict::fail(&CipherError::DataFormat {
            character,
            position,
        }),
    }
}

/// Checks that every character of `data` is in A-H, ignoring case.
#[must_use]
pub fn validate_symbol_data(data: &str) -> Verdict {
    match data.chars().find(|&c| codec::symbol_value(c).is_none()) {
        None => Verdict::pass("Valid character data"),
        Some(character) => Verdict::fail(&CipherError::UnsupportedSymbol { character }),
    }
}

/// Runs the check matching `format`.
#[must_use]
pub fn validate_data(data: &str, format: InputFormat) -> Verdict {
    match format {
        InputFormat::Binary => validate_binary_data(data),
        InputFormat::Char => validate_symbol_data(data),
    }
}

/// Position and value of the first character that is not `0` or `1`.
pub(crate) fn first_non_binary(text: &str) -> Option<(usize, char)> {
    text.chars()
        .enumerate()
        .find(|&(_, c)| c != '0' && c != '1')
}

/// Converts a binary string to bit values.
pub(crate) fn parse_bits(data: &str) -> Result<Vec<u8>> {
    if let Some((position, character)) = first_non_binary(data) {
        return Err(CipherError::DataFormat {
            character,
            position,
        });
    }
    Ok(data.bytes().map(|b| b - b'0').collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("10010101001110100110000").valid);

        let short = validate_key("1001");
        assert!(!short.valid);
        assert_eq!(short.message, "key must be exactly 23 bits, got 4");

        let bad = validate_key("1001010100111010011000z");
        assert!(!bad.valid);
        assert!(bad.message.contains("only 0s and 1s"));
    }

    #[test]
    fn test_validate_binary_data() {
        assert!(validate_binary_data("").valid);
        assert!(validate_binary_data("0101").valid);
        let verdict = validate_binary_data("01 1");
        assert!(!verdict.valid);
        assert!(verdict.message.contains("position 2"));
    }

    #[test]
    fn test_validate_symbol_data() {
        assert!(validate_symbol_data("abcdefgh").valid);
        assert!(validate_symbol_data("HEAD").valid);
        let verdict = validate_symbol_data("HI");
        assert!(!verdict.valid);
        assert!(verdict.message.contains("'I'"));
    }

    #[test]
    fn test_validate_data_dispatches_on_format() {
        assert!(validate_data("101", InputFormat::Binary).valid);
        assert!(!validate_data("101", InputFormat::Char).valid);
        assert!(validate_data("cab", InputFormat::Char).valid);
    }

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("1001").unwrap(), vec![1, 0, 0, 1]);
        assert!(parse_bits("").unwrap().is_empty());
        assert_eq!(
            parse_bits("12"),
            Err(CipherError::DataFormat {
                character: '2',
                position: 1
            })
        );
    }

    #[test]
    fn test_input_format_json_names() {
        assert_eq!(serde_json::to_string(&InputFormat::Char).unwrap(), "\"char\"");
        let parsed: InputFormat = serde_json::from_str("\"binary\"").unwrap();
        assert_eq!(parsed, InputFormat::Binary);
        assert_eq!(InputFormat::Char.as_str(), "char");
    }
}
