// File:    codec.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Maps the eight symbols A-H to and from 3-bit groups for display purposes.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The cipher itself only ever sees bits. This codec lets front ends accept
//! and show data as letters, with `A` = `000` through `H` = `111`.

use crate::error::{CipherError, Result};

/// The symbol alphabet. A symbol's index is its 3-bit value.
pub const SYMBOLS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Bits per symbol.
pub const BITS_PER_SYMBOL: usize = 3;

/// The 3-bit value of `symbol`, ignoring case, or `None` outside A-H.
#[must_use]
pub fn symbol_value(symbol: char) -> Option<usize> {
    let upper = symbol.to_ascii_uppercase();
    SYMBOLS.iter().position(|&s| s == upper)
}

/// Converts A-H symbols (any case) to a bit string, three bits per symbol.
///
/// # Errors
///
/// Returns [`CipherError::UnsupportedSymbol`] for the first character outside A-H.
pub fn encode(text: &str) -> Result<String> {
    let mut bits = String::with_capacity(text.len() * BITS_PER_SYMBOL);
    for character in text.chars() {
        let value = symbol_value(character).ok_or(CipherError::UnsupportedSymbol { character })?;
        bits.push_str(&format!("{value:03b}"));
    }
    Ok(bits)
}

/// Converts a bit string back to upper-case A-H symbols.
///
/// # Errors
///
/// Returns [`CipherError::ChunkLength`] if the length is not a multiple of 3,
/// and [`CipherError::InvalidChunk`] for the first group that is not three
/// binary digits.
pub fn decode(bits: &str) -> Result<String> {
    let chars: Vec<char> = bits.chars().collect();
    if chars.len() % BITS_PER_SYMBOL != 0 {
        return Err(CipherError::ChunkLength {
            length: chars.len(),
        });
    }

    chars
        .chunks(BITS_PER_SYMBOL)
        .map(|chunk| {
            chunk_value(chunk)
                .map(|value| SYMBOLS[value])
                .ok_or_else(|| CipherError::InvalidChunk {
                    chunk: chunk.iter().collect(),
                })
        })
        .collect()
}

fn chunk_value(chunk: &[char]) -> Option<usize> {
    chunk.iter().try_fold(0, |acc, &c| match c {
        '0' => Some(acc << 1),
        '1' => Some((acc << 1) | 1),
        _ => None,
    })
}
