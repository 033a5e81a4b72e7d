// File:    key_generator.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Produces fresh random 23-bit keys from the operating system's random source.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::key::{KEY_LENGTH, Key};
use rand::{TryRngCore, rngs::OsRng};

/// Generates a new random key.
///
/// # Errors
///
/// This function will return an error if the operating system's random source fails.
pub fn generate_key() -> std::io::Result<Key> {
    let mut rng = OsRng;
    let mut buffer = [0u8; KEY_LENGTH];
    rng.try_fill_bytes(&mut buffer)
        .map_err(std::io::Error::other)?;

    Ok(Key::from_bits(buffer.map(|byte| byte & 1)))
}
