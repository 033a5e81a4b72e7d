// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: The main library crate for tinya51-core, wiring together the registers, clocking, keystream and codec.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # TinyA5/1 Core Library
//!
//! This library implements TinyA5/1, a deliberately small stream cipher built
//! from three short shift registers that are clocked by a majority vote. It is
//! a teaching tool and offers no real security.
//!
//! ```
//! use tinya51_core::cipher::TinyA51;
//!
//! let mut cipher = TinyA51::new("10010101001110100110000")?;
//! let encrypted = cipher.transform("111", false)?;
//! assert_eq!(encrypted.output, "010");
//!
//! let decrypted = cipher.transform(&encrypted.output, false)?;
//! assert_eq!(decrypted.output, "111");
//! # Ok::<(), tinya51_core::error::CipherError>(())
//! ```

/// The cipher engine that turns a key and a bit string into a transformed bit string.
pub mod cipher;
/// The majority function and the per-step clocking decision.
pub mod clock;
/// Conversion between the A-H symbol alphabet and 3-bit groups.
pub mod codec;
/// Error types shared by every fallible operation in the crate.
pub mod error;
/// Parsing and representation of the 23-bit key.
pub mod key;
/// Utilities for generating fresh random keys.
pub mod key_generator;
/// Keystream generation, one bit per clock cycle.
pub mod keystream;
/// The three shift registers and the fixed tap layout.
pub mod register;
/// Step-by-step records captured for visualization.
pub mod trace;
/// Advisory input checks for front ends.
pub mod validate;

pub use error::{CipherError, Result};
