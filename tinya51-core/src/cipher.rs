// File:    cipher.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: The TinyA5/1 cipher engine: reset from key, consume a bit string, optionally trace.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! This module contains the cipher engine.
//!
//! Encryption and decryption are the same operation: each input bit is XOR-ed
//! with the next keystream bit, and applying the same keystream twice gives
//! back the original bits.

use crate::error::Result;
use crate::key::Key;
use crate::keystream::KeystreamGenerator;
use crate::register::{RegisterBank, RegisterSnapshot};
use crate::trace::{StepTrace, TransformResult};
use crate::validate::parse_bits;
use log::debug;

/// Lifecycle of the engine's registers.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EngineState {
    /// Key stored, registers not seeded yet.
    Uninitialized,
    /// Registers seeded from the key, possibly advanced by a transform.
    Ready(KeystreamGenerator),
}

/// A TinyA5/1 cipher bound to one key.
///
/// Each instance owns its registers. Every [`transform`](Self::transform)
/// starts from a fresh reset, so repeated calls on the same input agree and
/// nothing carries over between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TinyA51 {
    key: Key,
    state: EngineState,
}

impl TinyA51 {
    /// Validates `key` and returns a cipher with seeded registers.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::KeyFormat`](crate::CipherError::KeyFormat) if the
    /// key is not exactly 23 binary digits.
    pub fn new(key: &str) -> Result<Self> {
        let mut cipher = Self::with_key(Key::parse(key)?);
        cipher.reset();
        Ok(cipher)
    }

    /// Wraps an already parsed key without seeding the registers.
    #[must_use]
    pub const fn with_key(key: Key) -> Self {
        Self {
            key,
            state: EngineState::Uninitialized,
        }
    }

    /// The key this cipher was built with.
    #[must_use]
    pub const fn key(&self) -> &Key {
        &self.key
    }

    /// Whether the registers have been seeded.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Re-seeds the registers from the key. Calling it twice is the same as calling it once.
    pub fn reset(&mut self) {
        self.state = EngineState::Ready(self.seeded_generator());
    }

    fn seeded_generator(&self) -> KeystreamGenerator {
        debug!("Seeding registers from key {}", self.key);
        KeystreamGenerator::new(&self.key)
    }

    /// Current register contents, or `None` before the first reset.
    #[must_use]
    pub fn register_state(&self) -> Option<RegisterSnapshot> {
        self.registers().map(RegisterBank::snapshot)
    }

    fn registers(&self) -> Option<&RegisterBank> {
        match &self.state {
            EngineState::Uninitialized => None,
            EngineState::Ready(generator) => Some(generator.registers()),
        }
    }

    /// Encrypts or decrypts a string of `0`/`1` characters.
    ///
    /// The registers are reset first. When `trace` is set, the result also
    /// carries the register state right after the reset and one
    /// [`StepTrace`] per input bit.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::DataFormat`](crate::CipherError::DataFormat) for
    /// the first non-binary character. The registers are left untouched in
    /// that case.
    pub fn transform(&mut self, data: &str, trace: bool) -> Result<TransformResult> {
        let bits = parse_bits(data)?;
        let mut generator = self.seeded_generator();

        debug!("Transforming {} bit(s), trace={trace}", bits.len());
        let initial_state = trace.then(|| generator.registers().snapshot());
        let mut steps = trace.then(|| Vec::with_capacity(bits.len()));
        let mut output = String::with_capacity(bits.len());

        for (step, &data_bit) in bits.iter().enumerate() {
            let cipher_bit = if let Some(steps) = steps.as_mut() {
                let observation = generator.step_observed();
                let cipher_bit = data_bit ^ observation.keystream_bit;
                steps.push(StepTrace::new(step, &observation, data_bit, cipher_bit));
                cipher_bit
            } else {
                data_bit ^ generator.step()
            };
            output.push(if cipher_bit == 1 { '1' } else { '0' });
        }

        self.state = EngineState::Ready(generator);
        Ok(TransformResult {
            output,
            steps,
            initial_state,
        })
    }
}
