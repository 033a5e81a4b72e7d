//! One encrypt or decrypt request and the text report printed for it.

use std::io::{self, Write};
use thiserror::Error;
use tinya51_core::CipherError;
use tinya51_core::cipher::TinyA51;
use tinya51_core::codec;
use tinya51_core::register::{RegisterId, RegisterSnapshot};
use tinya51_core::trace::{StepTrace, TransformResult};
use tinya51_core::validate::{InputFormat, validate_data, validate_key};

/// Why a job could not run. `Display` gives the line shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub(crate) enum JobError {
    /// The key failed validation.
    #[error("Key error: {0}")]
    Key(String),
    /// The data failed validation for its format.
    #[error("Data error: {0}")]
    Data(String),
    /// A-H data could not be turned into bits.
    #[error("Conversion error: {0}")]
    Conversion(#[source] CipherError),
    /// The cipher refused its input.
    #[error("Error: {0}")]
    Cipher(#[from] CipherError),
}

/// Which way the data is going. Only the labels differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    const fn input_label(self) -> &'static str {
        match self {
            Self::Encrypt => "Plaintext",
            Self::Decrypt => "Ciphertext",
        }
    }

    const fn output_label(self) -> &'static str {
        match self {
            Self::Encrypt => "Ciphertext",
            Self::Decrypt => "Plaintext",
        }
    }

    pub(crate) const fn verb(self) -> &'static str {
        match self {
            Self::Encrypt => "Encrypting",
            Self::Decrypt => "Decrypting",
        }
    }
}

/// Input for one run of the cipher.
#[derive(Debug, Clone)]
pub(crate) struct Job<'a> {
    pub(crate) direction: Direction,
    pub(crate) key: &'a str,
    pub(crate) data: &'a str,
    pub(crate) format: InputFormat,
    pub(crate) verbose: bool,
}

/// A finished run: the bits actually fed to the cipher and what came out.
#[derive(Debug, Clone)]
pub(crate) struct Outcome {
    pub(crate) binary_input: String,
    pub(crate) result: TransformResult,
}

impl Job<'_> {
    /// Checks the key, then the data, without running the cipher.
    pub(crate) fn validate(&self) -> Result<(), JobError> {
        let key_check = validate_key(self.key);
        if !key_check.valid {
            return Err(JobError::Key(key_check.message));
        }
        let data_check = validate_data(self.data, self.format);
        if !data_check.valid {
            return Err(JobError::Data(data_check.message));
        }
        Ok(())
    }

    /// Validates the inputs and runs a fresh cipher over them.
    pub(crate) fn execute(&self) -> Result<Outcome, JobError> {
        self.validate()?;

        let binary_input = match self.format {
            InputFormat::Binary => self.data.to_string(),
            InputFormat::Char => codec::encode(self.data).map_err(JobError::Conversion)?,
        };

        let mut cipher = TinyA51::new(self.key)?;
        let result = cipher.transform(&binary_input, self.verbose)?;
        Ok(Outcome {
            binary_input,
            result,
        })
    }

    /// Prints the trace (when requested) followed by the result lines.
    pub(crate) fn write_report(&self, out: &mut impl Write, outcome: &Outcome) -> io::Result<()> {
        if let Some(steps) = &outcome.result.steps {
            if let Some(initial) = &outcome.result.initial_state {
                writeln!(out, "Initial register state:")?;
                write_registers(out, initial, "")?;
            }
            for step in steps {
                write_step(out, step)?;
            }
            writeln!(out, "\n{}", "=".repeat(50))?;
            writeln!(out, "FINAL RESULT")?;
            writeln!(out, "{}", "=".repeat(50))?;
        }

        let input_label = self.direction.input_label();
        let output_label = self.direction.output_label();
        let is_char = self.format == InputFormat::Char;

        writeln!(out, "{input_label}: {}", self.data)?;
        if is_char {
            writeln!(out, "{input_label} (binary): {}", outcome.binary_input)?;
        }
        writeln!(out, "{output_label} (binary): {}", outcome.result.output)?;
        if is_char {
            match codec::decode(&outcome.result.output) {
                Ok(chars) => writeln!(out, "{output_label} (characters): {chars}")?,
                Err(_) => writeln!(out, "{output_label} cannot be converted to characters")?,
            }
        }
        Ok(())
    }
}

pub(crate) fn write_registers(
    out: &mut impl Write,
    snapshot: &RegisterSnapshot,
    indent: &str,
) -> io::Result<()> {
    for id in RegisterId::ALL {
        let bits: Vec<String> = snapshot.register(id).iter().map(u8::to_string).collect();
        writeln!(out, "{indent}{id}: {}", bits.join(" "))?;
    }
    Ok(())
}

fn write_step(out: &mut impl Write, step: &StepTrace) -> io::Result<()> {
    let rule = "=".repeat(50);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "STEP {}", step.step)?;
    writeln!(out, "{rule}")?;

    writeln!(
        out,
        "Control bits: x2={}, y7={}, z8={}",
        step.x2, step.y7, step.z8
    )?;
    writeln!(
        out,
        "Majority function: maj({}, {}, {}) = {}",
        step.x2, step.y7, step.z8, step.majority
    )?;

    writeln!(out, "\nRegister rotations:")?;
    writeln!(out, "  Rotate X: {}", step.rotate_x)?;
    writeln!(out, "  Rotate Y: {}", step.rotate_y)?;
    writeln!(out, "  Rotate Z: {}", step.rotate_z)?;

    writeln!(out, "\nRegister states:")?;
    writeln!(out, "  Before rotation:")?;
    write_registers(out, &step.before(), "    ")?;
    writeln!(out, "  After rotation:")?;
    write_registers(out, &step.after(), "    ")?;

    writeln!(out, "\nKeystream generation:")?;
    writeln!(
        out,
        "  s = x5 ⊕ y7 ⊕ z8 = {} ⊕ {} ⊕ {} = {}",
        step.x_after[5], step.y_after[7], step.z_after[8], step.keystream_bit
    )?;

    writeln!(out, "\nEncryption:")?;
    writeln!(out, "  Data bit: {}", step.data_bit)?;
    writeln!(
        out,
        "  Cipher bit: {} ⊕ {} = {}",
        step.data_bit, step.keystream_bit, step.cipher_bit
    )
}
