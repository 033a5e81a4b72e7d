//! Menu-driven session over any reader and writer.

use crate::job::{Direction, Job};
use log::debug;
use std::io::{self, BufRead, Write};
use tinya51_core::validate::InputFormat;

/// Runs the menu loop until the user picks "Exit" or the input ends.
pub(crate) fn run(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "TinyA5/1 Encryption/Decryption Tool")?;
    writeln!(out, "{}", "=".repeat(40))?;

    loop {
        writeln!(out, "\nOptions:")?;
        writeln!(out, "1. Encrypt")?;
        writeln!(out, "2. Decrypt")?;
        writeln!(out, "3. Exit")?;

        let Some(choice) = prompt(input, out, "\nSelect option (1-3): ")? else {
            return Ok(());
        };
        let direction = match choice.as_str() {
            "1" => Direction::Encrypt,
            "2" => Direction::Decrypt,
            "3" => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
            _ => {
                writeln!(out, "Invalid choice. Please select 1, 2, or 3.")?;
                continue;
            }
        };

        writeln!(out, "\nInput format:")?;
        writeln!(out, "1. Binary (e.g., '111')")?;
        writeln!(out, "2. Characters (e.g., 'H' for A-H)")?;
        let Some(format_choice) = prompt(input, out, "Select format (1-2): ")? else {
            return Ok(());
        };
        let (format, data_prompt) = match format_choice.as_str() {
            "1" => (InputFormat::Binary, "Enter binary data: "),
            "2" => (InputFormat::Char, "Enter characters (A-H): "),
            _ => {
                writeln!(out, "Invalid format choice.")?;
                continue;
            }
        };

        let Some(data) = prompt(input, out, data_prompt)? else {
            return Ok(());
        };
        let Some(key) = prompt(input, out, "Enter 23-bit key: ")? else {
            return Ok(());
        };

        let mut job = Job {
            direction,
            key: &key,
            data: &data,
            format,
            verbose: false,
        };
        if let Err(e) = job.validate() {
            writeln!(out, "{e}")?;
            continue;
        }

        writeln!(out, "\nOutput mode:")?;
        writeln!(out, "1. Immediate (show result only)")?;
        writeln!(out, "2. Verbose (show step-by-step)")?;
        let Some(mode_choice) = prompt(input, out, "Select mode (1-2): ")? else {
            return Ok(());
        };
        job.verbose = mode_choice == "2";
        debug!("Interactive job: {job:?}");

        match job.execute() {
            Ok(outcome) => {
                writeln!(out, "\n{} '{data}' with key '{key}'...", direction.verb())?;
                job.write_report(out, &outcome)?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }
}

/// Shows `text` and reads one trimmed line. `None` means the input is exhausted.
fn prompt(
    input: &mut impl BufRead,
    out: &mut impl Write,
    text: &str,
) -> io::Result<Option<String>> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
