#![deny(missing_docs)]
//! A command-line interface for the TinyA5/1 stream cipher.

use clap::{Args, Parser, Subcommand, ValueEnum};
use job::{Direction, Job};
use log::{error, info};
use std::io::{self, Write};
use tinya51_core::codec;
use tinya51_core::key_generator;
use tinya51_core::validate::{self, InputFormat, Verdict};

mod interactive;
mod job;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Encrypt three bits\ntinya51-cli encrypt --data 111 --key 10010101001110100110000\n\n# Decrypt with a step-by-step trace\ntinya51-cli decrypt --data 010 --key 10010101001110100110000 --verbose\n\n# Encrypt A-H characters\ntinya51-cli encrypt --data HEAD --key 10010101001110100110000 --char\n\n# Start the menu-driven mode\ntinya51-cli interactive"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt binary or A-H data
    Encrypt(TransformArgs),
    /// Decrypt binary or A-H data
    Decrypt(TransformArgs),
    /// Convert between A-H characters and binary
    Convert {
        /// The format of TEXT
        #[arg(long, value_enum)]
        from: Format,

        /// The text to convert
        text: String,
    },
    /// Check a key and/or data without running the cipher
    Validate {
        /// The 23-bit binary key to check
        #[arg(long)]
        key: Option<String>,

        /// The data to check
        #[arg(long)]
        data: Option<String>,

        /// Treat the data as A-H characters instead of binary
        #[arg(long = "char")]
        chars: bool,
    },
    /// Print a fresh random 23-bit key
    Keygen,
    /// Run the menu-driven interactive mode
    Interactive,
}

#[derive(Args)]
struct TransformArgs {
    /// The data to process
    #[arg(long)]
    data: String,

    /// The 23-bit binary key
    #[arg(long)]
    key: String,

    /// Treat the data as A-H characters instead of binary
    #[arg(long = "char")]
    chars: bool,

    /// Show the step-by-step execution
    #[arg(short, long)]
    verbose: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Char,
    Binary,
}

impl From<bool> for Format {
    fn from(chars: bool) -> Self {
        if chars { Self::Char } else { Self::Binary }
    }
}

impl From<Format> for InputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Char => Self::Char,
            Format::Binary => Self::Binary,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Encrypt(args) => transform(Direction::Encrypt, args),
        Commands::Decrypt(args) => transform(Direction::Decrypt, args),
        Commands::Convert { from, text } => {
            let converted = match from {
                Format::Char => codec::encode(text),
                Format::Binary => codec::decode(text),
            };
            match converted {
                Ok(converted) => println!("{converted}"),
                Err(e) => {
                    error!("Conversion error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Validate { key, data, chars } => {
            let mut verdicts: Vec<(&str, Verdict)> = Vec::new();
            if let Some(key) = key {
                verdicts.push(("Key", validate::validate_key(key)));
            }
            if let Some(data) = data {
                let format = InputFormat::from(Format::from(*chars));
                verdicts.push(("Data", validate::validate_data(data, format)));
            }
            if verdicts.is_empty() {
                error!("Nothing to validate. Pass --key and/or --data.");
                std::process::exit(1);
            }

            for (label, verdict) in &verdicts {
                println!("{label}: {}", verdict.message);
            }
            if verdicts.iter().any(|(_, verdict)| !verdict.valid) {
                std::process::exit(1);
            }
        }
        Commands::Keygen => match key_generator::generate_key() {
            Ok(key) => println!("{key}"),
            Err(e) => {
                error!("Failed to generate key: {e}");
                std::process::exit(1);
            }
        },
        Commands::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout().lock();
            if let Err(e) = interactive::run(&mut input, &mut out) {
                error!("Interactive session failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn transform(direction: Direction, args: &TransformArgs) {
    let job = Job {
        direction,
        key: &args.key,
        data: &args.data,
        format: Format::from(args.chars).into(),
        verbose: args.verbose,
    };
    info!(
        "{} {} character(s) of {} data.",
        direction.verb(),
        args.data.chars().count(),
        job.format.as_str()
    );

    let outcome = job.execute().unwrap_or_else(|message| {
        error!("{message}");
        std::process::exit(1);
    });

    let mut out = io::stdout().lock();
    let written = if args.json {
        match serde_json::to_string_pretty(&outcome.result) {
            Ok(json) => writeln!(out, "{json}"),
            Err(e) => {
                error!("Failed to serialize result: {e}");
                std::process::exit(1);
            }
        }
    } else {
        job.write_report(&mut out, &outcome)
    };
    if let Err(e) = written {
        error!("Failed to write output: {e}");
        std::process::exit(1);
    }
}
