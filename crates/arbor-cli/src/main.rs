//! Arbor CLI - Command-line interface for content hashing, unit assembly, and schema verification.

use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check_schema, hash, unit, verify};

#[derive(Parser)]
#[command(name = "arbor")]
#[command(about = "Arbor content hashing and schema verification CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a JSON value (scalar, array, or object)
    Hash {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assemble a group unit and emit its canonical document
    Unit {
        /// Input JSON unit description
        input: String,
        /// Validate the unit's data fields against a schema file first
        #[arg(long)]
        schema: Option<String>,
    },
    /// Verify a unit document against its embedded hash
    Verify {
        /// Unit document file
        document: String,
        /// Exit with error code if verification fails
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Verify a schema's type expressions
    CheckSchema {
        /// Schema JSON file (or stdin if not provided)
        input: Option<String>,
        /// Exit with error code on an invalid verdict
        #[arg(long)]
        strict: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Hash { input, json } => hash::run(input, json),
        Commands::Unit { input, schema } => unit::run(input, schema),
        Commands::Verify {
            document,
            strict,
            json,
        } => verify::run(document, strict, json),
        Commands::CheckSchema {
            input,
            strict,
            json,
        } => check_schema::run(input, strict, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
