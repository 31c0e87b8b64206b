//! CLI command implementations.

use std::io::{self, Read};

pub mod check_schema;
pub mod hash;
pub mod unit;
pub mod verify;

/// Reads JSON text from a file argument or stdin.
pub(crate) fn read_input(input: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(path) = input {
        Ok(std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?)
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    }
}
