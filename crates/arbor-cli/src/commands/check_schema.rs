//! Check-schema command implementation.

use arbor_schema::Schema;
use serde_json::{json, Value};

use crate::commands::read_input;
use crate::output;

pub fn run(
    input: Option<String>,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    let schema = Schema::from_json(&value).map_err(|e| format!("Invalid schema: {}", e))?;
    let verdict = schema
        .verify()
        .map_err(|e| format!("Verification failed: {}", e))?;

    if json_output {
        println!(
            "{}",
            output::format_json(&json!({
                "valid": verdict.is_valid,
                "detail": verdict.detail,
            }))
        );
    } else if verdict.is_valid {
        println!("valid");
    } else {
        println!("invalid: {}", verdict.detail);
    }

    if strict && !verdict.is_valid {
        std::process::exit(1);
    }
    Ok(())
}
