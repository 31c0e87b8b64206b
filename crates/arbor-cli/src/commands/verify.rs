//! Verify command implementation.

use arbor_unit::verify_document;
use serde_json::{json, Value};

use crate::output;

pub fn run(
    document: String,
    strict: bool,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = std::fs::read_to_string(&document)
        .map_err(|e| format!("Failed to read file {}: {}", document, e))?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    let ok = verify_document(&value).map_err(|e| format!("Verification failed: {}", e))?;
    let claimed = value
        .get("hash")
        .and_then(|h| h.get("hex"))
        .and_then(|h| h.as_str())
        .unwrap_or("?");

    if json_output {
        println!(
            "{}",
            output::format_json(&json!({
                "hash": claimed,
                "verdict": if ok { "ok" } else { "mismatch" },
            }))
        );
    } else {
        println!("{}", output::format_row(if ok { "ok" } else { "mismatch" }, claimed));
    }

    if strict && !ok {
        std::process::exit(1);
    }
    Ok(())
}
