//! Unit command implementation.

use arbor_schema::Schema;
use arbor_unit::{GroupUnit, UnitPool};
use serde_json::Value;

pub fn run(input: String, schema: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = std::fs::read_to_string(&input)
        .map_err(|e| format!("Failed to read file {}: {}", input, e))?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;
    let unit = GroupUnit::from_json(&value).map_err(|e| format!("Invalid unit: {}", e))?;

    if let Some(schema_path) = schema {
        let schema_str = std::fs::read_to_string(&schema_path)
            .map_err(|e| format!("Failed to read file {}: {}", schema_path, e))?;
        let schema_value: Value =
            serde_json::from_str(&schema_str).map_err(|e| format!("Invalid JSON: {}", e))?;
        let schema = Schema::from_json(&schema_value)
            .map_err(|e| format!("Invalid schema: {}", e))?;
        // Admission into a throwaway pool runs the schema gate.
        let mut pool =
            UnitPool::new(schema).map_err(|e| format!("Schema rejected: {}", e))?;
        pool.admit(unit.clone())
            .map_err(|e| format!("Unit rejected: {}", e))?;
    }

    let bytes = unit
        .canonical_document()
        .map_err(|e| format!("Failed to emit document: {}", e))?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}
