//! Hash command implementation.

use arbor_hash::{hash_atom, hash_container, Atom, Container};
use serde_json::{json, Value};

use crate::commands::read_input;
use crate::output;

pub fn run(input: Option<String>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let json_str = read_input(input)?;
    let value: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?;

    match &value {
        Value::Array(_) | Value::Object(_) => {
            let container =
                Container::from_json(&value).map_err(|e| format!("Invalid container: {}", e))?;
            let tree = hash_container(&container);
            let root = tree.root().map(|d| d.to_hex());
            if json_output {
                println!(
                    "{}",
                    output::format_json(&json!({
                        "shape": container.shape().tag(),
                        "leaves": tree.len(),
                        "root": root,
                    }))
                );
            } else {
                println!(
                    "{}",
                    output::format_row("root", root.as_deref().unwrap_or("(none)"))
                );
                println!("{}", output::format_row("leaves", &tree.len().to_string()));
            }
        }
        scalar => {
            let atom = Atom::from_json(scalar).map_err(|e| format!("Invalid atom: {}", e))?;
            let digest = hash_atom(&atom);
            if json_output {
                println!(
                    "{}",
                    output::format_json(&json!({
                        "kind": atom.kind().tag(),
                        "digest": digest.to_hex(),
                    }))
                );
            } else {
                println!("{}", output::format_row(atom.kind().tag(), &digest.to_hex()));
            }
        }
    }
    Ok(())
}
