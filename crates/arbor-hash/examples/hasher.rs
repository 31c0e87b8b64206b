use arbor_hash::{hash_container, record_hash, Atom, Container, Record, Slot, SlotValue};
use serde_json::json;

fn main() {
    let container = match Container::from_json(&json!(["alpha", "beta", 42])) {
        Ok(container) => container,
        Err(err) => {
            eprintln!("container construction failed: {}", err);
            std::process::exit(1);
        }
    };

    let tree = hash_container(&container);
    println!("leaves: {}", tree.len());
    if let Some(root) = tree.root() {
        println!("root:   {}", root);
    }

    let record = Record::new(vec![
        Slot::public(
            "owner",
            SlotValue::Atom(Atom::Str("org:example".to_string())),
        ),
        Slot::public("items", SlotValue::Container(container)),
        Slot::private(
            "nonce",
            SlotValue::Atom(Atom::Str("deadbeefdeadbeef".to_string())),
        ),
    ]);

    match record.and_then(|record| record_hash(&record)) {
        Ok(hash) => println!("record: {}", hash),
        Err(err) => {
            eprintln!("record hashing failed: {}", err);
            std::process::exit(1);
        }
    }
}
