use arbor_hash::{Digest, DigestAlg};
use serde_json::json;

#[test]
fn digest_serializes_to_golden_json() {
    let hex = "a".repeat(64);
    let digest = Digest::parse(DigestAlg::Sha256, &hex).unwrap();

    assert_eq!(
        serde_json::to_string(&digest).unwrap(),
        format!(r#"{{"alg":"sha-256","hex":"{}"}}"#, hex)
    );
}

#[test]
fn digest_deserializes_from_golden_json() {
    let hex = "0123456789abcdef".repeat(4);
    let value = json!({ "alg": "sha-256", "hex": hex });
    let digest: Digest = serde_json::from_value(value).unwrap();
    assert_eq!(digest.to_hex(), hex);
}

#[test]
fn digest_deserialization_rejects_bad_hex() {
    let value = json!({ "alg": "sha-256", "hex": "not-hex" });
    assert!(serde_json::from_value::<Digest>(value).is_err());

    let upper = json!({ "alg": "sha-256", "hex": "A".repeat(64) });
    assert!(serde_json::from_value::<Digest>(upper).is_err());
}

#[test]
fn display_matches_hex_form() {
    let digest = Digest::of_bytes(b"display");
    assert_eq!(digest.to_string(), digest.to_hex());
    assert_eq!(digest.to_hex().len(), 64);
    assert!(digest
        .to_hex()
        .chars()
        .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}
