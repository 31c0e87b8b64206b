//! Integration tests for unit assembly and pool bookkeeping.

use arbor_schema::Schema;
use arbor_unit::{verify_document, FieldFilter, GroupUnit, OwnerFilter, UnitError, UnitPool};
use serde_json::json;

fn make_schema() -> Schema {
    Schema::from_json(&json!({
        "name": "string",
        "age": "int",
        "tags": "list[string]"
    }))
    .unwrap()
}

fn make_unit(owner: &str, name: &str) -> GroupUnit {
    GroupUnit::from_json(&json!({
        "owner": owner,
        "created_at": "2024-01-01T00:00:00Z",
        "nonce": "deadbeefdeadbeef",
        "credential": "cred_tok_1",
        "data": { "name": name, "age": 36, "tags": ["a", "b"] }
    }))
    .unwrap()
}

#[test]
fn pool_admits_schema_conforming_units() {
    let mut pool = UnitPool::new(make_schema()).unwrap();
    let hash = pool.admit(make_unit("org:acme", "ada")).unwrap();

    assert_eq!(pool.len(), 1);
    assert!(pool.contains(&hash));
    assert_eq!(
        pool.get(&hash).unwrap().owner().as_ref(),
        "org:acme"
    );
}

#[test]
fn pool_rejects_undeclared_data_fields() {
    let mut pool = UnitPool::new(make_schema()).unwrap();
    let unit = GroupUnit::from_json(&json!({
        "owner": "org:acme",
        "created_at": "2024-01-01T00:00:00Z",
        "nonce": "deadbeefdeadbeef",
        "credential": "cred_tok_1",
        "data": { "name": "ada", "shoe_size": 38 }
    }))
    .unwrap();

    assert!(matches!(
        pool.admit(unit),
        Err(UnitError::UndeclaredField { name }) if name == "shoe_size"
    ));
}

#[test]
fn pool_rejects_duplicate_package_hashes() {
    let mut pool = UnitPool::new(make_schema()).unwrap();
    pool.admit(make_unit("org:acme", "ada")).unwrap();

    assert!(matches!(
        pool.admit(make_unit("org:acme", "ada")),
        Err(UnitError::DuplicateUnit { .. })
    ));
    assert_eq!(pool.len(), 1);
}

#[test]
fn pool_construction_requires_a_valid_schema() {
    let bad = Schema::from_json(&json!({ "name": "string9000" })).unwrap();
    assert!(matches!(
        UnitPool::new(bad),
        Err(UnitError::SchemaRejected { detail })
            if detail == "Key type 'string9000' is not valid. "
    ));
}

#[test]
fn filters_select_by_owner_and_field() {
    let mut pool = UnitPool::new(make_schema()).unwrap();
    pool.admit(make_unit("org:acme", "ada")).unwrap();
    pool.admit(make_unit("org:umbrella", "eve")).unwrap();

    let acme = pool.select(&OwnerFilter {
        owner: "org:acme".to_string(),
    });
    assert_eq!(acme.len(), 1);
    assert_eq!(acme[0].owner().as_ref(), "org:acme");

    let named = pool.select(&FieldFilter {
        field: "name".to_string(),
    });
    assert_eq!(named.len(), 2);
}

#[test]
fn composite_filters_combine_predicates() {
    use arbor_unit::{AndFilter, OrFilter};

    let mut pool = UnitPool::new(make_schema()).unwrap();
    pool.admit(make_unit("org:acme", "ada")).unwrap();
    pool.admit(make_unit("org:umbrella", "eve")).unwrap();

    let both = AndFilter {
        filters: vec![
            Box::new(OwnerFilter {
                owner: "org:acme".to_string(),
            }),
            Box::new(FieldFilter {
                field: "name".to_string(),
            }),
        ],
    };
    assert_eq!(pool.select(&both).len(), 1);

    let either = OrFilter {
        filters: vec![
            Box::new(OwnerFilter {
                owner: "org:acme".to_string(),
            }),
            Box::new(OwnerFilter {
                owner: "org:umbrella".to_string(),
            }),
        ],
    };
    assert_eq!(pool.select(&either).len(), 2);
}

#[test]
fn verify_all_accepts_an_untampered_pool() {
    let mut pool = UnitPool::new(make_schema()).unwrap();
    pool.admit(make_unit("org:acme", "ada")).unwrap();
    pool.admit(make_unit("org:acme", "grace")).unwrap();

    let results = pool.verify_all().unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|(_, ok)| *ok));
}

#[test]
fn documents_survive_emit_parse_verify() {
    let unit = make_unit("org:acme", "ada");
    let doc = unit.to_document().unwrap();

    assert!(verify_document(&doc).unwrap());

    let reparsed = GroupUnit::from_json(&doc).unwrap();
    assert_eq!(
        reparsed.package_hash().unwrap(),
        unit.package_hash().unwrap()
    );
}

#[test]
fn owner_is_public_nonce_is_private() {
    let unit = make_unit("org:acme", "ada");
    let record = unit.to_record().unwrap();

    use arbor_hash::Visibility;
    let public: Vec<&str> = record
        .slots_with(Visibility::Public)
        .map(|s| s.name())
        .collect();
    let private: Vec<&str> = record
        .slots_with(Visibility::Private)
        .map(|s| s.name())
        .collect();

    assert_eq!(public, ["owner", "created_at", "age", "name", "tags"]);
    assert_eq!(private, ["nonce", "credential"]);
}
