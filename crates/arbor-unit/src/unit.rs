//! Group-unit assembly and document verification.

use arbor_hash::{record_hash, Atom, Container, Digest, Record, Slot, SlotValue};
use serde_json::{Map, Value};

use crate::errors::UnitError;
use crate::identifiers::{Credential, Nonce, OwnerId, Timestamp};

/// JSON document type for unit emission and parsing.
pub type UnitJson = Value;

/// Slot names reserved by the unit envelope.
pub const RESERVED_SLOTS: &[&str] = &["owner", "created_at", "nonce", "credential"];

/// A composite group unit, content-addressed by its record package
/// hash.
///
/// Owner, creation time, and the named data fields populate the public
/// partition; the nonce and credential populate the private partition.
/// Units are immutable once constructed. Data fields are stored in
/// name order so the package hash is stable across the JSON boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupUnit {
    owner: OwnerId,
    created_at: Timestamp,
    nonce: Nonce,
    credential: Credential,
    data: Vec<(String, SlotValue)>,
}

impl GroupUnit {
    /// Assembles a unit from validated parts.
    ///
    /// Data field names must not collide with the built-in slot names;
    /// fields are reordered by name.
    pub fn new(
        owner: OwnerId,
        created_at: Timestamp,
        nonce: Nonce,
        credential: Credential,
        mut data: Vec<(String, SlotValue)>,
    ) -> Result<Self, UnitError> {
        for (name, _) in &data {
            if RESERVED_SLOTS.contains(&name.as_str()) {
                return Err(UnitError::ReservedField { name: name.clone() });
            }
        }
        data.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(GroupUnit {
            owner,
            created_at,
            nonce,
            credential,
            data,
        })
    }

    /// Owner identifier.
    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Per-unit nonce.
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// Credential token.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Named data fields, in name order.
    pub fn data(&self) -> &[(String, SlotValue)] {
        &self.data
    }

    /// Lowers the unit to its record form.
    ///
    /// Public slots: owner, created_at, then each data field in name
    /// order. Private slots: nonce, credential.
    pub fn to_record(&self) -> Result<Record, UnitError> {
        let mut slots = Vec::with_capacity(self.data.len() + 4);
        slots.push(Slot::public(
            "owner",
            SlotValue::Atom(Atom::Str(self.owner.as_ref().to_string())),
        ));
        slots.push(Slot::public(
            "created_at",
            SlotValue::Atom(Atom::Str(self.created_at.as_ref().to_string())),
        ));
        for (name, value) in &self.data {
            slots.push(Slot::public(name.clone(), value.clone()));
        }
        slots.push(Slot::private(
            "nonce",
            SlotValue::Atom(Atom::Str(self.nonce.as_ref().to_string())),
        ));
        slots.push(Slot::private(
            "credential",
            SlotValue::Atom(Atom::Str(self.credential.as_ref().to_string())),
        ));
        Ok(Record::new(slots)?)
    }

    /// Content-addressed identity of the unit: the record package root.
    pub fn package_hash(&self) -> Result<Digest, UnitError> {
        Ok(record_hash(&self.to_record()?)?)
    }

    /// Builds a unit from a JSON description.
    ///
    /// Expected keys: `owner`, `created_at`, `nonce`, `credential`,
    /// and an optional `data` object whose scalar values become atoms
    /// and whose arrays/objects become containers. An embedded
    /// `"hash"` field, if present, is ignored here; see
    /// [`verify_document`].
    pub fn from_json(value: &Value) -> Result<Self, UnitError> {
        let map = value
            .as_object()
            .ok_or_else(|| UnitError::InvalidDocument("expected a JSON object".to_string()))?;
        let owner = OwnerId::parse(require_str(map, "owner")?)?;
        let created_at = Timestamp::parse(require_str(map, "created_at")?)?;
        let nonce = Nonce::parse(require_str(map, "nonce")?)?;
        let credential = Credential::parse(require_str(map, "credential")?)?;
        let mut data = Vec::new();
        if let Some(data_value) = map.get("data") {
            let data_map = data_value.as_object().ok_or_else(|| {
                UnitError::InvalidDocument("'data' must be a JSON object".to_string())
            })?;
            for (name, field) in data_map {
                let slot_value = match field {
                    Value::Array(_) | Value::Object(_) => {
                        SlotValue::Container(Container::from_json(field)?)
                    }
                    scalar => SlotValue::Atom(Atom::from_json(scalar)?),
                };
                data.push((name.clone(), slot_value));
            }
        }
        GroupUnit::new(owner, created_at, nonce, credential, data)
    }

    /// Emits the unit document with its package hash embedded under
    /// `"hash"`.
    pub fn to_document(&self) -> Result<UnitJson, UnitError> {
        let mut data = Map::new();
        for (name, value) in &self.data {
            let json = match value {
                SlotValue::Atom(atom) => atom.to_json()?,
                SlotValue::Container(container) => container.to_json()?,
            };
            data.insert(name.clone(), json);
        }
        let hash = self.package_hash()?;
        let mut doc = Map::new();
        doc.insert(
            "owner".to_string(),
            Value::String(self.owner.as_ref().to_string()),
        );
        doc.insert(
            "created_at".to_string(),
            Value::String(self.created_at.as_ref().to_string()),
        );
        doc.insert(
            "nonce".to_string(),
            Value::String(self.nonce.as_ref().to_string()),
        );
        doc.insert(
            "credential".to_string(),
            Value::String(self.credential.as_ref().to_string()),
        );
        doc.insert("data".to_string(), Value::Object(data));
        doc.insert("hash".to_string(), serde_json::to_value(hash)?);
        Ok(Value::Object(doc))
    }

    /// Serializes the unit document to canonical JSON bytes.
    pub fn canonical_document(&self) -> Result<Vec<u8>, UnitError> {
        let doc = self.to_document()?;
        canonical_json::to_string(&doc)
            .map(String::into_bytes)
            .map_err(|err| UnitError::Canonicalization(err.to_string()))
    }
}

/// Verifies a unit document against its embedded `"hash"` claim.
///
/// This rebuilds the unit from the document, recomputes the package
/// hash, and checks that the claimed hash matches the computed one.
pub fn verify_document(document: &UnitJson) -> Result<bool, UnitError> {
    let map = document
        .as_object()
        .ok_or_else(|| UnitError::InvalidDocument("expected a JSON object".to_string()))?;
    let claimed_value = map.get("hash").cloned().ok_or_else(|| UnitError::MissingField {
        name: "hash".to_string(),
    })?;
    let claimed: Digest = serde_json::from_value(claimed_value)?;

    let unit = GroupUnit::from_json(document)?;
    Ok(unit.package_hash()? == claimed)
}

fn require_str<'a>(map: &'a Map<String, Value>, key: &str) -> Result<&'a str, UnitError> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| UnitError::MissingField {
            name: key.to_string(),
        })
}
