use serde_json::Value;

use crate::errors::HashError;

/// Kind tag for an atomic value.
///
/// The set is closed; the tag participates in hashing, so two atoms
/// with identical payload bytes but different kinds never share a
/// digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Signed integer.
    Int,
    /// IEEE-754 double-precision float.
    Float,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Str,
    /// Raw byte sequence.
    Bytes,
    /// Explicit absence of a value.
    None,
}

impl Kind {
    /// Stable lowercase tag used in hashing.
    pub fn tag(&self) -> &'static str {
        match self {
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::Str => "str",
            Kind::Bytes => "bytes",
            Kind::None => "none",
        }
    }
}

/// An indivisible primitive value plus its kind tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// Signed integer.
    Int(i64),
    /// IEEE-754 double-precision float.
    Float(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Str(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
    /// Explicit absence of a value.
    None,
}

impl Atom {
    /// Kind tag of this atom.
    pub fn kind(&self) -> Kind {
        match self {
            Atom::Int(_) => Kind::Int,
            Atom::Float(_) => Kind::Float,
            Atom::Bool(_) => Kind::Bool,
            Atom::Str(_) => Kind::Str,
            Atom::Bytes(_) => Kind::Bytes,
            Atom::None => Kind::None,
        }
    }

    /// Deterministic payload encoding fed into the atom digest.
    ///
    /// Integers encode as ASCII decimal, floats as the big-endian
    /// IEEE-754 bit pattern, booleans as a single `0x00`/`0x01` byte,
    /// strings as UTF-8, byte sequences raw, and none as empty.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        match self {
            Atom::Int(v) => v.to_string().into_bytes(),
            Atom::Float(v) => v.to_bits().to_be_bytes().to_vec(),
            Atom::Bool(v) => vec![u8::from(*v)],
            Atom::Str(v) => v.as_bytes().to_vec(),
            Atom::Bytes(v) => v.clone(),
            Atom::None => Vec::new(),
        }
    }

    /// Converts a scalar JSON value into an atom.
    ///
    /// Numbers that fit `i64` become integers, other numbers become
    /// floats. Arrays and objects are not atomic and are rejected;
    /// byte atoms have no JSON spelling and are only built
    /// programmatically.
    pub fn from_json(value: &Value) -> Result<Self, HashError> {
        match value {
            Value::Null => Ok(Atom::None),
            Value::Bool(v) => Ok(Atom::Bool(*v)),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    Ok(Atom::Int(v))
                } else if let Some(v) = n.as_f64() {
                    Ok(Atom::Float(v))
                } else {
                    Err(HashError::InvalidStructure {
                        context: "atom".to_string(),
                        reason: format!("number {} has no atomic representation", n),
                    })
                }
            }
            Value::String(v) => Ok(Atom::Str(v.clone())),
            Value::Array(_) | Value::Object(_) => Err(HashError::NestedContainer {
                context: "atom".to_string(),
            }),
        }
    }

    /// Converts the atom back into a JSON value.
    ///
    /// Byte sequences render as their lowercase hex string; non-finite
    /// floats have no JSON representation and are rejected.
    pub fn to_json(&self) -> Result<Value, HashError> {
        match self {
            Atom::Int(v) => Ok(Value::from(*v)),
            Atom::Float(v) => serde_json::Number::from_f64(*v).map(Value::Number).ok_or(
                HashError::InvalidStructure {
                    context: "atom".to_string(),
                    reason: "non-finite float has no JSON representation".to_string(),
                },
            ),
            Atom::Bool(v) => Ok(Value::Bool(*v)),
            Atom::Str(v) => Ok(Value::String(v.clone())),
            Atom::Bytes(v) => Ok(Value::String(hex::encode(v))),
            Atom::None => Ok(Value::Null),
        }
    }
}
