use serde_json::{Map, Value};

use crate::atom::Atom;
use crate::errors::HashError;

/// Declared shape of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Ordered list.
    List,
    /// Fixed tuple.
    Tuple,
    /// Unordered set (item order still fixed at construction).
    Set,
    /// Frozen set.
    FrozenSet,
    /// Key/value map, stored as a flattened key, value, ... sequence.
    Map,
}

impl Shape {
    /// Stable lowercase tag for the shape.
    pub fn tag(&self) -> &'static str {
        match self {
            Shape::List => "list",
            Shape::Tuple => "tuple",
            Shape::Set => "set",
            Shape::FrozenSet => "frozenset",
            Shape::Map => "map",
        }
    }
}

/// An ordered sequence of atoms with a declared shape.
///
/// Items are atomic by construction; the dynamic no-sub-container rule
/// is enforced at the JSON boundary, where arrays and objects nested
/// among the items are rejected. Map containers hold the flattened
/// `key, value, key, value, ...` sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    shape: Shape,
    items: Vec<Atom>,
}

impl Container {
    /// Creates a container over already-atomic items.
    ///
    /// Map containers must hold an even number of items (flattened
    /// pairs).
    pub fn new(shape: Shape, items: Vec<Atom>) -> Result<Self, HashError> {
        if shape == Shape::Map && items.len() % 2 != 0 {
            return Err(HashError::InvalidStructure {
                context: "map container".to_string(),
                reason: format!("flattened map needs an even item count, got {}", items.len()),
            });
        }
        Ok(Container { shape, items })
    }

    /// Converts a JSON array or object into a container.
    ///
    /// Arrays become list containers; objects become map containers
    /// with keys and values interleaved in the object's (sorted) key
    /// order. Any array or object appearing among the items is a
    /// nested container and is rejected.
    pub fn from_json(value: &Value) -> Result<Self, HashError> {
        match value {
            Value::Array(items) => {
                let mut atoms = Vec::with_capacity(items.len());
                for (idx, item) in items.iter().enumerate() {
                    atoms.push(atom_item(item, format!("list item [{}]", idx))?);
                }
                Ok(Container {
                    shape: Shape::List,
                    items: atoms,
                })
            }
            Value::Object(map) => {
                let mut atoms = Vec::with_capacity(map.len() * 2);
                for (key, item) in map {
                    atoms.push(Atom::Str(key.clone()));
                    atoms.push(atom_item(item, format!("map value '{}'", key))?);
                }
                Ok(Container {
                    shape: Shape::Map,
                    items: atoms,
                })
            }
            _ => Err(HashError::InvalidStructure {
                context: "container".to_string(),
                reason: "expected a JSON array or object".to_string(),
            }),
        }
    }

    /// Converts the container back into a JSON value.
    ///
    /// Map containers are un-flattened into objects; every other shape
    /// renders as an array.
    pub fn to_json(&self) -> Result<Value, HashError> {
        match self.shape {
            Shape::Map => {
                let mut map = Map::new();
                for pair in self.items.chunks(2) {
                    let key = match &pair[0] {
                        Atom::Str(k) => k.clone(),
                        other => {
                            return Err(HashError::InvalidStructure {
                                context: "map container".to_string(),
                                reason: format!("map key must be a string, got {}", other.kind().tag()),
                            })
                        }
                    };
                    map.insert(key, pair[1].to_json()?);
                }
                Ok(Value::Object(map))
            }
            _ => {
                let mut items = Vec::with_capacity(self.items.len());
                for item in &self.items {
                    items.push(item.to_json()?);
                }
                Ok(Value::Array(items))
            }
        }
    }

    /// Declared shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Items in hashing order (maps pre-flattened).
    pub fn items(&self) -> &[Atom] {
        &self.items
    }

    /// Number of items (a map of `n` entries reports `2n`).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the container holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn atom_item(value: &Value, context: String) -> Result<Atom, HashError> {
    match value {
        Value::Array(_) | Value::Object(_) => Err(HashError::NestedContainer { context }),
        scalar => Atom::from_json(scalar),
    }
}
