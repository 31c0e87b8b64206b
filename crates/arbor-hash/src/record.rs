use std::collections::HashSet;

use crate::atom::Atom;
use crate::container::Container;
use crate::errors::HashError;

/// Slot visibility within a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Externally visible slot.
    Public,
    /// Internal slot.
    Private,
}

/// A value assigned to a record slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    /// A single atomic value.
    Atom(Atom),
    /// A container of atomic values.
    Container(Container),
}

/// A named slot holding an atom or a container.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    name: String,
    visibility: Visibility,
    value: SlotValue,
}

impl Slot {
    /// Creates an externally visible slot.
    pub fn public(name: impl Into<String>, value: SlotValue) -> Self {
        Slot {
            name: name.into(),
            visibility: Visibility::Public,
            value,
        }
    }

    /// Creates an internal slot.
    pub fn private(name: impl Into<String>, value: SlotValue) -> Self {
        Slot {
            name: name.into(),
            visibility: Visibility::Private,
            value,
        }
    }

    /// Slot name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slot visibility.
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Slot value.
    pub fn value(&self) -> &SlotValue {
        &self.value
    }
}

/// A named collection of public/private slots representing a composite
/// entity to be content-addressed.
///
/// Records are immutable once constructed. Slot iteration order is
/// insertion order and is part of the package hash: two structurally
/// equal records built with slots in a different order hash
/// differently.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    slots: Vec<Slot>,
}

impl Record {
    /// Creates a record over the given slots.
    ///
    /// Slot names must be unique across both visibility partitions.
    pub fn new(slots: Vec<Slot>) -> Result<Self, HashError> {
        let mut seen = HashSet::new();
        for slot in &slots {
            if !seen.insert(slot.name.as_str()) {
                return Err(HashError::DuplicateSlot {
                    name: slot.name.clone(),
                });
            }
        }
        Ok(Record { slots })
    }

    /// All slots in insertion order.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots of one visibility partition, in insertion order.
    pub fn slots_with(&self, visibility: Visibility) -> impl Iterator<Item = &Slot> + '_ {
        self.slots
            .iter()
            .filter(move |slot| slot.visibility == visibility)
    }

    /// Looks a slot up by name.
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.name == name)
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the record has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_slot_names_are_rejected() {
        let err = Record::new(vec![
            Slot::public("owner", SlotValue::Atom(Atom::Str("org:a".to_string()))),
            Slot::private("owner", SlotValue::Atom(Atom::None)),
        ])
        .unwrap_err();
        assert!(matches!(err, HashError::DuplicateSlot { name } if name == "owner"));
    }

    #[test]
    fn visibility_partitions_preserve_insertion_order() {
        let record = Record::new(vec![
            Slot::public("a", SlotValue::Atom(Atom::Int(1))),
            Slot::private("n", SlotValue::Atom(Atom::Int(2))),
            Slot::public("b", SlotValue::Atom(Atom::Int(3))),
        ])
        .unwrap();
        let names: Vec<&str> = record
            .slots_with(Visibility::Public)
            .map(Slot::name)
            .collect();
        assert_eq!(names, ["a", "b"]);
    }
}
