//! Pool bookkeeping for admitted group units.

use std::collections::BTreeMap;

use arbor_hash::Digest;
use arbor_schema::Schema;

use crate::errors::UnitError;
use crate::unit::GroupUnit;

/// Filter predicate over pooled units.
pub trait UnitFilter {
    /// Returns true if the unit matches the filter criteria.
    fn matches(&self, unit: &GroupUnit) -> bool;
}

/// Filter by owner identifier.
#[derive(Debug, Clone)]
pub struct OwnerFilter {
    /// Owner identifier to match (e.g. `org:acme`).
    pub owner: String,
}

impl UnitFilter for OwnerFilter {
    fn matches(&self, unit: &GroupUnit) -> bool {
        unit.owner().as_ref() == self.owner
    }
}

/// Filter by presence of a named data field.
#[derive(Debug, Clone)]
pub struct FieldFilter {
    /// Data field name that must be present.
    pub field: String,
}

impl UnitFilter for FieldFilter {
    fn matches(&self, unit: &GroupUnit) -> bool {
        unit.data().iter().any(|(name, _)| *name == self.field)
    }
}

/// Composite filter: all filters must match (AND).
pub struct AndFilter {
    /// Filters to combine with AND logic.
    pub filters: Vec<Box<dyn UnitFilter>>,
}

impl UnitFilter for AndFilter {
    fn matches(&self, unit: &GroupUnit) -> bool {
        self.filters.iter().all(|f| f.matches(unit))
    }
}

/// Composite filter: any filter must match (OR).
pub struct OrFilter {
    /// Filters to combine with OR logic.
    pub filters: Vec<Box<dyn UnitFilter>>,
}

impl UnitFilter for OrFilter {
    fn matches(&self, unit: &GroupUnit) -> bool {
        self.filters.iter().any(|f| f.matches(unit))
    }
}

/// Controller bookkeeping for content-addressed group units.
///
/// A pool is constructed over a schema whose verification verdict must
/// pass. Admission checks each unit's data field names against that
/// schema and keys the unit by its package hash, so the pool doubles
/// as a content-addressed index.
pub struct UnitPool {
    schema: Schema,
    units: BTreeMap<Digest, GroupUnit>,
}

impl UnitPool {
    /// Creates a pool over a verified schema.
    ///
    /// A schema whose verdict is invalid is rejected with the full
    /// diagnostic detail.
    pub fn new(schema: Schema) -> Result<Self, UnitError> {
        let verdict = schema.verify()?;
        if !verdict.is_valid {
            return Err(UnitError::SchemaRejected {
                detail: verdict.detail,
            });
        }
        Ok(UnitPool {
            schema,
            units: BTreeMap::new(),
        })
    }

    /// The pool's schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Admits a unit and returns its package hash.
    ///
    /// Every data field name must be declared by the pool schema; a
    /// unit whose package hash is already pooled is a duplicate.
    pub fn admit(&mut self, unit: GroupUnit) -> Result<Digest, UnitError> {
        for (name, _) in unit.data() {
            if !self.schema.has_field(name) {
                return Err(UnitError::UndeclaredField { name: name.clone() });
            }
        }
        let hash = unit.package_hash()?;
        if self.units.contains_key(&hash) {
            return Err(UnitError::DuplicateUnit {
                hash: hash.to_hex(),
            });
        }
        self.units.insert(hash, unit);
        Ok(hash)
    }

    /// Looks a unit up by package hash.
    pub fn get(&self, hash: &Digest) -> Option<&GroupUnit> {
        self.units.get(hash)
    }

    /// True when a unit with this hash is pooled.
    pub fn contains(&self, hash: &Digest) -> bool {
        self.units.contains_key(hash)
    }

    /// Number of pooled units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True when the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterates pooled units in hash order.
    pub fn iter(&self) -> impl Iterator<Item = (&Digest, &GroupUnit)> {
        self.units.iter()
    }

    /// Units matching the filter, in hash order.
    pub fn select<'a>(&'a self, filter: &dyn UnitFilter) -> Vec<&'a GroupUnit> {
        self.units
            .values()
            .filter(|unit| filter.matches(unit))
            .collect()
    }

    /// Recomputes every pooled unit's package hash against its key.
    pub fn verify_all(&self) -> Result<Vec<(Digest, bool)>, UnitError> {
        let mut results = Vec::with_capacity(self.units.len());
        for (hash, unit) in &self.units {
            results.push((*hash, unit.package_hash()? == *hash));
        }
        Ok(results)
    }
}
