//! Mapping-function registry: object type → translation strategy.
//!
//! A flat table from [`ObjectType`] to a plain function pointer. The engine
//! queries it read-only during a run; it is populated once, up front.
//! [`crate::translate::mappers::standard_registry`] builds the full built-in
//! set, and embedders (or tests) can assemble their own with [`MapperRegistry::register`].

use std::collections::HashMap;

use crate::model::{Model, ObjectHandle, ObjectType};
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

/// A per-type mapping function.
///
/// Contract (relied on by the engine):
/// - reads the source object and the translator options only;
/// - its only side effects go through the engine handle: recursing via
///   `translate_and_map`, emitting records via the `create_record` factories,
///   appending diagnostics;
/// - returns `None` when the object legitimately produces no record (skipped
///   by options, nothing to emit); that is not an error;
/// - iterates a source object's references in a deterministic order.
pub type MapperFn = fn(&mut ForwardTranslator, &Model, ObjectHandle) -> Option<RecordId>;

/// Flat lookup table from object type to mapping function.
#[derive(Debug, Default, Clone)]
pub struct MapperRegistry {
    table: HashMap<ObjectType, MapperFn>,
}

impl MapperRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the mapping function for a type.
    pub fn register(&mut self, object_type: ObjectType, mapper: MapperFn) {
        self.table.insert(object_type, mapper);
    }

    /// Look up the mapping function for a type.
    pub fn lookup(&self, object_type: ObjectType) -> Option<MapperFn> {
        self.table.get(&object_type).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
