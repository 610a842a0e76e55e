//! The ordered output collection of one translation run.
//!
//! Records keep their creation order; the serialized file is written in
//! exactly this order, which is what makes translation output diffable across
//! runs. Name lookup is case-insensitive, matching the destination format's
//! name semantics, and names are unique within each record type: assigning a
//! taken name appends ` 1`, ` 2`, … until it is free.

use std::collections::HashMap;

use crate::record::{Record, RecordType};

/// Index of a record within one [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rec:{}", self.0)
    }
}

/// Ordered collection of output records with per-type unique naming.
#[derive(Debug, Default)]
pub struct Workspace {
    records: Vec<Record>,
    /// (lowercase type, lowercase name) → record, for lookup and uniquing.
    names: HashMap<(String, String), RecordId>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, unnamed record of the given type.
    pub fn create(&mut self, record_type: RecordType) -> RecordId {
        let id = RecordId(self.records.len());
        self.records.push(Record::new(record_type));
        id
    }

    pub fn record(&self, id: RecordId) -> &Record {
        &self.records[id.0]
    }

    pub fn record_mut(&mut self, id: RecordId) -> &mut Record {
        &mut self.records[id.0]
    }

    /// Assign a name, uniquified within the record's type.
    ///
    /// If `base` is already taken by another record of the same type, ` 1`,
    /// ` 2`, … is appended until the name is free. Renaming releases the
    /// record's previous name. Returns the name actually assigned.
    pub fn assign_name(&mut self, id: RecordId, base: impl Into<String>) -> String {
        let base = base.into();
        let type_key = self.records[id.0].record_type().as_str().to_lowercase();

        if let Some(old) = self.records[id.0].name() {
            self.names.remove(&(type_key.clone(), old.to_lowercase()));
        }

        let mut candidate = base.clone();
        let mut suffix = 0u32;
        while let Some(&existing) = self.names.get(&(type_key.clone(), candidate.to_lowercase())) {
            if existing == id {
                break;
            }
            suffix += 1;
            candidate = format!("{base} {suffix}");
        }

        self.names
            .insert((type_key, candidate.to_lowercase()), id);
        self.records[id.0].set_name(candidate.clone());
        candidate
    }

    /// Case-insensitive lookup by record type and name.
    pub fn find_by_name(&self, record_type: &str, name: &str) -> Option<RecordId> {
        self.names
            .get(&(record_type.to_lowercase(), name.to_lowercase()))
            .copied()
    }

    /// All records in creation order.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Records of one type, in creation order.
    pub fn records_of_type<'a>(&'a self, record_type: &'a str) -> impl Iterator<Item = &'a Record> {
        self.records
            .iter()
            .filter(move |r| r.record_type().as_str() == record_type)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
