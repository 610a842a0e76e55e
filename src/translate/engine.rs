//! The forward-translation engine.
//!
//! [`ForwardTranslator`] drives one full conversion of a source-object graph
//! into an ordered record workspace. The member that carries the whole design
//! is the identity map: `handle → Option<RecordId>`, consulted before every
//! dispatch, which guarantees each source object is translated at most once no
//! matter how many reference paths reach it. Empty results are cached too: a
//! mapping function that decided an object produces no output must not be
//! re-invoked when a second referrer asks for the same object, or its side
//! effects (auxiliary records) would be duplicated.
//!
//! Per-run state (identity map, workspace, diagnostics, shared-resource
//! caches) is reset at the start of every `translate` call; nothing leaks
//! between runs on one engine instance.

use std::collections::HashMap;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::TranslateError;
use crate::model::{Model, ObjectHandle, ObjectType, SourceObject};
use crate::options::TranslatorOptions;
use crate::record::{Field, Record, RecordType};
use crate::registry::MapperRegistry;
use crate::workspace::{RecordId, Workspace};

use super::mappers;
use super::order::TRANSLATION_ORDER;
use super::synthesis;

/// Object-graph to flat-record compiler.
pub struct ForwardTranslator {
    options: TranslatorOptions,
    registry: Arc<MapperRegistry>,
    workspace: Workspace,
    /// Identity map: at most one entry per source handle per run. `Some` is a
    /// produced record, `None` a cached "translates to nothing" result.
    map: HashMap<ObjectHandle, Option<RecordId>>,
    diagnostics: Diagnostics,
    /// Lazily-created shared schedule-type-limits record ("Any Number").
    any_number_limits: Option<RecordId>,
    /// Gas compositions already emitted this run, by canonical composition key.
    gas_mixtures: HashMap<String, RecordId>,
}

impl ForwardTranslator {
    /// Create an engine with the built-in mapping functions.
    pub fn new(options: TranslatorOptions) -> Self {
        Self::with_registry(options, Arc::new(mappers::standard_registry()))
    }

    /// Create an engine with a caller-supplied mapping-function registry.
    pub fn with_registry(options: TranslatorOptions, registry: Arc<MapperRegistry>) -> Self {
        Self {
            options,
            registry,
            workspace: Workspace::new(),
            map: HashMap::new(),
            diagnostics: Diagnostics::new(),
            any_number_limits: None,
            gas_mixtures: HashMap::new(),
        }
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Replace the options for subsequent runs.
    pub fn set_options(&mut self, options: TranslatorOptions) {
        self.options = options;
    }

    /// Translate a full model.
    ///
    /// Resets all per-run state, walks the graph in the fixed top-level order,
    /// runs the synthesis passes, and returns the workspace. Per-object
    /// problems never fail the run; they are accumulated and readable through
    /// [`warnings`](Self::warnings) / [`errors`](Self::errors) until the next
    /// run. The only fatal condition is an arena the traversal cannot walk at
    /// all (dangling references).
    pub fn translate(&mut self, model: &Model) -> Result<Workspace, TranslateError> {
        self.reset();
        self.check_traversable(model)?;

        tracing::info!(
            target: "idforge::translate",
            objects = model.len(),
            "starting full model translation"
        );

        for &object_type in TRANSLATION_ORDER {
            for handle in self.sorted_handles(model, object_type) {
                self.translate_and_map(model, handle);
            }
        }

        // Synthesis always runs, even over an empty model: the mandatory
        // defaults must exist for the output to be usable at all.
        synthesis::run(self);

        tracing::info!(
            target: "idforge::translate",
            records = self.workspace.len(),
            warnings = self.diagnostics.warnings().len(),
            errors = self.diagnostics.errors().len(),
            "translation complete"
        );

        Ok(std::mem::take(&mut self.workspace))
    }

    /// Translate a single object (and whatever it references), without the
    /// full-model synthesis passes.
    pub fn translate_object(
        &mut self,
        model: &Model,
        handle: ObjectHandle,
    ) -> Result<Workspace, TranslateError> {
        self.reset();
        self.check_traversable(model)?;
        self.translate_and_map(model, handle);
        Ok(std::mem::take(&mut self.workspace))
    }

    fn check_traversable(&self, model: &Model) -> Result<(), TranslateError> {
        let broken = model.validate();
        if let Some(first) = broken.first() {
            return Err(TranslateError::MalformedModel {
                count: broken.len(),
                first: first.to_string(),
            });
        }
        Ok(())
    }

    /// Handles of one type in case-insensitive name order, handle as
    /// tie-breaker. This is what keeps the top-level pass deterministic.
    fn sorted_handles(&self, model: &Model, object_type: ObjectType) -> Vec<ObjectHandle> {
        let mut keyed: Vec<(String, ObjectHandle)> = model
            .objects_of_type(object_type)
            .map(|o| (o.name().unwrap_or("").to_lowercase(), o.handle()))
            .collect();
        keyed.sort();
        keyed.into_iter().map(|(_, h)| h).collect()
    }

    /// Memoized, re-entrant dispatch: the workhorse called by the top-level
    /// loop and recursively by mapping functions.
    ///
    /// Returns the record produced for `handle`, or `None` if the object
    /// produces no output (unsupported type, mapping function declined, or a
    /// recorded failure). Either way the result is cached: the mapping
    /// function for a given handle runs at most once per run.
    pub fn translate_and_map(&mut self, model: &Model, handle: ObjectHandle) -> Option<RecordId> {
        if let Some(&cached) = self.map.get(&handle) {
            return cached;
        }

        let Some(object) = model.object(handle) else {
            // Unreachable after check_traversable, but mappers may hand us
            // foreign handles; degrade rather than panic.
            self.diagnostics
                .error(format!("reference to unknown object {handle}, skipping"));
            self.map.insert(handle, None);
            return None;
        };
        let object_type = object.object_type();
        let description = object.describe();

        let Some(mapper) = self.registry.lookup(object_type) else {
            self.diagnostics.warn(format!(
                "no mapping function registered for object type '{object_type}', skipping {description}"
            ));
            self.map.insert(handle, None);
            return None;
        };

        tracing::trace!(target: "idforge::translate", object = %description, "translating");
        let result = mapper(self, model, handle);

        // The mapper may already have registered a stub record for this handle
        // through `create_record_for`; the first registration wins.
        *self.map.entry(handle).or_insert(result)
    }

    // -----------------------------------------------------------------------
    // Record factories (used by mapping functions and synthesis passes)
    // -----------------------------------------------------------------------

    /// Append a new auxiliary record with no corresponding source object.
    pub fn create_record(&mut self, record_type: impl Into<RecordType>) -> RecordId {
        self.workspace.create(record_type.into())
    }

    /// Install the identity-map entry for `handle`. A handle already
    /// registered keeps its first record (at-most-once).
    pub fn register_record(&mut self, handle: ObjectHandle, id: RecordId) {
        self.map.entry(handle).or_insert(Some(id));
    }

    /// Append a record and register it for `handle` *before* any field is
    /// populated.
    ///
    /// This is the stub/patch protocol for reference cycles: other objects
    /// translated from inside the creating mapper already see this handle as
    /// "produced" and can reference the record by name, while the mapper
    /// patches fields afterwards through [`record_mut`](Self::record_mut).
    pub fn create_record_for(
        &mut self,
        record_type: impl Into<RecordType>,
        handle: ObjectHandle,
    ) -> RecordId {
        let id = self.workspace.create(record_type.into());
        self.register_record(handle, id);
        id
    }

    /// [`create_record_for`](Self::create_record_for) plus a unique name taken
    /// from the source object (falling back to its type and handle).
    pub fn create_named_record_for(
        &mut self,
        record_type: impl Into<RecordType>,
        object: &SourceObject,
    ) -> RecordId {
        let id = self.create_record_for(record_type, object.handle());
        let base = match object.name() {
            Some(name) => name.to_string(),
            None => format!("{} {}", object.object_type(), object.handle().get()),
        };
        self.workspace.assign_name(id, base);
        id
    }

    /// Assign (or re-assign) a record's name, uniquified within its type.
    /// Returns the name actually assigned.
    pub fn name_record(&mut self, id: RecordId, base: impl Into<String>) -> String {
        self.workspace.assign_name(id, base)
    }

    pub fn record(&self, id: RecordId) -> &Record {
        self.workspace.record(id)
    }

    pub fn record_mut(&mut self, id: RecordId) -> &mut Record {
        self.workspace.record_mut(id)
    }

    /// The workspace as accumulated so far in the current run.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    // -----------------------------------------------------------------------
    // Shared-resource services (per-run caches)
    // -----------------------------------------------------------------------

    /// The shared unbounded schedule-type-limits record, created on first use.
    ///
    /// Schedules without an explicit limits reference all point at this one
    /// record; at most one is emitted per run.
    pub fn any_number_schedule_type_limits(&mut self) -> RecordId {
        if let Some(id) = self.any_number_limits {
            return id;
        }
        let id = self.create_record("ScheduleTypeLimits");
        self.name_record(id, "Any Number");
        self.any_number_limits = Some(id);
        id
    }

    /// Combine a run of gas-layer source objects into one shared gas record.
    ///
    /// A single layer becomes a `WindowMaterial:Gas`; two or more become a
    /// `WindowMaterial:GasMixture` with fractions filled in (layers with no
    /// explicit fraction split the unclaimed remainder evenly). Compositions
    /// are deduplicated by a canonical key, so the same gas fill is emitted
    /// once no matter how many constructions request it.
    pub fn shared_gas_mixture(
        &mut self,
        model: &Model,
        layers: &[ObjectHandle],
    ) -> Option<RecordId> {
        if layers.is_empty() {
            return None;
        }

        let mut gases: Vec<(String, Option<f64>)> = Vec::with_capacity(layers.len());
        let mut thickness = 0.0;
        for &layer in layers {
            let Some(object) = model.object(layer) else {
                self.diagnostics
                    .error(format!("gas layer {layer} does not exist, skipping"));
                continue;
            };
            let gas = object.text_attr("gas_type").unwrap_or("Air").to_string();
            thickness += object.real_attr("thickness").unwrap_or(0.0125);
            gases.push((gas, object.real_attr("fraction")));
        }
        if gases.is_empty() {
            return None;
        }

        // Default fill-in: layers without an explicit fraction share whatever
        // the explicit ones left unclaimed.
        let claimed: f64 = gases.iter().filter_map(|(_, f)| *f).sum();
        let unspecified = gases.iter().filter(|(_, f)| f.is_none()).count();
        let remainder = ((1.0 - claimed) / unspecified.max(1) as f64).max(0.0);
        let resolved: Vec<(String, f64)> = gases
            .into_iter()
            .map(|(gas, fraction)| (gas, fraction.unwrap_or(remainder)))
            .collect();

        let mut key_parts: Vec<String> = resolved
            .iter()
            .map(|(gas, fraction)| format!("{}={fraction:.4}", gas.to_lowercase()))
            .collect();
        key_parts.sort();
        let key = format!("{}@{thickness:.4}", key_parts.join("+"));

        if let Some(&id) = self.gas_mixtures.get(&key) {
            return Some(id);
        }

        let id = if resolved.len() == 1 {
            let (gas, _) = &resolved[0];
            let id = self.create_record("WindowMaterial:Gas");
            self.name_record(id, format!("{gas} Gap"));
            self.record_mut(id).push_field(Field::Text(gas.clone()));
            self.record_mut(id).push_field(Field::Real(thickness));
            id
        } else {
            let id = self.create_record("WindowMaterial:GasMixture");
            self.name_record(id, "Gas Mixture");
            self.record_mut(id).push_field(Field::Real(thickness));
            self.record_mut(id)
                .push_field(Field::Int(resolved.len() as i64));
            for (gas, fraction) in &resolved {
                self.record_mut(id).push_field(Field::Text(gas.clone()));
                self.record_mut(id).push_field(Field::Real(*fraction));
            }
            id
        };
        self.gas_mixtures.insert(key, id);
        Some(id)
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    /// Record a recoverable problem with the current run.
    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.warn(message);
    }

    /// Record a structural problem: the run continues, but the output is
    /// likely unusable downstream until the cause is fixed.
    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.error(message);
    }

    /// Warning diagnostics of the last run, valid until the next run starts.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.diagnostics.warnings()
    }

    /// Error diagnostics of the last run, valid until the next run starts.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.diagnostics.errors()
    }

    /// Clear every piece of per-run state. Called automatically at the start
    /// of every `translate` / `translate_object` call.
    pub fn reset(&mut self) {
        self.workspace = Workspace::new();
        self.map.clear();
        self.diagnostics.clear();
        self.any_number_limits = None;
        self.gas_mixtures.clear();
        tracing::debug!(target: "idforge::translate", "translator state reset");
    }
}

impl std::fmt::Debug for ForwardTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForwardTranslator")
            .field("options", &self.options)
            .field("mapped", &self.map.len())
            .field("records", &self.workspace.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish()
    }
}
