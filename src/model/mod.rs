//! Source-object arena: the input side of the translator.
//!
//! A [`Model`] owns every [`SourceObject`] in one building description and hands
//! out stable [`ObjectHandle`]s for them. Cross-references between objects are
//! always expressed through handles, never through Rust references, so cyclic
//! and shared references (many surfaces pointing at one construction, a zone
//! and its surfaces pointing at each other) are trivially representable.
//!
//! Translation treats the arena as read-only: the engine and every mapping
//! function only ever look objects up and walk their reference slots.

pub mod load;

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::str::FromStr;

use crate::error::ModelError;

/// Unique, niche-optimized identifier for a source object.
///
/// Uses `NonZeroU64` so that `Option<ObjectHandle>` is the same size as
/// `ObjectHandle` (0 serves as the `None` discriminant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ObjectHandle(NonZeroU64);

impl ObjectHandle {
    /// Create an `ObjectHandle` from a raw `u64`.
    ///
    /// Returns `None` if `raw` is zero.
    pub fn new(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(ObjectHandle)
    }

    /// Get the underlying `u64` value.
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl std::fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "obj:{}", self.0)
    }
}

/// Closed set of source-object types the translator knows about.
///
/// The registry maps each of these to a mapping function; a type without a
/// registered function is skipped with a warning diagnostic at translation
/// time, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ObjectType {
    Version,
    SimulationControl,
    Timestep,
    RunPeriod,
    SpecialDays,
    SizingParameters,
    Site,
    DesignDay,
    ScheduleTypeLimits,
    ScheduleConstant,
    ScheduleCompact,
    OpaqueMaterial,
    GlazingMaterial,
    AirGap,
    GasLayer,
    Construction,
    Building,
    Zone,
    Surface,
    SubSurface,
    Lights,
    People,
    ElectricEquipment,
    Infiltration,
    LifeCycleCost,
    OutputVariable,
    OutputMeter,
}

impl ObjectType {
    /// Every object type, in declaration order.
    pub const ALL: &[ObjectType] = &[
        ObjectType::Version,
        ObjectType::SimulationControl,
        ObjectType::Timestep,
        ObjectType::RunPeriod,
        ObjectType::SpecialDays,
        ObjectType::SizingParameters,
        ObjectType::Site,
        ObjectType::DesignDay,
        ObjectType::ScheduleTypeLimits,
        ObjectType::ScheduleConstant,
        ObjectType::ScheduleCompact,
        ObjectType::OpaqueMaterial,
        ObjectType::GlazingMaterial,
        ObjectType::AirGap,
        ObjectType::GasLayer,
        ObjectType::Construction,
        ObjectType::Building,
        ObjectType::Zone,
        ObjectType::Surface,
        ObjectType::SubSurface,
        ObjectType::Lights,
        ObjectType::People,
        ObjectType::ElectricEquipment,
        ObjectType::Infiltration,
        ObjectType::LifeCycleCost,
        ObjectType::OutputVariable,
        ObjectType::OutputMeter,
    ];

    /// Canonical name, as used in model documents.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::Version => "Version",
            ObjectType::SimulationControl => "SimulationControl",
            ObjectType::Timestep => "Timestep",
            ObjectType::RunPeriod => "RunPeriod",
            ObjectType::SpecialDays => "SpecialDays",
            ObjectType::SizingParameters => "SizingParameters",
            ObjectType::Site => "Site",
            ObjectType::DesignDay => "DesignDay",
            ObjectType::ScheduleTypeLimits => "ScheduleTypeLimits",
            ObjectType::ScheduleConstant => "ScheduleConstant",
            ObjectType::ScheduleCompact => "ScheduleCompact",
            ObjectType::OpaqueMaterial => "OpaqueMaterial",
            ObjectType::GlazingMaterial => "GlazingMaterial",
            ObjectType::AirGap => "AirGap",
            ObjectType::GasLayer => "GasLayer",
            ObjectType::Construction => "Construction",
            ObjectType::Building => "Building",
            ObjectType::Zone => "Zone",
            ObjectType::Surface => "Surface",
            ObjectType::SubSurface => "SubSurface",
            ObjectType::Lights => "Lights",
            ObjectType::People => "People",
            ObjectType::ElectricEquipment => "ElectricEquipment",
            ObjectType::Infiltration => "Infiltration",
            ObjectType::LifeCycleCost => "LifeCycleCost",
            ObjectType::OutputVariable => "OutputVariable",
            ObjectType::OutputMeter => "OutputMeter",
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or(())
    }
}

/// A literal attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Real(f64),
    Int(i64),
    Bool(bool),
}

/// One attribute slot of a source object: either a literal, a single
/// reference to another object, or an ordered list of references.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Scalar(Scalar),
    Ref(ObjectHandle),
    RefList(Vec<ObjectHandle>),
}

/// A node in the input graph: one building-description entity.
///
/// Attribute slots are held in a `BTreeMap` so that iteration order (and
/// therefore anything a mapping function derives from "walk all slots") is
/// deterministic across runs.
#[derive(Debug, Clone)]
pub struct SourceObject {
    handle: ObjectHandle,
    object_type: ObjectType,
    name: Option<String>,
    attrs: std::collections::BTreeMap<String, AttrValue>,
}

impl SourceObject {
    fn new(handle: ObjectHandle, object_type: ObjectType) -> Self {
        Self {
            handle,
            object_type,
            name: None,
            attrs: std::collections::BTreeMap::new(),
        }
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `Zone 'Core'` or `Zone obj:7` for unnamed objects; used in diagnostics.
    pub fn describe(&self) -> String {
        match &self.name {
            Some(name) => format!("{} '{}'", self.object_type, name),
            None => format!("{} {}", self.object_type, self.handle),
        }
    }

    pub fn attr(&self, slot: &str) -> Option<&AttrValue> {
        self.attrs.get(slot)
    }

    pub fn text_attr(&self, slot: &str) -> Option<&str> {
        match self.attrs.get(slot) {
            Some(AttrValue::Scalar(Scalar::Text(s))) => Some(s),
            _ => None,
        }
    }

    /// Numeric attribute, accepting either `Real` or `Int` storage.
    pub fn real_attr(&self, slot: &str) -> Option<f64> {
        match self.attrs.get(slot) {
            Some(AttrValue::Scalar(Scalar::Real(v))) => Some(*v),
            Some(AttrValue::Scalar(Scalar::Int(v))) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn int_attr(&self, slot: &str) -> Option<i64> {
        match self.attrs.get(slot) {
            Some(AttrValue::Scalar(Scalar::Int(v))) => Some(*v),
            _ => None,
        }
    }

    pub fn bool_attr(&self, slot: &str) -> Option<bool> {
        match self.attrs.get(slot) {
            Some(AttrValue::Scalar(Scalar::Bool(v))) => Some(*v),
            _ => None,
        }
    }

    pub fn ref_attr(&self, slot: &str) -> Option<ObjectHandle> {
        match self.attrs.get(slot) {
            Some(AttrValue::Ref(h)) => Some(*h),
            _ => None,
        }
    }

    /// Reference-list slot; absent slots read as empty.
    pub fn ref_list(&self, slot: &str) -> &[ObjectHandle] {
        match self.attrs.get(slot) {
            Some(AttrValue::RefList(hs)) => hs,
            _ => &[],
        }
    }

    /// Every outgoing reference, as `(slot, handle)` pairs in slot order.
    pub fn references(&self) -> impl Iterator<Item = (&str, ObjectHandle)> {
        self.attrs.iter().flat_map(|(slot, value)| {
            let handles: Vec<ObjectHandle> = match value {
                AttrValue::Ref(h) => vec![*h],
                AttrValue::RefList(hs) => hs.clone(),
                AttrValue::Scalar(_) => Vec::new(),
            };
            handles.into_iter().map(move |h| (slot.as_str(), h))
        })
    }
}

/// Owning arena of source objects.
///
/// Objects keep their insertion order; handles are allocated monotonically
/// starting from 1 and are never reused within one model.
#[derive(Debug, Default)]
pub struct Model {
    objects: Vec<SourceObject>,
    index: HashMap<ObjectHandle, usize>,
    next_handle: u64,
}

impl Model {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
            next_handle: 1,
        }
    }

    /// Add an unnamed object, returning its handle.
    pub fn add_object(&mut self, object_type: ObjectType) -> Result<ObjectHandle, ModelError> {
        let handle = ObjectHandle::new(self.next_handle).ok_or(ModelError::HandlesExhausted)?;
        self.next_handle += 1;
        self.index.insert(handle, self.objects.len());
        self.objects.push(SourceObject::new(handle, object_type));
        Ok(handle)
    }

    /// Add a named object, returning its handle.
    pub fn add_named_object(
        &mut self,
        object_type: ObjectType,
        name: impl Into<String>,
    ) -> Result<ObjectHandle, ModelError> {
        let handle = self.add_object(object_type)?;
        self.set_name(handle, name)?;
        Ok(handle)
    }

    pub fn set_name(
        &mut self,
        handle: ObjectHandle,
        name: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.object_mut(handle)?.name = Some(name.into());
        Ok(())
    }

    pub fn set_attr(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        value: AttrValue,
    ) -> Result<(), ModelError> {
        self.object_mut(handle)?.attrs.insert(slot.into(), value);
        Ok(())
    }

    pub fn set_text(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::Scalar(Scalar::Text(value.into())))
    }

    pub fn set_real(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        value: f64,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::Scalar(Scalar::Real(value)))
    }

    pub fn set_int(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        value: i64,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::Scalar(Scalar::Int(value)))
    }

    pub fn set_bool(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        value: bool,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::Scalar(Scalar::Bool(value)))
    }

    pub fn set_ref(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        target: ObjectHandle,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::Ref(target))
    }

    pub fn set_refs(
        &mut self,
        handle: ObjectHandle,
        slot: impl Into<String>,
        targets: Vec<ObjectHandle>,
    ) -> Result<(), ModelError> {
        self.set_attr(handle, slot, AttrValue::RefList(targets))
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SourceObject> {
        self.index.get(&handle).map(|&i| &self.objects[i])
    }

    fn object_mut(&mut self, handle: ObjectHandle) -> Result<&mut SourceObject, ModelError> {
        match self.index.get(&handle) {
            Some(&i) => Ok(&mut self.objects[i]),
            None => Err(ModelError::UnknownObject { handle }),
        }
    }

    /// All objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &SourceObject> {
        self.objects.iter()
    }

    /// Objects of one type, in insertion order.
    pub fn objects_of_type(&self, object_type: ObjectType) -> impl Iterator<Item = &SourceObject> {
        self.objects
            .iter()
            .filter(move |o| o.object_type == object_type)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Check every reference slot against the arena.
    ///
    /// Returns one [`ModelError::DanglingReference`] per broken reference, in
    /// insertion order. An empty result means the graph is fully traversable.
    pub fn validate(&self) -> Vec<ModelError> {
        let mut errors = Vec::new();
        for object in &self.objects {
            for (slot, target) in object.references() {
                if !self.index.contains_key(&target) {
                    errors.push(ModelError::DanglingReference {
                        from: object.describe(),
                        slot: slot.to_string(),
                        to: target,
                    });
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_niche_optimization() {
        assert_eq!(
            std::mem::size_of::<Option<ObjectHandle>>(),
            std::mem::size_of::<ObjectHandle>()
        );
        assert!(ObjectHandle::new(0).is_none());
        assert_eq!(ObjectHandle::new(7).unwrap().get(), 7);
    }

    #[test]
    fn handles_are_sequential_and_unique() {
        let mut model = Model::new();
        let a = model.add_object(ObjectType::Zone).unwrap();
        let b = model.add_object(ObjectType::Zone).unwrap();
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_ne!(a, b);
    }

    #[test]
    fn attrs_read_back_typed() {
        let mut model = Model::new();
        let zone = model.add_named_object(ObjectType::Zone, "Core").unwrap();
        model.set_int(zone, "multiplier", 2).unwrap();
        model.set_real(zone, "volume", 250.5).unwrap();
        model.set_bool(zone, "part_of_floor_area", true).unwrap();
        model.set_text(zone, "note", "corner office").unwrap();

        let obj = model.object(zone).unwrap();
        assert_eq!(obj.name(), Some("Core"));
        assert_eq!(obj.int_attr("multiplier"), Some(2));
        assert_eq!(obj.real_attr("volume"), Some(250.5));
        // ints coerce when read as real
        assert_eq!(obj.real_attr("multiplier"), Some(2.0));
        assert_eq!(obj.bool_attr("part_of_floor_area"), Some(true));
        assert_eq!(obj.text_attr("note"), Some("corner office"));
        assert_eq!(obj.int_attr("missing"), None);
    }

    #[test]
    fn references_enumerate_in_slot_order() {
        let mut model = Model::new();
        let zone = model.add_named_object(ObjectType::Zone, "Core").unwrap();
        let wall = model.add_named_object(ObjectType::Surface, "Wall").unwrap();
        let roof = model.add_named_object(ObjectType::Surface, "Roof").unwrap();
        model.set_refs(zone, "surfaces", vec![wall, roof]).unwrap();
        model.set_ref(wall, "zone", zone).unwrap();

        let obj = model.object(zone).unwrap();
        let refs: Vec<_> = obj.references().collect();
        assert_eq!(refs, vec![("surfaces", wall), ("surfaces", roof)]);
        assert_eq!(obj.ref_list("surfaces"), &[wall, roof]);
        assert_eq!(model.object(wall).unwrap().ref_attr("zone"), Some(zone));
    }

    #[test]
    fn cyclic_references_are_representable() {
        let mut model = Model::new();
        let zone = model.add_named_object(ObjectType::Zone, "Core").unwrap();
        let wall = model.add_named_object(ObjectType::Surface, "Wall").unwrap();
        model.set_refs(zone, "surfaces", vec![wall]).unwrap();
        model.set_ref(wall, "zone", zone).unwrap();
        assert!(model.validate().is_empty());
    }

    #[test]
    fn validate_reports_dangling_references() {
        let mut model = Model::new();
        let wall = model.add_named_object(ObjectType::Surface, "Wall").unwrap();
        let ghost = ObjectHandle::new(99).unwrap();
        model.set_ref(wall, "construction", ghost).unwrap();

        let errors = model.validate();
        assert_eq!(errors.len(), 1);
        let msg = format!("{}", errors[0]);
        assert!(msg.contains("Wall"));
        assert!(msg.contains("construction"));
        assert!(msg.contains("obj:99"));
    }

    #[test]
    fn object_type_round_trips_through_str() {
        for ty in ObjectType::ALL {
            assert_eq!(ty.as_str().parse::<ObjectType>().unwrap(), *ty);
        }
        assert!("NotAType".parse::<ObjectType>().is_err());
    }

    #[test]
    fn objects_of_type_preserves_insertion_order() {
        let mut model = Model::new();
        model.add_named_object(ObjectType::Zone, "B").unwrap();
        model.add_named_object(ObjectType::Surface, "S").unwrap();
        model.add_named_object(ObjectType::Zone, "A").unwrap();

        let names: Vec<_> = model
            .objects_of_type(ObjectType::Zone)
            .map(|o| o.name().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
