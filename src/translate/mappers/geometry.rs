//! Building, zone and surface objects.
//!
//! The zone mapper is the canonical user of the stub/patch protocol: zones and
//! their surfaces reference each other, so the zone record is created and
//! registered first, then the surfaces are translated (each resolving the zone
//! by name through the identity map), and only then are the zone's remaining
//! fields filled in.

use crate::model::{Model, ObjectHandle};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

pub(crate) fn translate_building(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let north_axis = object.real_attr("north_axis").unwrap_or(0.0);
    let terrain = object.text_attr("terrain").unwrap_or("Suburbs").to_string();

    let id = t.create_record_for("Building", handle);
    let name = object.name().unwrap_or("Building").to_string();
    t.name_record(id, name);
    let rec = t.record_mut(id);
    rec.push_field(Field::Real(north_axis));
    rec.push_field(Field::Text(terrain));
    Some(id)
}

pub(crate) fn translate_zone(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let north = object.real_attr("direction_of_relative_north").unwrap_or(0.0);
    let multiplier = object.int_attr("multiplier").unwrap_or(1);

    // Register the stub before touching the surfaces: they reference this
    // zone by name while it is still being filled in.
    let id = t.create_named_record_for("Zone", object);

    for &surface in object.ref_list("surfaces") {
        t.translate_and_map(model, surface);
    }

    let rec = t.record_mut(id);
    rec.set_field(0, Field::Real(north));
    rec.set_field(1, Field::Real(0.0)); // origin x
    rec.set_field(2, Field::Real(0.0)); // origin y
    rec.set_field(3, Field::Real(0.0)); // origin z
    rec.set_field(4, Field::Int(multiplier));
    Some(id)
}

pub(crate) fn translate_surface(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;

    // A surface without a construction produces output the downstream engine
    // rejects outright; that is a structural failure, not a skip.
    let Some(construction) = object.ref_attr("construction") else {
        t.error(format!(
            "{} has no construction reference and cannot be translated",
            object.describe()
        ));
        return None;
    };
    let Some(construction_id) = t.translate_and_map(model, construction) else {
        t.error(format!(
            "construction of {} did not translate; the surface cannot be translated",
            object.describe()
        ));
        return None;
    };
    let construction_name = t
        .record(construction_id)
        .name()
        .unwrap_or_default()
        .to_string();

    let Some(zone) = object.ref_attr("zone") else {
        t.warn(format!(
            "{} is not associated with a zone, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let Some(zone_id) = t.translate_and_map(model, zone) else {
        t.warn(format!(
            "zone of {} did not translate, the surface will not be translated",
            object.describe()
        ));
        return None;
    };
    let zone_name = t.record(zone_id).name().unwrap_or_default().to_string();

    let surface_type = object.text_attr("surface_type").unwrap_or("Wall").to_string();
    let boundary = object
        .text_attr("outside_boundary_condition")
        .unwrap_or("Outdoors")
        .to_string();

    let id = t.create_named_record_for("BuildingSurface:Detailed", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(surface_type));
    rec.push_field(Field::NameRef(construction_name));
    rec.push_field(Field::NameRef(zone_name));
    rec.push_field(Field::Text(boundary));
    rec.push_field(Field::Text("SunExposed".into()));
    rec.push_field(Field::Text("WindExposed".into()));
    Some(id)
}

pub(crate) fn translate_sub_surface(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;

    let Some(construction) = object.ref_attr("construction") else {
        t.error(format!(
            "{} has no construction reference and cannot be translated",
            object.describe()
        ));
        return None;
    };
    let Some(construction_id) = t.translate_and_map(model, construction) else {
        t.error(format!(
            "construction of {} did not translate; the sub-surface cannot be translated",
            object.describe()
        ));
        return None;
    };
    let construction_name = t
        .record(construction_id)
        .name()
        .unwrap_or_default()
        .to_string();

    let Some(parent) = object.ref_attr("surface") else {
        t.warn(format!(
            "{} has no parent surface, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let Some(parent_id) = t.translate_and_map(model, parent) else {
        t.warn(format!(
            "parent surface of {} did not translate, the sub-surface will not be translated",
            object.describe()
        ));
        return None;
    };
    let parent_name = t.record(parent_id).name().unwrap_or_default().to_string();

    let kind = object
        .text_attr("sub_surface_type")
        .unwrap_or("Window")
        .to_string();

    let id = t.create_named_record_for("FenestrationSurface:Detailed", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(kind));
    rec.push_field(Field::NameRef(construction_name));
    rec.push_field(Field::NameRef(parent_name));
    Some(id)
}
