//! Space loads: lights, people, equipment, infiltration.
//!
//! Every load follows the same shape: it needs a zone to live in and a
//! schedule to run on. A load without either is an orphan: it is skipped
//! with a warning, mirroring how the rest of the model stays translatable.

use crate::model::{Model, ObjectHandle, SourceObject};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

/// Resolve the zone and schedule names a load references, or explain why the
/// load cannot be translated.
fn load_parents(
    t: &mut ForwardTranslator,
    model: &Model,
    object: &SourceObject,
) -> Option<(String, String)> {
    let Some(zone) = object.ref_attr("zone") else {
        t.warn(format!(
            "{} is not associated with a zone, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let Some(zone_id) = t.translate_and_map(model, zone) else {
        t.warn(format!(
            "zone of {} did not translate, the load will not be translated",
            object.describe()
        ));
        return None;
    };
    let zone_name = t.record(zone_id).name().unwrap_or_default().to_string();

    let Some(schedule) = object.ref_attr("schedule") else {
        t.warn(format!(
            "{} has no schedule, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let Some(schedule_id) = t.translate_and_map(model, schedule) else {
        t.warn(format!(
            "schedule of {} did not translate, the load will not be translated",
            object.describe()
        ));
        return None;
    };
    let schedule_name = t.record(schedule_id).name().unwrap_or_default().to_string();

    Some((zone_name, schedule_name))
}

pub(crate) fn translate_lights(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let (zone, schedule) = load_parents(t, model, object)?;
    let level = object.real_attr("lighting_level").unwrap_or(0.0);
    let fraction_radiant = object.real_attr("fraction_radiant").unwrap_or(0.42);
    let fraction_visible = object.real_attr("fraction_visible").unwrap_or(0.18);

    let id = t.create_named_record_for("Lights", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(zone));
    rec.push_field(Field::NameRef(schedule));
    rec.push_field(Field::Text("LightingLevel".into()));
    rec.push_field(Field::Real(level));
    rec.push_field(Field::Real(fraction_radiant));
    rec.push_field(Field::Real(fraction_visible));
    Some(id)
}

pub(crate) fn translate_people(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let (zone, schedule) = load_parents(t, model, object)?;
    let count = object.real_attr("number_of_people").unwrap_or(0.0);

    let id = t.create_named_record_for("People", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(zone));
    rec.push_field(Field::NameRef(schedule));
    rec.push_field(Field::Text("People".into()));
    rec.push_field(Field::Real(count));
    Some(id)
}

pub(crate) fn translate_electric_equipment(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let (zone, schedule) = load_parents(t, model, object)?;
    let level = object.real_attr("design_level").unwrap_or(0.0);

    let id = t.create_named_record_for("ElectricEquipment", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(zone));
    rec.push_field(Field::NameRef(schedule));
    rec.push_field(Field::Text("EquipmentLevel".into()));
    rec.push_field(Field::Real(level));
    Some(id)
}

pub(crate) fn translate_infiltration(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let (zone, schedule) = load_parents(t, model, object)?;
    let flow_rate = object.real_attr("design_flow_rate").unwrap_or(0.0);

    let id = t.create_named_record_for("ZoneInfiltration:DesignFlowRate", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(zone));
    rec.push_field(Field::NameRef(schedule));
    rec.push_field(Field::Text("Flow/Zone".into()));
    rec.push_field(Field::Real(flow_rate));
    Some(id)
}
