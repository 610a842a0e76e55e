//! Materials and layered constructions.

use crate::model::{Model, ObjectHandle, ObjectType};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

pub(crate) fn translate_opaque_material(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let roughness = object
        .text_attr("roughness")
        .unwrap_or("MediumRough")
        .to_string();
    let thickness = object.real_attr("thickness").unwrap_or(0.1);
    let conductivity = object.real_attr("conductivity").unwrap_or(0.49);
    let density = object.real_attr("density").unwrap_or(512.0);
    let specific_heat = object.real_attr("specific_heat").unwrap_or(880.0);

    let id = t.create_named_record_for("Material", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(roughness));
    rec.push_field(Field::Real(thickness));
    rec.push_field(Field::Real(conductivity));
    rec.push_field(Field::Real(density));
    rec.push_field(Field::Real(specific_heat));
    Some(id)
}

pub(crate) fn translate_glazing_material(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let thickness = object.real_attr("thickness").unwrap_or(0.003);
    let solar = object.real_attr("solar_transmittance").unwrap_or(0.8);
    let visible = object.real_attr("visible_transmittance").unwrap_or(0.9);

    let id = t.create_named_record_for("WindowMaterial:Glazing", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text("SpectralAverage".into()));
    rec.push_field(Field::Real(thickness));
    rec.push_field(Field::Real(solar));
    rec.push_field(Field::Real(visible));
    Some(id)
}

pub(crate) fn translate_air_gap(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let resistance = object.real_attr("thermal_resistance").unwrap_or(0.15);

    let id = t.create_named_record_for("Material:AirGap", object);
    t.record_mut(id).push_field(Field::Real(resistance));
    Some(id)
}

/// Gas layers never translate on their own: they only exist as pieces of a
/// window construction's fill, which the construction mapper folds into one
/// shared gas record. Returning `None` here is the legitimate-empty case;
/// the engine caches it so repeated references stay free.
pub(crate) fn translate_gas_layer(
    _t: &mut ForwardTranslator,
    _model: &Model,
    _handle: ObjectHandle,
) -> Option<RecordId> {
    None
}

pub(crate) fn translate_construction(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let layers = object.ref_list("layers");
    if layers.is_empty() {
        t.warn(format!("{} has no layers", object.describe()));
    }

    let id = t.create_named_record_for("Construction", object);

    // Walk the layer list, folding each contiguous run of gas layers into one
    // shared gas/mixture record.
    let mut layer_names: Vec<String> = Vec::with_capacity(layers.len());
    let mut gas_run: Vec<ObjectHandle> = Vec::new();
    for &layer in layers {
        let is_gas = model
            .object(layer)
            .is_some_and(|o| o.object_type() == ObjectType::GasLayer);
        if is_gas {
            gas_run.push(layer);
            // Keep the identity map honest: the layer itself translates to
            // nothing, and that result must be cached like any other.
            t.translate_and_map(model, layer);
            continue;
        }
        flush_gas_run(t, model, &mut gas_run, &mut layer_names);

        match t.translate_and_map(model, layer) {
            Some(layer_id) => {
                let name = t.record(layer_id).name().unwrap_or_default().to_string();
                layer_names.push(name);
            }
            None => t.warn(format!(
                "a layer of {} did not translate and was dropped",
                object.describe()
            )),
        }
    }
    flush_gas_run(t, model, &mut gas_run, &mut layer_names);

    let rec = t.record_mut(id);
    for name in layer_names {
        rec.push_field(Field::NameRef(name));
    }
    Some(id)
}

fn flush_gas_run(
    t: &mut ForwardTranslator,
    model: &Model,
    gas_run: &mut Vec<ObjectHandle>,
    layer_names: &mut Vec<String>,
) {
    if gas_run.is_empty() {
        return;
    }
    if let Some(gas_id) = t.shared_gas_mixture(model, gas_run) {
        let name = t.record(gas_id).name().unwrap_or_default().to_string();
        layer_names.push(name);
    }
    gas_run.clear();
}
