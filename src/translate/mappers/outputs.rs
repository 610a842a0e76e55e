//! Output-request objects.

use crate::model::{Model, ObjectHandle};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

pub(crate) fn translate_output_variable(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let Some(variable) = object.text_attr("variable_name") else {
        t.warn(format!(
            "{} has no variable name, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let variable = variable.to_string();
    let key = object.text_attr("key_value").unwrap_or("*").to_string();
    let frequency = object
        .text_attr("reporting_frequency")
        .unwrap_or("Hourly")
        .to_string();

    let id = t.create_record_for("Output:Variable", handle);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(key));
    rec.push_field(Field::Text(variable));
    rec.push_field(Field::Text(frequency));
    Some(id)
}

pub(crate) fn translate_output_meter(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let Some(meter) = object.text_attr("meter_name") else {
        t.warn(format!(
            "{} has no meter name, it will not be translated",
            object.describe()
        ));
        return None;
    };
    let meter = meter.to_string();
    let frequency = object
        .text_attr("reporting_frequency")
        .unwrap_or("Hourly")
        .to_string();

    let id = t.create_record_for("Output:Meter", handle);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(meter));
    rec.push_field(Field::Text(frequency));
    Some(id)
}
