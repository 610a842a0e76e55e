//! Schedule objects.
//!
//! Schedules without an explicit type-limits reference all share the engine's
//! cached "Any Number" record, so a model full of loosely-specified schedules
//! still produces exactly one fallback limits record.

use crate::model::{Model, ObjectHandle};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

pub(crate) fn translate_schedule_type_limits(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let lower = object.real_attr("lower_limit");
    let upper = object.real_attr("upper_limit");
    let numeric_type = object
        .text_attr("numeric_type")
        .unwrap_or("Continuous")
        .to_string();

    let id = t.create_named_record_for("ScheduleTypeLimits", object);
    let rec = t.record_mut(id);
    rec.push_field(lower.map_or(Field::Empty, Field::Real));
    rec.push_field(upper.map_or(Field::Empty, Field::Real));
    rec.push_field(Field::Text(numeric_type));
    Some(id)
}

/// The type-limits name a schedule should reference: its explicit limits
/// object if set, otherwise the shared "Any Number" default.
fn limits_name(t: &mut ForwardTranslator, model: &Model, object_handle: ObjectHandle) -> String {
    let explicit = model
        .object(object_handle)
        .and_then(|o| o.ref_attr("type_limits"))
        .and_then(|limits| t.translate_and_map(model, limits));
    let id = match explicit {
        Some(id) => id,
        None => t.any_number_schedule_type_limits(),
    };
    t.record(id).name().unwrap_or_default().to_string()
}

pub(crate) fn translate_schedule_constant(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let value = object.real_attr("value").unwrap_or(0.0);
    let limits = limits_name(t, model, handle);

    let id = t.create_named_record_for("Schedule:Constant", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(limits));
    rec.push_field(Field::Real(value));
    Some(id)
}

pub(crate) fn translate_schedule_compact(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let value = object.real_attr("value").unwrap_or(0.0);
    let limits = limits_name(t, model, handle);

    let id = t.create_named_record_for("Schedule:Compact", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::NameRef(limits));
    rec.push_field(Field::Text("Through: 12/31".into()));
    rec.push_field(Field::Text("For: AllDays".into()));
    rec.push_field(Field::Text("Until: 24:00".into()));
    rec.push_field(Field::Real(value));
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectType;
    use crate::options::TranslatorOptions;

    fn translator() -> ForwardTranslator {
        ForwardTranslator::new(TranslatorOptions::default())
    }

    #[test]
    fn explicit_limits_are_referenced_by_name() {
        let mut model = Model::new();
        let limits = model
            .add_named_object(ObjectType::ScheduleTypeLimits, "Fraction")
            .unwrap();
        model.set_real(limits, "lower_limit", 0.0).unwrap();
        model.set_real(limits, "upper_limit", 1.0).unwrap();
        let schedule = model
            .add_named_object(ObjectType::ScheduleConstant, "Always On")
            .unwrap();
        model.set_ref(schedule, "type_limits", limits).unwrap();
        model.set_real(schedule, "value", 1.0).unwrap();

        let mut t = translator();
        let id = t.translate_and_map(&model, schedule).unwrap();
        assert_eq!(
            t.record(id).field(0),
            Some(&Field::NameRef("Fraction".into()))
        );
        assert_eq!(t.record(id).field(1), Some(&Field::Real(1.0)));
    }

    #[test]
    fn schedules_without_limits_share_the_any_number_default() {
        let mut model = Model::new();
        let a = model
            .add_named_object(ObjectType::ScheduleConstant, "Heating Setpoint")
            .unwrap();
        let b = model
            .add_named_object(ObjectType::ScheduleCompact, "Occupancy")
            .unwrap();

        let mut t = translator();
        t.translate_and_map(&model, a).unwrap();
        t.translate_and_map(&model, b).unwrap();

        assert_eq!(
            t.workspace().records_of_type("ScheduleTypeLimits").count(),
            1,
            "both fallbacks must share one Any Number record"
        );
        assert!(t.workspace().find_by_name("ScheduleTypeLimits", "Any Number").is_some());
    }

    #[test]
    fn unset_limit_fields_stay_blank() {
        let mut model = Model::new();
        let limits = model
            .add_named_object(ObjectType::ScheduleTypeLimits, "On/Off")
            .unwrap();
        model.set_text(limits, "numeric_type", "Discrete").unwrap();

        let mut t = translator();
        let id = t.translate_and_map(&model, limits).unwrap();
        let rec = t.record(id);
        assert_eq!(rec.field(0), Some(&Field::Empty));
        assert_eq!(rec.field(1), Some(&Field::Empty));
        assert_eq!(rec.field(2), Some(&Field::Text("Discrete".into())));
    }
}
