//! Simulation-wide singleton and site objects.

use crate::model::{Model, ObjectHandle};
use crate::record::Field;
use crate::translate::ForwardTranslator;
use crate::workspace::RecordId;

use super::{TARGET_VERSION, yes_no};

pub(crate) fn translate_version(
    t: &mut ForwardTranslator,
    _model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    // The model's own version attribute is ignored on purpose: the output
    // always targets the version this translator was built against.
    let id = t.create_record_for("Version", handle);
    t.record_mut(id).push_field(Field::Text(TARGET_VERSION.into()));
    Some(id)
}

pub(crate) fn translate_simulation_control(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let zone_sizing = object.bool_attr("do_zone_sizing").unwrap_or(false);
    let system_sizing = object.bool_attr("do_system_sizing").unwrap_or(false);
    let plant_sizing = object.bool_attr("do_plant_sizing").unwrap_or(false);
    let sizing_periods = object.bool_attr("run_for_sizing_periods").unwrap_or(true);
    let weather_periods = object.bool_attr("run_for_weather_periods").unwrap_or(true);

    let id = t.create_record_for("SimulationControl", handle);
    let rec = t.record_mut(id);
    rec.push_field(yes_no(zone_sizing));
    rec.push_field(yes_no(system_sizing));
    rec.push_field(yes_no(plant_sizing));
    rec.push_field(yes_no(sizing_periods));
    rec.push_field(yes_no(weather_periods));
    Some(id)
}

pub(crate) fn translate_timestep(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let steps = object.int_attr("steps_per_hour").unwrap_or(6);

    let id = t.create_record_for("Timestep", handle);
    t.record_mut(id).push_field(Field::Int(steps));
    Some(id)
}

pub(crate) fn translate_run_period(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let begin_month = object.int_attr("begin_month").unwrap_or(1);
    let begin_day = object.int_attr("begin_day").unwrap_or(1);
    let end_month = object.int_attr("end_month").unwrap_or(12);
    let end_day = object.int_attr("end_day").unwrap_or(31);
    let start_day = object
        .text_attr("start_day_of_week")
        .unwrap_or("Sunday")
        .to_string();

    let id = t.create_named_record_for("RunPeriod", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Int(begin_month));
    rec.push_field(Field::Int(begin_day));
    rec.push_field(Field::Int(end_month));
    rec.push_field(Field::Int(end_day));
    rec.push_field(Field::Text(start_day));
    Some(id)
}

pub(crate) fn translate_special_days(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    if !t.options().keep_special_days {
        t.warn(format!(
            "{} skipped: special-day translation is disabled by options",
            object.describe()
        ));
        return None;
    }
    let start_date = object.text_attr("start_date").unwrap_or("1/1").to_string();
    let duration = object.int_attr("duration").unwrap_or(1);
    let day_type = object
        .text_attr("special_day_type")
        .unwrap_or("Holiday")
        .to_string();

    let id = t.create_named_record_for("RunPeriodControl:SpecialDays", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(start_date));
    rec.push_field(Field::Int(duration));
    rec.push_field(Field::Text(day_type));
    Some(id)
}

pub(crate) fn translate_sizing_parameters(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let heating = object.real_attr("heating_sizing_factor").unwrap_or(1.25);
    let cooling = object.real_attr("cooling_sizing_factor").unwrap_or(1.15);

    let id = t.create_record_for("Sizing:Parameters", handle);
    let rec = t.record_mut(id);
    rec.push_field(Field::Real(heating));
    rec.push_field(Field::Real(cooling));
    Some(id)
}

pub(crate) fn translate_site(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let latitude = object.real_attr("latitude").unwrap_or(0.0);
    let longitude = object.real_attr("longitude").unwrap_or(0.0);
    let time_zone = object.real_attr("time_zone").unwrap_or(0.0);
    let elevation = object.real_attr("elevation").unwrap_or(0.0);

    let id = t.create_named_record_for("Site:Location", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Real(latitude));
    rec.push_field(Field::Real(longitude));
    rec.push_field(Field::Real(time_zone));
    rec.push_field(Field::Real(elevation));
    Some(id)
}

pub(crate) fn translate_design_day(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    let month = object.int_attr("month").unwrap_or(1);
    let day = object.int_attr("day_of_month").unwrap_or(21);
    let day_type = object
        .text_attr("day_type")
        .unwrap_or("WinterDesignDay")
        .to_string();
    let max_dry_bulb = object.real_attr("max_dry_bulb").unwrap_or(0.0);
    let daily_range = object.real_attr("daily_temp_range").unwrap_or(0.0);

    let id = t.create_named_record_for("SizingPeriod:DesignDay", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Int(month));
    rec.push_field(Field::Int(day));
    rec.push_field(Field::Text(day_type));
    rec.push_field(Field::Real(max_dry_bulb));
    rec.push_field(Field::Real(daily_range));
    Some(id)
}

pub(crate) fn translate_lifecycle_cost(
    t: &mut ForwardTranslator,
    model: &Model,
    handle: ObjectHandle,
) -> Option<RecordId> {
    let object = model.object(handle)?;
    if t.options().exclude_lifecycle_costs {
        return None;
    }
    let category = object
        .text_attr("category")
        .unwrap_or("Construction")
        .to_string();
    let cost = object.real_attr("cost").unwrap_or(0.0);
    let start = object
        .text_attr("start_of_costs")
        .unwrap_or("ServicePeriod")
        .to_string();

    let id = t.create_named_record_for("LifeCycleCost:NonrecurringCost", object);
    let rec = t.record_mut(id);
    rec.push_field(Field::Text(category));
    rec.push_field(Field::Real(cost));
    rec.push_field(Field::Text(start));
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
    fn version_always_stamps_the_target() {
        let mut model = Model::new();
        let version = model.add_object(ObjectType::Version).unwrap();
        model.set_text(version, "version", "1.2").unwrap();

        let mut t = translator();
        let id = t.translate_and_map(&model, version).unwrap();
        assert_eq!(
            t.record(id).field(0),
            Some(&Field::Text(TARGET_VERSION.into()))
        );
    }

    #[test]
    fn simulation_control_defaults() {
        let mut model = Model::new();
        let sc = model.add_object(ObjectType::SimulationControl).unwrap();

        let mut t = translator();
        let id = t.translate_and_map(&model, sc).unwrap();
        let rec = t.record(id);
        assert_eq!(rec.field(0), Some(&Field::Text("No".into())));
        assert_eq!(rec.field(3), Some(&Field::Text("Yes".into())));
    }

    #[test]
    fn special_days_suppressed_by_option() {
        let mut model = Model::new();
        let day = model
            .add_named_object(ObjectType::SpecialDays, "New Year")
            .unwrap();

        let mut t = ForwardTranslator::new(TranslatorOptions {
            keep_special_days: false,
            ..Default::default()
        });
        assert_eq!(t.translate_and_map(&model, day), None);
        assert_eq!(t.warnings().len(), 1);
        assert!(t.warnings()[0].message.contains("New Year"));
    }

    #[test]
    fn lifecycle_cost_suppressed_silently_by_option() {
        let mut model = Model::new();
        let cost = model
            .add_named_object(ObjectType::LifeCycleCost, "Roof Replacement")
            .unwrap();

        let mut t = ForwardTranslator::new(TranslatorOptions {
            exclude_lifecycle_costs: true,
            ..Default::default()
        });
        assert_eq!(t.translate_and_map(&model, cost), None);
        assert!(t.warnings().is_empty());
    }
}
