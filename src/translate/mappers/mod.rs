//! Built-in mapping functions, one per source-object type.
//!
//! Each function reads typed attribute slots off one source object and writes
//! positional fields into the record(s) it emits, recursing through the
//! engine for referenced objects. They are deliberately mechanical; all the
//! interesting state management lives in the engine, and a mapper's job is field
//! plumbing plus deciding between "emit", "skip with a warning", and
//! "structural error".

mod constructions;
mod geometry;
mod loads;
mod outputs;
mod schedules;
mod simulation;

use crate::model::ObjectType;
use crate::record::Field;
use crate::registry::MapperRegistry;

/// Destination format version stamped into every output.
pub const TARGET_VERSION: &str = "24.2";

/// Render a boolean the way the destination format spells it.
pub(crate) fn yes_no(value: bool) -> Field {
    Field::Text(if value { "Yes" } else { "No" }.into())
}

/// The full built-in mapper set: one entry per [`ObjectType`].
pub fn standard_registry() -> MapperRegistry {
    let mut registry = MapperRegistry::new();

    registry.register(ObjectType::Version, simulation::translate_version);
    registry.register(
        ObjectType::SimulationControl,
        simulation::translate_simulation_control,
    );
    registry.register(ObjectType::Timestep, simulation::translate_timestep);
    registry.register(ObjectType::RunPeriod, simulation::translate_run_period);
    registry.register(ObjectType::SpecialDays, simulation::translate_special_days);
    registry.register(
        ObjectType::SizingParameters,
        simulation::translate_sizing_parameters,
    );
    registry.register(ObjectType::Site, simulation::translate_site);
    registry.register(ObjectType::DesignDay, simulation::translate_design_day);
    registry.register(
        ObjectType::LifeCycleCost,
        simulation::translate_lifecycle_cost,
    );

    registry.register(
        ObjectType::ScheduleTypeLimits,
        schedules::translate_schedule_type_limits,
    );
    registry.register(
        ObjectType::ScheduleConstant,
        schedules::translate_schedule_constant,
    );
    registry.register(
        ObjectType::ScheduleCompact,
        schedules::translate_schedule_compact,
    );

    registry.register(
        ObjectType::OpaqueMaterial,
        constructions::translate_opaque_material,
    );
    registry.register(
        ObjectType::GlazingMaterial,
        constructions::translate_glazing_material,
    );
    registry.register(ObjectType::AirGap, constructions::translate_air_gap);
    registry.register(ObjectType::GasLayer, constructions::translate_gas_layer);
    registry.register(
        ObjectType::Construction,
        constructions::translate_construction,
    );

    registry.register(ObjectType::Building, geometry::translate_building);
    registry.register(ObjectType::Zone, geometry::translate_zone);
    registry.register(ObjectType::Surface, geometry::translate_surface);
    registry.register(ObjectType::SubSurface, geometry::translate_sub_surface);

    registry.register(ObjectType::Lights, loads::translate_lights);
    registry.register(ObjectType::People, loads::translate_people);
    registry.register(
        ObjectType::ElectricEquipment,
        loads::translate_electric_equipment,
    );
    registry.register(ObjectType::Infiltration, loads::translate_infiltration);

    registry.register(
        ObjectType::OutputVariable,
        outputs::translate_output_variable,
    );
    registry.register(ObjectType::OutputMeter, outputs::translate_output_meter);

    registry
}
