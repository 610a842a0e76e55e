//! Top-level translation order.
//!
//! The full-model pass walks object types in this fixed order, and objects of
//! one type in case-insensitive name order (handle as tie-breaker). Together
//! with the engine's create-order output collection this pins down the
//! deterministic record ordering the whole run guarantees: two runs over the
//! same model and options serialize byte-identically.
//!
//! Simulation-wide singletons come first, then shared resources (schedules,
//! materials, constructions), then geometry, then the loads and output
//! requests that reference all of the above. Referenced objects are pulled in
//! earlier on demand by their referrers; this list only fixes where a type is
//! *first* visited when nothing referenced it before.

use crate::model::ObjectType;

pub(crate) const TRANSLATION_ORDER: &[ObjectType] = &[
    ObjectType::Version,
    ObjectType::SimulationControl,
    ObjectType::Timestep,
    ObjectType::RunPeriod,
    ObjectType::SpecialDays,
    ObjectType::SizingParameters,
    ObjectType::Site,
    ObjectType::DesignDay,
    ObjectType::LifeCycleCost,
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
    ObjectType::OutputVariable,
    ObjectType::OutputMeter,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_covers_every_object_type_exactly_once() {
        assert_eq!(TRANSLATION_ORDER.len(), ObjectType::ALL.len());
        for ty in ObjectType::ALL {
            assert_eq!(
                TRANSLATION_ORDER.iter().filter(|t| *t == ty).count(),
                1,
                "{ty} must appear exactly once in the translation order"
            );
        }
    }
}
