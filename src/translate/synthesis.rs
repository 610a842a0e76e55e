//! Post-traversal synthesis passes.
//!
//! After every reachable source object has been translated, a fixed sequence
//! of passes inspects the accumulated workspace and emits the records that
//! have no 1:1 source object: mandatory simulation-wide defaults that must
//! exist exactly once, and the standard output requests gated by options.
//! Pass order is fixed; it is part of the run's determinism guarantee.

use crate::record::Field;

use super::engine::ForwardTranslator;
use super::mappers::{TARGET_VERSION, yes_no};

/// Run all passes, in order. Invoked by the engine for every full-model
/// translation, including over an empty model.
pub(crate) fn run(t: &mut ForwardTranslator) {
    ensure_version(t);
    ensure_simulation_control(t);
    ensure_building(t);
    ensure_timestep(t);
    ensure_run_period(t);
    global_geometry_rules(t);
    standard_output_requests(t);
}

fn has_record(t: &ForwardTranslator, record_type: &str) -> bool {
    t.workspace().records_of_type(record_type).next().is_some()
}

fn ensure_version(t: &mut ForwardTranslator) {
    if has_record(t, "Version") {
        return;
    }
    let id = t.create_record("Version");
    t.record_mut(id).push_field(Field::Text(TARGET_VERSION.into()));
}

fn ensure_simulation_control(t: &mut ForwardTranslator) {
    if has_record(t, "SimulationControl") {
        return;
    }
    let id = t.create_record("SimulationControl");
    let rec = t.record_mut(id);
    rec.push_field(yes_no(false)); // zone sizing
    rec.push_field(yes_no(false)); // system sizing
    rec.push_field(yes_no(false)); // plant sizing
    rec.push_field(yes_no(true)); // run for sizing periods
    rec.push_field(yes_no(true)); // run for weather run periods
}

fn ensure_building(t: &mut ForwardTranslator) {
    if has_record(t, "Building") {
        return;
    }
    let id = t.create_record("Building");
    t.name_record(id, "Building");
    let rec = t.record_mut(id);
    rec.push_field(Field::Real(0.0)); // north axis
    rec.push_field(Field::Text("Suburbs".into()));
}

fn ensure_timestep(t: &mut ForwardTranslator) {
    if has_record(t, "Timestep") {
        return;
    }
    let id = t.create_record("Timestep");
    t.record_mut(id).push_field(Field::Int(6));
}

fn ensure_run_period(t: &mut ForwardTranslator) {
    if has_record(t, "RunPeriod") {
        return;
    }
    let id = t.create_record("RunPeriod");
    t.name_record(id, "Run Period 1");
    let rec = t.record_mut(id);
    rec.push_field(Field::Int(1)); // begin month
    rec.push_field(Field::Int(1)); // begin day
    rec.push_field(Field::Int(12)); // end month
    rec.push_field(Field::Int(31)); // end day
}

/// Always emitted, exactly once: the destination format requires the geometry
/// conventions to be stated even when the model has no geometry at all.
fn global_geometry_rules(t: &mut ForwardTranslator) {
    let id = t.create_record("GlobalGeometryRules");
    let rec = t.record_mut(id);
    rec.push_field(Field::Text("UpperLeftCorner".into()));
    rec.push_field(Field::Text("Counterclockwise".into()));
    rec.push_field(Field::Text("Relative".into()));
    rec.push_field(Field::Text("Relative".into()));
    rec.push_field(Field::Text("Relative".into()));
}

fn standard_output_requests(t: &mut ForwardTranslator) {
    if !t.options().exclude_variable_dictionary {
        let id = t.create_record("Output:VariableDictionary");
        t.record_mut(id).push_field(Field::Text("Regular".into()));
    }

    if !t.options().exclude_sqlite_output {
        let id = t.create_record("Output:SQLite");
        t.record_mut(id)
            .push_field(Field::Text("SimpleAndTabular".into()));
    }

    if !t.options().exclude_html_summary {
        if !has_record(t, "Output:Table:SummaryReports") {
            let id = t.create_record("Output:Table:SummaryReports");
            t.record_mut(id).push_field(Field::Text("AllSummary".into()));
        }
        let unit_system = if t.options().ip_tabular_output {
            "InchPound"
        } else {
            "None"
        };
        let id = t.create_record("OutputControl:Table:Style");
        let rec = t.record_mut(id);
        rec.push_field(Field::Text("HTML".into()));
        rec.push_field(Field::Text(unit_system.into()));
    }
}
