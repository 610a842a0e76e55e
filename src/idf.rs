//! Flat-format text serialization.
//!
//! The driver-side collaborator: renders a translated [`Workspace`] as IDF
//! text, one record per block, name first, in exactly the workspace's record
//! order. Output is fully deterministic: the determinism guarantee of the
//! translation run extends through serialization, which is what makes two
//! runs over the same model byte-comparable.

use std::io::Write;

use crate::error::IdfError;
use crate::workspace::Workspace;

/// Render the workspace as IDF text.
pub fn to_idf_string(workspace: &Workspace) -> String {
    let mut text = String::new();
    for record in workspace.records() {
        let mut fields: Vec<String> = Vec::with_capacity(record.field_count() + 1);
        if let Some(name) = record.name() {
            fields.push(name.to_string());
        }
        fields.extend(record.fields().iter().map(|f| f.render()));

        if fields.is_empty() {
            text.push_str(&format!("{};\n\n", record.record_type()));
            continue;
        }

        text.push_str(&format!("{},\n", record.record_type()));
        let last = fields.len() - 1;
        for (i, field) in fields.iter().enumerate() {
            let terminator = if i == last { ';' } else { ',' };
            text.push_str(&format!("  {field}{terminator}\n"));
        }
        text.push('\n');
    }
    text
}

/// Write the workspace as IDF text.
pub fn write_idf(workspace: &Workspace, out: &mut impl Write) -> Result<(), IdfError> {
    out.write_all(to_idf_string(workspace).as_bytes())
        .map_err(|e| IdfError::Io { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, RecordType};

    #[test]
    fn records_render_name_first() {
        let mut ws = Workspace::new();
        let zone = ws.create(RecordType::from("Zone"));
        ws.assign_name(zone, "Core");
        ws.record_mut(zone).push_field(Field::Real(0.0));
        ws.record_mut(zone).push_field(Field::Int(1));

        let text = to_idf_string(&ws);
        assert_eq!(text, "Zone,\n  Core,\n  0.0,\n  1;\n\n");
    }

    #[test]
    fn unnamed_record_renders_fields_only() {
        let mut ws = Workspace::new();
        let ts = ws.create(RecordType::from("Timestep"));
        ws.record_mut(ts).push_field(Field::Int(6));

        let text = to_idf_string(&ws);
        assert_eq!(text, "Timestep,\n  6;\n\n");
    }

    #[test]
    fn fieldless_record_closes_on_the_type_line() {
        let mut ws = Workspace::new();
        ws.create(RecordType::from("Output:Diagnostics"));

        let text = to_idf_string(&ws);
        assert_eq!(text, "Output:Diagnostics;\n\n");
    }

    #[test]
    fn empty_fields_render_blank_positions() {
        let mut ws = Workspace::new();
        let rec = ws.create(RecordType::from("ScheduleTypeLimits"));
        ws.assign_name(rec, "Any Number");
        ws.record_mut(rec).push_field(Field::Empty);
        ws.record_mut(rec).push_field(Field::Empty);
        ws.record_mut(rec)
            .push_field(Field::Text("Continuous".into()));

        let text = to_idf_string(&ws);
        assert_eq!(
            text,
            "ScheduleTypeLimits,\n  Any Number,\n  ,\n  ,\n  Continuous;\n\n"
        );
    }

    #[test]
    fn blocks_follow_workspace_order() {
        let mut ws = Workspace::new();
        ws.create(RecordType::from("Version"));
        ws.create(RecordType::from("Building"));

        let text = to_idf_string(&ws);
        let version_at = text.find("Version").unwrap();
        let building_at = text.find("Building").unwrap();
        assert!(version_at < building_at);
    }

    #[test]
    fn write_idf_streams_the_same_bytes() {
        let mut ws = Workspace::new();
        let zone = ws.create(RecordType::from("Zone"));
        ws.assign_name(zone, "Core");

        let mut buffer = Vec::new();
        write_idf(&ws, &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), to_idf_string(&ws));
    }
}
