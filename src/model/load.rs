//! Model-document loading: JSON text → arena.
//!
//! The document format is deliberately plain: a list of objects, each with a
//! type name, an optional unique name, literal attributes, and references to
//! other objects *by name*. Loading resolves every by-name reference to a
//! handle in a second pass, so documents can reference forward and backward
//! freely (including cycles).

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use crate::error::ModelError;

use super::{Model, ObjectHandle, ObjectType};

/// Errors from loading a model document.
#[derive(Debug, Error, Diagnostic)]
pub enum ModelLoadError {
    #[error("failed to read model document: {path}")]
    #[diagnostic(
        code(idforge::model::load::read),
        help("Ensure the model file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model document: {message}")]
    #[diagnostic(
        code(idforge::model::load::parse),
        help("The document must be JSON with a top-level `objects` array.")
    )]
    Parse { message: String },

    #[error("object '{object}' has unknown type '{type_name}'")]
    #[diagnostic(
        code(idforge::model::load::unknown_type),
        help("Use one of the canonical type names, e.g. \"Zone\" or \"Construction\".")
    )]
    UnknownType { object: String, type_name: String },

    #[error("duplicate object name '{name}'")]
    #[diagnostic(
        code(idforge::model::load::duplicate_name),
        help(
            "References in a model document are resolved by name, so every \
             named object needs a unique name (case-insensitive)."
        )
    )]
    DuplicateName { name: String },

    #[error("object '{object}' slot '{slot}' references unknown object '{target}'")]
    #[diagnostic(
        code(idforge::model::load::unresolved_reference),
        help("Reference slots must name another object defined in the same document.")
    )]
    UnresolvedRef {
        object: String,
        slot: String,
        target: String,
    },

    #[error("object '{object}' attribute '{slot}' has an unsupported value")]
    #[diagnostic(
        code(idforge::model::load::invalid_attr),
        help("Attribute values must be strings, numbers, or booleans.")
    )]
    InvalidAttr { object: String, slot: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),
}

pub type ModelLoadResult<T> = std::result::Result<T, ModelLoadError>;

#[derive(Debug, Deserialize)]
struct ModelDoc {
    objects: Vec<ObjectDoc>,
}

#[derive(Debug, Deserialize)]
struct ObjectDoc {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    attrs: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    refs: BTreeMap<String, RefDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RefDoc {
    One(String),
    Many(Vec<String>),
}

/// Load a model document from a file.
pub fn load_model(path: &Path) -> ModelLoadResult<Model> {
    let content = std::fs::read_to_string(path).map_err(|e| ModelLoadError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    model_from_json(&content)
}

/// Build a model from JSON text.
pub fn model_from_json(json: &str) -> ModelLoadResult<Model> {
    let doc: ModelDoc = serde_json::from_str(json).map_err(|e| ModelLoadError::Parse {
        message: e.to_string(),
    })?;

    let mut model = Model::new();
    let mut by_name: HashMap<String, ObjectHandle> = HashMap::new();

    // First pass: create every object and index names.
    let mut handles = Vec::with_capacity(doc.objects.len());
    for object in &doc.objects {
        let describe = object
            .name
            .clone()
            .unwrap_or_else(|| format!("<unnamed {}>", object.type_name));
        let object_type: ObjectType =
            object
                .type_name
                .parse()
                .map_err(|()| ModelLoadError::UnknownType {
                    object: describe.clone(),
                    type_name: object.type_name.clone(),
                })?;

        let handle = model.add_object(object_type)?;
        if let Some(name) = &object.name {
            if by_name.insert(name.to_lowercase(), handle).is_some() {
                return Err(ModelLoadError::DuplicateName { name: name.clone() });
            }
            model.set_name(handle, name.clone())?;
        }

        for (slot, value) in &object.attrs {
            let attr = scalar_from_json(value).ok_or_else(|| ModelLoadError::InvalidAttr {
                object: describe.clone(),
                slot: slot.clone(),
            })?;
            model.set_attr(handle, slot.clone(), super::AttrValue::Scalar(attr))?;
        }
        handles.push(handle);
    }

    // Second pass: resolve by-name references.
    for (object, handle) in doc.objects.iter().zip(handles) {
        let describe = object
            .name
            .clone()
            .unwrap_or_else(|| format!("<unnamed {}>", object.type_name));
        for (slot, reference) in &object.refs {
            let resolve = |target: &String| {
                by_name.get(&target.to_lowercase()).copied().ok_or_else(|| {
                    ModelLoadError::UnresolvedRef {
                        object: describe.clone(),
                        slot: slot.clone(),
                        target: target.clone(),
                    }
                })
            };
            match reference {
                RefDoc::One(target) => {
                    let target = resolve(target)?;
                    model.set_ref(handle, slot.clone(), target)?;
                }
                RefDoc::Many(targets) => {
                    let targets = targets.iter().map(resolve).collect::<Result<Vec<_>, _>>()?;
                    model.set_refs(handle, slot.clone(), targets)?;
                }
            }
        }
    }

    Ok(model)
}

fn scalar_from_json(value: &serde_json::Value) -> Option<super::Scalar> {
    match value {
        serde_json::Value::String(s) => Some(super::Scalar::Text(s.clone())),
        serde_json::Value::Bool(b) => Some(super::Scalar::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(super::Scalar::Int(i))
            } else {
                n.as_f64().map(super::Scalar::Real)
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_objects_attrs_and_refs() {
        let model = model_from_json(
            r#"{
                "objects": [
                    {"type": "Zone", "name": "Core",
                     "attrs": {"multiplier": 2},
                     "refs": {"surfaces": ["South Wall"]}},
                    {"type": "Surface", "name": "South Wall",
                     "attrs": {"surface_type": "Wall", "area": 12.5, "matched": false},
                     "refs": {"zone": "Core"}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(model.len(), 2);
        let zone = model.objects_of_type(ObjectType::Zone).next().unwrap();
        let wall = model.objects_of_type(ObjectType::Surface).next().unwrap();
        assert_eq!(zone.int_attr("multiplier"), Some(2));
        assert_eq!(wall.real_attr("area"), Some(12.5));
        assert_eq!(wall.bool_attr("matched"), Some(false));
        assert_eq!(wall.ref_attr("zone"), Some(zone.handle()));
        assert_eq!(zone.ref_list("surfaces"), &[wall.handle()]);
        assert!(model.validate().is_empty());
    }

    #[test]
    fn forward_references_resolve() {
        let model = model_from_json(
            r#"{
                "objects": [
                    {"type": "Surface", "name": "Wall", "refs": {"construction": "Later"}},
                    {"type": "Construction", "name": "Later"}
                ]
            }"#,
        )
        .unwrap();
        assert!(model.validate().is_empty());
    }

    #[test]
    fn reference_resolution_is_case_insensitive() {
        let model = model_from_json(
            r#"{
                "objects": [
                    {"type": "Surface", "name": "Wall", "refs": {"construction": "BRICK WALL"}},
                    {"type": "Construction", "name": "Brick Wall"}
                ]
            }"#,
        )
        .unwrap();
        assert!(model.validate().is_empty());
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = model_from_json(
            r#"{"objects": [{"type": "Spaceship", "name": "X"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::UnknownType { .. }));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = model_from_json(
            r#"{
                "objects": [
                    {"type": "Zone", "name": "Core"},
                    {"type": "Zone", "name": "core"}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::DuplicateName { .. }));
    }

    #[test]
    fn unresolved_reference_is_rejected() {
        let err = model_from_json(
            r#"{"objects": [{"type": "Surface", "name": "Wall", "refs": {"zone": "Nowhere"}}]}"#,
        )
        .unwrap_err();
        match err {
            ModelLoadError::UnresolvedRef { object, slot, target } => {
                assert_eq!(object, "Wall");
                assert_eq!(slot, "zone");
                assert_eq!(target, "Nowhere");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn structured_attr_values_are_rejected() {
        let err = model_from_json(
            r#"{"objects": [{"type": "Zone", "name": "Core", "attrs": {"vertices": [1, 2]}}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelLoadError::InvalidAttr { .. }));
    }

    #[test]
    fn load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("model.json");
        std::fs::write(&path, r#"{"objects": [{"type": "Zone", "name": "Core"}]}"#).unwrap();

        let model = load_model(&path).unwrap();
        assert_eq!(model.len(), 1);

        let missing = load_model(&tmp.path().join("nope.json"));
        assert!(matches!(missing, Err(ModelLoadError::Read { .. })));
    }
}
