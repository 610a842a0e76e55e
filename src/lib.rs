//! # idforge
//!
//! A forward translator: compiles a strongly-typed, cross-referenced
//! building-description object graph (the model) into a flat, positional
//! record collection (the workspace), ready for IDF serialization.
//!
//! ## Architecture
//!
//! - **Model** (`model`): arena of source objects with stable handles; cyclic
//!   and shared references are plain data
//! - **Engine** (`translate`): memoized graph traversal with an identity map
//!   (at-most-once translation per object), deterministic ordering, and
//!   post-traversal synthesis of mandatory default records
//! - **Registry** (`registry`): flat table of per-type mapping functions the
//!   engine dispatches through
//! - **Workspace** (`workspace`): ordered output records with per-type unique
//!   naming
//! - **Diagnostics** (`diagnostics`): best-effort error model, where a run
//!   always produces output and problems accumulate as warnings/errors
//!
//! ## Library usage
//!
//! ```no_run
//! use idforge::model::{Model, ObjectType};
//! use idforge::options::TranslatorOptions;
//! use idforge::translate::ForwardTranslator;
//!
//! let mut model = Model::new();
//! let zone = model.add_named_object(ObjectType::Zone, "Core").unwrap();
//! let _ = zone;
//!
//! let mut translator = ForwardTranslator::new(TranslatorOptions::default());
//! let workspace = translator.translate(&model).unwrap();
//! println!("{}", idforge::idf::to_idf_string(&workspace));
//! for warning in translator.warnings() {
//!     eprintln!("{warning}");
//! }
//! ```

pub mod diagnostics;
pub mod error;
pub mod idf;
pub mod model;
pub mod options;
pub mod record;
pub mod registry;
pub mod translate;
pub mod workspace;
