//! The translation engine and its collaborators.
//!
//! [`ForwardTranslator`] is the core: it owns the identity map, the output
//! workspace and the run diagnostics, dispatches to the mapping-function
//! registry, and finishes every full run with the synthesis passes. The
//! submodules hold the pieces it orchestrates: the fixed top-level ordering,
//! the post-traversal synthesis, and the built-in mappers.

mod engine;
pub mod mappers;
mod order;
mod synthesis;

pub use engine::ForwardTranslator;
