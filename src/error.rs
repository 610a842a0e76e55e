//! Rich diagnostic error types for the idforge translator.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Note that per-object translation problems
//! are NOT errors in this sense: they are accumulated as run diagnostics (see
//! [`crate::diagnostics`]) while translation continues. The types here cover the
//! conditions that genuinely stop an operation.

use miette::Diagnostic;
use thiserror::Error;

use crate::model::ObjectHandle;

/// Top-level error type for the idforge crate.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum IdforgeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Idf(#[from] IdfError),
}

// ---------------------------------------------------------------------------
// Model errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ModelError {
    #[error("no object with handle {handle} in this model")]
    #[diagnostic(
        code(idforge::model::unknown_object),
        help(
            "The handle does not refer to a live object in this arena. \
             Handles are only valid for the model that allocated them; \
             check that it was not obtained from a different model."
        )
    )]
    UnknownObject { handle: ObjectHandle },

    #[error("object '{from}' slot '{slot}' references missing handle {to}")]
    #[diagnostic(
        code(idforge::model::dangling_reference),
        help(
            "A reference slot points at a handle with no object behind it. \
             Build reference slots only from handles returned by `Model::add_object` \
             on the same model."
        )
    )]
    DanglingReference {
        from: String,
        slot: String,
        to: ObjectHandle,
    },

    #[error("object handle space exhausted")]
    #[diagnostic(
        code(idforge::model::handles_exhausted),
        help(
            "The handle allocator ran out of IDs. This requires 2^64 - 1 \
             allocations and should never happen in practice; check for an \
             object-creation loop."
        )
    )]
    HandlesExhausted,
}

// ---------------------------------------------------------------------------
// Translation errors
// ---------------------------------------------------------------------------

/// Fatal translation failures.
///
/// A run only fails outright when the input arena cannot be traversed at all.
/// Everything else (unsupported types, missing references, disabled objects)
/// is absorbed into the run's [`crate::diagnostics::Diagnostics`] and the run
/// still produces a best-effort workspace.
#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error("model cannot be traversed: {count} dangling reference(s), first: {first}")]
    #[diagnostic(
        code(idforge::translate::malformed_model),
        help(
            "The source arena contains reference slots pointing at objects that do \
             not exist, so a full traversal is impossible. Run `Model::validate` to \
             list every broken reference, then fix the model construction code."
        )
    )]
    MalformedModel { count: usize, first: String },
}

// ---------------------------------------------------------------------------
// IDF serialization errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IdfError {
    #[error("failed to write IDF output: {source}")]
    #[diagnostic(
        code(idforge::idf::io),
        help(
            "Writing the serialized workspace failed. Check the destination path, \
             its permissions, and free disk space."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for functions returning idforge results.
pub type IdforgeResult<T> = std::result::Result<T, IdforgeError>;
