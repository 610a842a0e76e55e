//! Run-scoped diagnostic accumulation.
//!
//! One translation run collects warnings and errors here instead of failing:
//! a single object with a missing reference must not abort translation of an
//! otherwise-healthy thousand-object model. The sink is cleared at the start
//! of every run and read by the driver afterwards, "compile with warnings"
//! style. Every append is mirrored to `tracing` so live log output sees the
//! same messages.

/// Severity of one diagnostic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Recoverable: the output is still expected to be usable.
    Warning,
    /// Structural: the serialized output will likely be rejected downstream
    /// unless the underlying problem is fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// One accumulated message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Append-only sink for one run's diagnostics. No deduplication; entries keep
/// their append order.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: "idforge::translate", "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::error!(target: "idforge::translate", "{message}");
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    /// Warning-severity entries, in append order.
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .cloned()
            .collect()
    }

    /// Error-severity entries, in append order.
    pub fn errors(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .cloned()
            .collect()
    }

    /// Every entry regardless of severity, in append order.
    pub fn all(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_append_order() {
        let mut diags = Diagnostics::new();
        diags.warn("first");
        diags.error("second");
        diags.warn("third");

        let warnings = diags.warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].message, "first");
        assert_eq!(warnings[1].message, "third");

        let errors = diags.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "second");
    }

    #[test]
    fn no_deduplication() {
        let mut diags = Diagnostics::new();
        diags.warn("same message");
        diags.warn("same message");
        assert_eq!(diags.warnings().len(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut diags = Diagnostics::new();
        diags.warn("w");
        diags.error("e");
        diags.clear();
        assert!(diags.is_empty());
        assert!(diags.warnings().is_empty());
        assert!(diags.errors().is_empty());
    }

    #[test]
    fn display_includes_severity() {
        let d = Diagnostic {
            severity: Severity::Error,
            message: "missing construction".into(),
        };
        assert_eq!(d.to_string(), "error: missing construction");
    }
}
