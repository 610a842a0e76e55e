//! Translator options: a flat bag of toggles, read once per run.
//!
//! Options are immutable for the duration of one `translate` call: the engine
//! consults them in its synthesis passes, and individual mapping functions
//! consult them to decide whether an object translates at all. They can be
//! replaced between runs, and persisted as TOML.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving an options file.
#[derive(Debug, Error, Diagnostic)]
pub enum OptionsError {
    #[error("failed to read options file: {path}")]
    #[diagnostic(
        code(idforge::options::read),
        help("Ensure the options file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse options file: {path}")]
    #[diagnostic(
        code(idforge::options::parse),
        help("Check the TOML syntax; unknown keys are rejected.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write options file: {path}")]
    #[diagnostic(
        code(idforge::options::write),
        help("Ensure you have write permissions to the target directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type OptionsResult<T> = std::result::Result<T, OptionsError>;

/// Per-run translator configuration, persisted as TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TranslatorOptions {
    /// Skip translation of life-cycle cost objects.
    #[serde(default)]
    pub exclude_lifecycle_costs: bool,
    /// Do not emit the SQLite output-request record.
    #[serde(default)]
    pub exclude_sqlite_output: bool,
    /// Do not emit the tabular summary-report records.
    #[serde(default)]
    pub exclude_html_summary: bool,
    /// Do not emit the variable-dictionary output-request record.
    #[serde(default)]
    pub exclude_variable_dictionary: bool,
    /// Translate run-period special days (holidays). Enabled by default.
    #[serde(default = "default_true")]
    pub keep_special_days: bool,
    /// Request inch-pound units in tabular reports instead of SI.
    #[serde(default)]
    pub ip_tabular_output: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            exclude_lifecycle_costs: false,
            exclude_sqlite_output: false,
            exclude_html_summary: false,
            exclude_variable_dictionary: false,
            keep_special_days: true,
            ip_tabular_output: false,
        }
    }
}

impl TranslatorOptions {
    /// Load from a TOML file.
    pub fn load(path: &std::path::Path) -> OptionsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| OptionsError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| OptionsError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &std::path::Path) -> OptionsResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| OptionsError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| OptionsError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| OptionsError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_special_days() {
        let opts = TranslatorOptions::default();
        assert!(opts.keep_special_days);
        assert!(!opts.exclude_sqlite_output);
        assert!(!opts.ip_tabular_output);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let opts: TranslatorOptions = toml::from_str("exclude_sqlite_output = true").unwrap();
        assert!(opts.exclude_sqlite_output);
        assert!(opts.keep_special_days);
        assert!(!opts.exclude_html_summary);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<TranslatorOptions, _> = toml::from_str("no_such_toggle = true");
        assert!(result.is_err());
    }

    #[test]
    fn roundtrip_through_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("options.toml");

        let opts = TranslatorOptions {
            exclude_html_summary: true,
            keep_special_days: false,
            ..Default::default()
        };
        opts.save(&path).unwrap();

        let loaded = TranslatorOptions::load(&path).unwrap();
        assert!(loaded.exclude_html_summary);
        assert!(!loaded.keep_special_days);
        assert!(!loaded.exclude_sqlite_output);
    }

    #[test]
    fn load_missing_file_is_a_read_error() {
        let result = TranslatorOptions::load(std::path::Path::new("/no/such/options.toml"));
        assert!(matches!(result, Err(OptionsError::Read { .. })));
    }
}
