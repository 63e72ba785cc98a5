//! Unified error types for the skel toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur during skel operations.
#[derive(Error, Debug)]
pub enum SkelError {
    // --- Manifest ---

    /// The `project.json` manifest exists but contains invalid JSON.
    #[error("failed to parse manifest at {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest parsed but violates a structural rule (bad prompt name, empty message).
    #[error("invalid manifest at {path}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    // --- Values ---

    /// A `--values` file exists but contains invalid JSON.
    #[error("failed to parse values file at {path}")]
    ValuesParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `--values` file parsed but is not a flat string-to-string object.
    #[error("values file at {path} must be a flat JSON object of string values")]
    ValuesShape { path: PathBuf },

    /// A `--set` flag was not of the form `Token=Value`.
    #[error("invalid assignment '{0}' (expected Token=Value)")]
    InvalidAssignment(String),

    // --- Templates ---

    /// No template source could resolve the given identifier.
    #[error("template '{spec}' not found (available: {})", .available.join(", "))]
    TemplateNotFound {
        spec: String,
        available: Vec<String>,
    },

    /// A template set directory is missing its required `template/` subdirectory.
    #[error("not a template set: {0} has no template/ directory")]
    TemplateDirMissing(PathBuf),

    // --- Rendering ---

    /// One or more tokens in the set have no entry in the value mapping.
    /// Raised during planning, before any output file is written.
    #[error("missing values for tokens: {}", .0.join(", "))]
    MissingValues(Vec<String>),

    /// The render target exists and is not empty (pass `--force` to overwrite).
    #[error("target directory already exists and is not empty: {0}")]
    TargetExists(PathBuf),

    // --- Registry ---

    /// The registry tag is empty, contains illegal characters, or shadows a builtin set.
    #[error("invalid template tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },

    /// A saved template set already exists under this tag (pass `--force` to replace).
    #[error("template tag already exists: {0}")]
    TagExists(String),

    /// No saved template set exists under this tag.
    #[error("no saved template under tag: {0}")]
    UnknownTag(String),

    /// A registry sidecar (`skel.meta.json`) is unreadable or invalid.
    #[error("failed to parse registry metadata at {path}")]
    MetaParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A template set failed structural validation badly enough to block the operation.
    #[error("template set at {path} failed validation: {reason}")]
    ValidationFailed { path: PathBuf, reason: String },

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, SkelError>`.
pub type Result<T> = std::result::Result<T, SkelError>;
