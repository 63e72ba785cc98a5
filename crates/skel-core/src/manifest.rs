//! The `project.json` prompt manifest at the root of a template set.
//!
//! ```json
//! {
//!   "prompts": [
//!     { "name": "AppName", "message": "Application name?", "default": "mycli" }
//!   ]
//! }
//! ```
//!
//! An absent manifest is legal: the set still renders, but nothing is
//! prompted and no defaults exist. A present-but-invalid manifest is a
//! hard error naming the file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkelError};
use crate::token;
use crate::values::ValueMap;

/// Filename of the manifest at the template set root.
pub const MANIFEST_FILE: &str = "project.json";

/// One interactive prompt: which token it fills, what to ask, and an
/// optional prefilled default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// The parsed manifest: an ordered list of prompts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    #[serde(default)]
    pub prompts: Vec<Prompt>,
}

impl Manifest {
    /// Load and validate `project.json` from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents, path)
    }

    /// Parse manifest text, attributing errors to `path` (which may be a
    /// virtual path for embedded builtin sets).
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let manifest: Manifest =
            serde_json::from_str(contents).map_err(|e| SkelError::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        manifest.validate(path)?;
        Ok(manifest)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for prompt in &self.prompts {
            if !token::is_valid_identifier(&prompt.name) {
                return Err(SkelError::ManifestInvalid {
                    path: path.to_path_buf(),
                    reason: format!("prompt name '{}' is not a valid token identifier", prompt.name),
                });
            }
            if prompt.message.is_empty() {
                return Err(SkelError::ManifestInvalid {
                    path: path.to_path_buf(),
                    reason: format!("prompt '{}' has an empty message", prompt.name),
                });
            }
        }
        Ok(())
    }

    /// The prompt for a given token, if one exists.
    pub fn prompt_for(&self, name: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// All prompt defaults as a value map (tokens without a default are absent).
    pub fn defaults(&self) -> ValueMap {
        self.prompts
            .iter()
            .filter_map(|p| p.default.clone().map(|d| (p.name.clone(), d)))
            .collect()
    }

    /// Token names covered by prompts, in manifest order.
    pub fn prompt_names(&self) -> Vec<&str> {
        self.prompts.iter().map(|p| p.name.as_str()).collect()
    }
}
