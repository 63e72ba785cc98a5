//! The template set model: a named group of template files rendered together.
//!
//! On disk a template set is a directory:
//!
//! ```text
//! <set>/
//! ├── project.json      # optional prompt manifest
//! ├── template/         # required: files rendered with token substitution
//! └── boilerplate/      # optional: files copied verbatim
//! ```
//!
//! Both filenames and contents under `template/` may contain tokens.
//! Sets are immutable after load; rendering never touches the source.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, SkelError};
use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::token;

/// Name of the substituted-files subdirectory.
pub const TEMPLATE_DIR: &str = "template";
/// Name of the verbatim-copied subdirectory.
pub const BOILERPLATE_DIR: &str = "boilerplate";

/// Contents of a single template file. Non-UTF-8 files are carried as
/// [`FileContents::Binary`] and copied through without content substitution
/// (their names are still substituted); `skel check` flags them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContents {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContents {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Binary(_) => None,
        }
    }
}

/// One file of a template set: a relative path plus raw contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to `template/` (or `boilerplate/`). May itself contain
    /// tokens, as in `{{.AppName}}.go`.
    pub relative_path: PathBuf,
    pub contents: FileContents,
}

impl TemplateFile {
    pub fn text(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            relative_path: path.into(),
            contents: FileContents::Text(contents.into()),
        }
    }

    /// Distinct tokens referenced by this file, path first, then contents,
    /// each in first-seen order.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = token::distinct_tokens(&self.relative_path.to_string_lossy());
        if let Some(text) = self.contents.as_text() {
            for name in token::distinct_tokens(text) {
                if !tokens.contains(&name) {
                    tokens.push(name);
                }
            }
        }
        tokens
    }
}

/// A named template set: manifest, substituted files, verbatim boilerplate.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    pub name: String,
    pub manifest: Option<Manifest>,
    /// Template files in sorted relative-path order.
    pub files: Vec<TemplateFile>,
    /// Boilerplate files in sorted relative-path order.
    pub boilerplate: Vec<TemplateFile>,
}

impl TemplateSet {
    /// Load a template set from a directory. `template/` is required;
    /// `project.json` and `boilerplate/` are optional.
    pub fn from_dir(name: &str, dir: &Path) -> Result<Self> {
        let template_dir = dir.join(TEMPLATE_DIR);
        if !template_dir.is_dir() {
            return Err(SkelError::TemplateDirMissing(dir.to_path_buf()));
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            Some(Manifest::load(&manifest_path)?)
        } else {
            None
        };

        let files = collect_files(&template_dir)?;
        let boilerplate_dir = dir.join(BOILERPLATE_DIR);
        let boilerplate = if boilerplate_dir.is_dir() {
            collect_files(&boilerplate_dir)?
        } else {
            Vec::new()
        };

        tracing::debug!(
            set = name,
            files = files.len(),
            boilerplate = boilerplate.len(),
            "loaded template set"
        );

        Ok(Self {
            name: name.to_string(),
            manifest,
            files,
            boilerplate,
        })
    }

    /// The union of distinct tokens across every template file's path and
    /// contents, in first-seen order over the sorted file list.
    pub fn required_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        for file in &self.files {
            for name in file.tokens() {
                if !tokens.contains(&name) {
                    tokens.push(name);
                }
            }
        }
        tokens
    }

    /// Number of template files plus boilerplate files.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.boilerplate.len()
    }
}

/// Recursively collect files under `root` as relative-path template files,
/// in sorted order so that downstream behavior is deterministic.
fn collect_files(root: &Path) -> Result<Vec<TemplateFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| SkelError::Other(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| SkelError::Other(e.into()))?
            .to_path_buf();
        let bytes = std::fs::read(entry.path())?;
        let contents = match String::from_utf8(bytes) {
            Ok(text) => FileContents::Text(text),
            Err(e) => FileContents::Binary(e.into_bytes()),
        };
        files.push(TemplateFile {
            relative_path: relative,
            contents,
        });
    }
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    Ok(files)
}
