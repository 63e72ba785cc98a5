//! The local template registry: saved template sets under the user's data
//! directory.
//!
//! Layout: `<data dir>/skel/templates/<tag>/`, one saved set per tag, each
//! with a `skel.meta.json` sidecar recording where it came from, how many
//! files it holds, and a content digest. The location can be overridden
//! (CLI `--template-dir`, env `SKEL_TEMPLATE_DIR`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{Result, SkelError};
use crate::manifest::MANIFEST_FILE;
use crate::templates::embedded;
use crate::templates::set::{TemplateSet, BOILERPLATE_DIR, TEMPLATE_DIR};
use crate::validate;

/// Filename of the per-tag metadata sidecar.
pub const META_FILE: &str = "skel.meta.json";

/// Metadata written next to each saved template set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMeta {
    pub tag: String,
    /// Directory the set was saved from.
    pub origin: PathBuf,
    /// Template plus boilerplate file count.
    pub file_count: usize,
    /// Hex sha256 over the set's sorted relative paths and contents.
    pub digest: String,
}

/// Handle on the registry root directory.
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    /// Open (creating if needed) the registry at `override_dir`, or at the
    /// platform default `<data dir>/skel/templates`.
    pub fn open(override_dir: Option<PathBuf>) -> Result<Self> {
        let root = match override_dir {
            Some(dir) => dir,
            None => dirs::data_dir()
                .ok_or_else(|| {
                    SkelError::Other(anyhow::anyhow!(
                        "no platform data directory; pass --template-dir"
                    ))
                })?
                .join("skel")
                .join("templates"),
        };
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory a tag is (or would be) stored under.
    pub fn path_for(&self, tag: &str) -> PathBuf {
        self.root.join(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.path_for(tag).join(TEMPLATE_DIR).is_dir()
    }

    /// Validate and copy a template set directory into the registry.
    ///
    /// Structural validation errors block the save. Saving over an existing
    /// tag requires `force`.
    pub fn save(&self, source_dir: &Path, tag: &str, force: bool) -> Result<TemplateMeta> {
        validate_tag(tag)?;

        let diagnostics = validate::check_dir(source_dir);
        if diagnostics.error_count() > 0 {
            return Err(SkelError::ValidationFailed {
                path: source_dir.to_path_buf(),
                reason: format!("{} structural error(s)", diagnostics.error_count()),
            });
        }

        let dest = self.path_for(tag);
        if dest.exists() {
            if !force {
                return Err(SkelError::TagExists(tag.to_string()));
            }
            std::fs::remove_dir_all(&dest)?;
        }

        // Load through the set model so the digest covers exactly what a
        // later `skel use` will see.
        let set = TemplateSet::from_dir(tag, source_dir)?;
        let digest = digest_set(&set);

        copy_tree(&source_dir.join(TEMPLATE_DIR), &dest.join(TEMPLATE_DIR))?;
        let boilerplate_src = source_dir.join(BOILERPLATE_DIR);
        if boilerplate_src.is_dir() {
            copy_tree(&boilerplate_src, &dest.join(BOILERPLATE_DIR))?;
        }
        let manifest_src = source_dir.join(MANIFEST_FILE);
        if manifest_src.is_file() {
            std::fs::copy(&manifest_src, dest.join(MANIFEST_FILE))?;
        }

        let meta = TemplateMeta {
            tag: tag.to_string(),
            origin: source_dir.to_path_buf(),
            file_count: set.file_count(),
            digest,
        };
        self.write_meta(&dest, &meta)?;

        tracing::debug!(tag, files = meta.file_count, "saved template set");
        Ok(meta)
    }

    /// All saved sets in sorted tag order.
    pub fn list(&self) -> Result<Vec<TemplateMeta>> {
        let mut entries = Vec::new();
        let mut tags: Vec<PathBuf> = std::fs::read_dir(&self.root)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .map(|e| e.path())
            .collect();
        tags.sort();

        for dir in tags {
            match self.read_meta(&dir) {
                Ok(meta) => entries.push(meta),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "skipping registry entry without readable metadata");
                }
            }
        }
        Ok(entries)
    }

    /// Delete a saved set. Unknown tags are an error.
    pub fn remove(&self, tag: &str) -> Result<()> {
        let dir = self.path_for(tag);
        if !dir.exists() {
            return Err(SkelError::UnknownTag(tag.to_string()));
        }
        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    fn write_meta(&self, dir: &Path, meta: &TemplateMeta) -> Result<()> {
        let path = dir.join(META_FILE);
        let json = serde_json::to_string_pretty(meta).map_err(|e| SkelError::MetaParse {
            path: path.clone(),
            source: e,
        })?;
        std::fs::write(&path, json)?;
        Ok(())
    }

    fn read_meta(&self, dir: &Path) -> Result<TemplateMeta> {
        let path = dir.join(META_FILE);
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents).map_err(|e| SkelError::MetaParse {
            path: path.clone(),
            source: e,
        })
    }
}

/// Registry tags: non-empty `[a-z0-9_-]+`, not shadowing a builtin set.
fn validate_tag(tag: &str) -> Result<()> {
    if tag.is_empty() {
        return Err(SkelError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag must not be empty".into(),
        });
    }
    if !tag
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(SkelError::InvalidTag {
            tag: tag.to_string(),
            reason: "tags may only contain a-z, 0-9, '_' and '-'".into(),
        });
    }
    if embedded::is_builtin(tag) {
        return Err(SkelError::InvalidTag {
            tag: tag.to_string(),
            reason: "tag shadows a builtin template set".into(),
        });
    }
    Ok(())
}

/// Hex sha256 over the set's files: relative path then contents, template
/// files before boilerplate, each list in sorted path order.
pub fn digest_set(set: &TemplateSet) -> String {
    let mut hasher = Sha256::new();
    for file in set.files.iter().chain(set.boilerplate.iter()) {
        hasher.update(file.relative_path.to_string_lossy().as_bytes());
        hasher.update([0]);
        hasher.update(file.contents.as_bytes());
        hasher.update([0]);
    }
    hex::encode(hasher.finalize())
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(|e| SkelError::Other(e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SkelError::Other(e.into()))?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_source(dir: &Path) {
        std::fs::create_dir_all(dir.join("template")).unwrap();
        std::fs::write(dir.join("template/{{.AppName}}.go"), "package main").unwrap();
        std::fs::write(dir.join("template/README.md"), "# {{.AppName}}").unwrap();
        std::fs::create_dir_all(dir.join("boilerplate")).unwrap();
        std::fs::write(dir.join("boilerplate/.gitignore"), "*.exe").unwrap();
        std::fs::write(
            dir.join("project.json"),
            r#"{ "prompts": [ { "name": "AppName", "message": "Name?" } ] }"#,
        )
        .unwrap();
    }

    fn open_registry(root: &Path) -> Registry {
        Registry::open(Some(root.join("registry"))).unwrap()
    }

    #[test]
    fn test_save_list_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        demo_source(&source);
        let registry = open_registry(dir.path());

        let meta = registry.save(&source, "my-cli", false).unwrap();
        assert_eq!(meta.tag, "my-cli");
        assert_eq!(meta.file_count, 3);
        assert_eq!(meta.digest.len(), 64);
        assert!(registry.contains("my-cli"));

        // The saved copy loads as a template set.
        let set = TemplateSet::from_dir("my-cli", &registry.path_for("my-cli")).unwrap();
        assert_eq!(set.file_count(), 3);
        assert_eq!(digest_set(&set), meta.digest);

        let listed = registry.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].tag, "my-cli");

        registry.remove("my-cli").unwrap();
        assert!(!registry.contains("my-cli"));
        assert!(matches!(
            registry.remove("my-cli"),
            Err(SkelError::UnknownTag(_))
        ));
    }

    #[test]
    fn test_save_existing_tag_requires_force() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        demo_source(&source);
        let registry = open_registry(dir.path());

        registry.save(&source, "dup", false).unwrap();
        assert!(matches!(
            registry.save(&source, "dup", false),
            Err(SkelError::TagExists(_))
        ));
        registry.save(&source, "dup", true).unwrap();
    }

    #[test]
    fn test_invalid_tags_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        demo_source(&source);
        let registry = open_registry(dir.path());

        for bad in ["", "Has Caps", "spaced out", "basic_cli_template"] {
            assert!(
                matches!(
                    registry.save(&source, bad, false),
                    Err(SkelError::InvalidTag { .. })
                ),
                "tag {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_save_blocks_on_structural_errors() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        // No template/ directory at all.
        std::fs::create_dir_all(&source).unwrap();
        let registry = open_registry(dir.path());

        assert!(matches!(
            registry.save(&source, "broken", false),
            Err(SkelError::ValidationFailed { .. })
        ));
        assert!(!registry.contains("broken"));
    }
}
