//! The two-phase template set renderer: plan, then commit.
//!
//! Rendering a set produces code and documentation, so a silently missing
//! token would generate a broken project with confusing errors far from the
//! cause. The default policy is therefore strict: every token referenced by
//! the set must have a value, and all missing tokens are collected during
//! planning and reported in one error **before any file is written**.
//! Literal pass-through is available behind [`MissingTokenPolicy::Keep`] for
//! callers that explicitly want it.
//!
//! ## Usage
//!
//! ```ignore
//! use skel_core::templates::renderer::{Renderer, RenderOptions};
//!
//! let renderer = Renderer::new(RenderOptions::default());
//! let summary = renderer.render(&set, &values, Path::new("out/ping"))?;
//! ```

use std::path::{Path, PathBuf};

use crate::error::{Result, SkelError};
use crate::templates::set::{FileContents, TemplateSet};
use crate::token;
use crate::values::ValueMap;

/// What to do with a token that has no entry in the value mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTokenPolicy {
    /// Abort during planning with [`SkelError::MissingValues`].
    #[default]
    Error,
    /// Leave the literal placeholder text in the output.
    Keep,
}

/// Renderer configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub policy: MissingTokenPolicy,
    /// Permit rendering into a non-empty directory, overwriting collisions.
    pub force: bool,
}

/// One fully substituted output file, held in memory until commit.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    pub relative_path: PathBuf,
    pub contents: FileContents,
}

/// The result of the plan phase: every output file, nothing written yet.
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub files: Vec<PlannedFile>,
}

/// What a completed render did.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub files_written: usize,
    pub boilerplate_copied: usize,
    pub target: PathBuf,
}

/// Renders template sets. Holds the policy so the plan and commit phases
/// agree on it; the substitution itself is a pure function of (set, values).
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Phase 1: substitute every template file's path and contents in
    /// memory. Files are processed in sorted path order, so the plan (and
    /// therefore the commit) is deterministic. Under the strict policy all
    /// missing tokens across the whole set are collected and reported in
    /// one error, in first-seen order.
    pub fn plan(&self, set: &TemplateSet, values: &ValueMap) -> Result<RenderPlan> {
        let mut planned = Vec::with_capacity(set.files.len());
        let mut missing: Vec<String> = Vec::new();

        for file in &set.files {
            let path_sub = token::substitute(&file.relative_path.to_string_lossy(), values);
            collect_missing(&mut missing, path_sub.missing);

            let contents = match &file.contents {
                FileContents::Text(text) => {
                    let sub = token::substitute(text, values);
                    collect_missing(&mut missing, sub.missing);
                    FileContents::Text(sub.text)
                }
                // Binary contents pass through; only the name is substituted.
                FileContents::Binary(bytes) => FileContents::Binary(bytes.clone()),
            };

            tracing::debug!(
                set = %set.name,
                file = %file.relative_path.display(),
                rendered = %path_sub.text,
                "planned template file"
            );

            planned.push(PlannedFile {
                relative_path: PathBuf::from(path_sub.text),
                contents,
            });
        }

        if self.options.policy == MissingTokenPolicy::Error && !missing.is_empty() {
            return Err(SkelError::MissingValues(missing));
        }

        Ok(RenderPlan { files: planned })
    }

    /// Check and create the target directory. The target must not exist or
    /// must be an empty directory, unless `force` was set.
    pub fn prepare_target(&self, target: &Path) -> Result<()> {
        if target.exists() && !self.options.force {
            let occupied = target.is_file()
                || std::fs::read_dir(target)?.next().is_some();
            if occupied {
                return Err(SkelError::TargetExists(target.to_path_buf()));
            }
        }
        std::fs::create_dir_all(target)?;
        Ok(())
    }

    /// Write one planned file under `target`, creating parent directories.
    pub fn write_planned(&self, target: &Path, file: &PlannedFile) -> Result<()> {
        let dest = target.join(&file.relative_path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, file.contents.as_bytes())?;
        Ok(())
    }

    /// Copy the set's boilerplate files verbatim. Boilerplate paths are not
    /// substituted; on a path collision the rendered file wins.
    pub fn copy_boilerplate(
        &self,
        set: &TemplateSet,
        plan: &RenderPlan,
        target: &Path,
    ) -> Result<usize> {
        let mut copied = 0;
        for file in &set.boilerplate {
            if plan.files.iter().any(|p| p.relative_path == file.relative_path) {
                tracing::warn!(
                    file = %file.relative_path.display(),
                    "boilerplate file shadowed by rendered template file, skipping"
                );
                continue;
            }
            self.write_planned(
                target,
                &PlannedFile {
                    relative_path: file.relative_path.clone(),
                    contents: file.contents.clone(),
                },
            )?;
            copied += 1;
        }
        Ok(copied)
    }

    /// Plan and commit in one call.
    pub fn render(
        &self,
        set: &TemplateSet,
        values: &ValueMap,
        target: &Path,
    ) -> Result<RenderSummary> {
        let plan = self.plan(set, values)?;
        self.prepare_target(target)?;
        for file in &plan.files {
            self.write_planned(target, file)?;
        }
        let boilerplate_copied = self.copy_boilerplate(set, &plan, target)?;
        Ok(RenderSummary {
            files_written: plan.files.len(),
            boilerplate_copied,
            target: target.to_path_buf(),
        })
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

fn collect_missing(into: &mut Vec<String>, found: Vec<String>) {
    for name in found {
        if !into.contains(&name) {
            into.push(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::embedded;
    use crate::templates::set::TemplateFile;

    fn demo_set() -> TemplateSet {
        TemplateSet {
            name: "demo".into(),
            manifest: None,
            files: vec![
                TemplateFile::text("README.md", "# {{.AppName}} by {{.Author}}"),
                TemplateFile::text("{{.AppName}}.go", "const v = \"{{.Version}}\""),
            ],
            boilerplate: vec![TemplateFile::text(".gitignore", "*.exe\n")],
        }
    }

    fn demo_values() -> ValueMap {
        let mut values = ValueMap::new();
        values.set("AppName", "ping");
        values.set("Author", "jdoe");
        values.set("Version", "1.0.0");
        values
    }

    #[test]
    fn test_render_substitutes_filenames_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        let summary = Renderer::default()
            .render(&demo_set(), &demo_values(), &target)
            .unwrap();

        assert_eq!(summary.files_written, 2);
        assert_eq!(summary.boilerplate_copied, 1);
        assert_eq!(
            std::fs::read_to_string(target.join("ping.go")).unwrap(),
            "const v = \"1.0.0\""
        );
        assert_eq!(
            std::fs::read_to_string(target.join("README.md")).unwrap(),
            "# ping by jdoe"
        );
        assert_eq!(
            std::fs::read_to_string(target.join(".gitignore")).unwrap(),
            "*.exe\n"
        );
    }

    #[test]
    fn test_missing_value_fails_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        // Author is deliberately missing.
        let mut values = ValueMap::new();
        values.set("AppName", "ping");
        values.set("Version", "1.0.0");

        let err = Renderer::default()
            .render(&demo_set(), &values, &target)
            .unwrap_err();
        match err {
            SkelError::MissingValues(tokens) => assert_eq!(tokens, vec!["Author"]),
            other => panic!("unexpected error: {other}"),
        }
        // Nothing was written, not even the target directory.
        assert!(!target.exists());
    }

    #[test]
    fn test_keep_policy_leaves_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let renderer = Renderer::new(RenderOptions {
            policy: MissingTokenPolicy::Keep,
            force: false,
        });

        let mut values = ValueMap::new();
        values.set("AppName", "ping");
        values.set("Version", "1.0.0");
        renderer.render(&demo_set(), &values, &target).unwrap();

        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert_eq!(readme, "# ping by {{.Author}}");
    }

    #[test]
    fn test_target_must_be_absent_or_empty() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(&target).unwrap();

        // Empty directory is fine.
        Renderer::default()
            .render(&demo_set(), &demo_values(), &target)
            .unwrap();

        // Now non-empty: hard error without force.
        let err = Renderer::default()
            .render(&demo_set(), &demo_values(), &target)
            .unwrap_err();
        assert!(matches!(err, SkelError::TargetExists(_)));

        // With force it overwrites.
        let renderer = Renderer::new(RenderOptions {
            policy: MissingTokenPolicy::Error,
            force: true,
        });
        renderer
            .render(&demo_set(), &demo_values(), &target)
            .unwrap();
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        let renderer = Renderer::default();

        renderer.render(&demo_set(), &demo_values(), &a).unwrap();
        renderer.render(&demo_set(), &demo_values(), &b).unwrap();

        for rel in ["ping.go", "README.md", ".gitignore"] {
            assert_eq!(
                std::fs::read(a.join(rel)).unwrap(),
                std::fs::read(b.join(rel)).unwrap(),
                "byte mismatch in {rel}"
            );
        }
    }

    #[test]
    fn test_rendering_leaves_source_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let set = demo_set();
        let before = set.files.clone();
        Renderer::default()
            .render(&set, &demo_values(), &dir.path().join("out"))
            .unwrap();
        assert_eq!(set.files, before);
    }

    #[test]
    fn test_boilerplate_shadowed_by_rendered_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let set = TemplateSet {
            name: "clash".into(),
            manifest: None,
            files: vec![TemplateFile::text(".gitignore", "from template\n")],
            boilerplate: vec![TemplateFile::text(".gitignore", "from boilerplate\n")],
        };

        let summary = Renderer::default()
            .render(&set, &ValueMap::new(), &target)
            .unwrap();
        assert_eq!(summary.boilerplate_copied, 0);
        assert_eq!(
            std::fs::read_to_string(target.join(".gitignore")).unwrap(),
            "from template\n"
        );
    }

    #[test]
    fn test_basic_cli_ping_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ping");
        let set = embedded::load("basic_cli_template").unwrap();

        let mut values = ValueMap::new();
        values.set("AppName", "ping");
        values.set("Version", "1.0.0");
        values.set("Description", "pings a host");
        values.set("Author", "jdoe");
        values.set("ModuleName", "example.com/ping");

        Renderer::default().render(&set, &values, &target).unwrap();

        let main_go = std::fs::read_to_string(target.join("ping.go")).unwrap();
        assert!(main_go.contains("appName    = \"ping\""));
        assert!(main_go.contains("appVersion = \"1.0.0\""));
        assert!(!main_go.contains("{{."));

        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert!(readme.contains("go install example.com/ping@latest"));

        assert!(target.join(".gitignore").exists());
        assert!(target.join("go.mod").exists());
    }
}
