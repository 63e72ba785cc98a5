//! Structural validation for template set directories (`skel check`).
//!
//! Produces a list of diagnostics rather than failing on the first problem,
//! so an author sees everything at once. Errors make the set unusable
//! (missing `template/`, broken manifest, unbalanced delimiters); warnings
//! flag the latent hazards of the format — above all a token that no prompt
//! covers, which would silently leave literal placeholder text in a
//! non-interactive render.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::manifest::{Manifest, MANIFEST_FILE};
use crate::templates::set::{BOILERPLATE_DIR, TEMPLATE_DIR};
use crate::token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Accumulated findings for one template set directory.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn error(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
        });
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message: message.into(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            severity: Severity::Info,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Format a fixed-width summary block.
    pub fn render_report(&self, label: &str) -> String {
        let verdict = if self.error_count() > 0 {
            "FAIL"
        } else if self.warning_count() > 0 {
            "PASS (with warnings)"
        } else {
            "PASS"
        };
        format!(
            r#"
Template Check: {label}
============================================

Errors                  {:<10}
Warnings                {:<10}
Info                    {:<10}

Result: {verdict}
"#,
            self.error_count(),
            self.warning_count(),
            self.info_count(),
        )
    }
}

/// Run every structural check against a template set directory.
pub fn check_dir(dir: &Path) -> Diagnostics {
    let mut diags = Diagnostics::default();

    // Manifest first: a broken project.json is worth reporting even when
    // template/ is missing too.
    let manifest = check_manifest(dir, &mut diags);

    let template_dir = dir.join(TEMPLATE_DIR);
    if !template_dir.is_dir() {
        diags.error(format!("missing {TEMPLATE_DIR}/ directory"));
        return diags;
    }

    let mut scan = scan_template_files(&template_dir, &mut diags);
    check_boilerplate(&dir.join(BOILERPLATE_DIR), &mut diags, &mut scan);
    check_prompt_coverage(manifest.as_ref(), &scan, &mut diags);
    check_best_practices(&scan, &mut diags);

    diags.info(format!(
        "{} template file(s), {} boilerplate file(s)",
        scan.template_files, scan.boilerplate_files_seen
    ));

    diags
}

/// What the file walk learned, feeding the cross-file checks.
#[derive(Default)]
struct ScanFindings {
    template_files: usize,
    boilerplate_files_seen: usize,
    tokens: Vec<String>,
    has_readme: bool,
    has_gitignore: bool,
    has_go_source: bool,
    has_go_mod: bool,
}

fn check_manifest(dir: &Path, diags: &mut Diagnostics) -> Option<Manifest> {
    let path = dir.join(MANIFEST_FILE);
    if !path.is_file() {
        diags.warning(format!(
            "no {MANIFEST_FILE} — the set renders, but nothing is prompted and no defaults exist"
        ));
        return None;
    }
    match Manifest::load(&path) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            diags.error(format!("{e}"));
            None
        }
    }
}

fn scan_template_files(template_dir: &Path, diags: &mut Diagnostics) -> ScanFindings {
    let mut findings = ScanFindings::default();

    for entry in WalkDir::new(template_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                diags.error(format!("unreadable entry under {TEMPLATE_DIR}/: {e}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        findings.template_files += 1;

        let relative = entry
            .path()
            .strip_prefix(template_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        match file_name.as_str() {
            "README.md" => findings.has_readme = true,
            ".gitignore" => findings.has_gitignore = true,
            "go.mod" => findings.has_go_mod = true,
            _ => {}
        }
        if file_name.ends_with(".go") {
            findings.has_go_source = true;
        }

        // Filenames are templates too.
        record_tokens(&relative, &mut findings.tokens);

        let bytes = match std::fs::read(entry.path()) {
            Ok(bytes) => bytes,
            Err(e) => {
                diags.error(format!("unreadable file {TEMPLATE_DIR}/{relative}: {e}"));
                continue;
            }
        };
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                diags.warning(format!(
                    "{TEMPLATE_DIR}/{relative} is not UTF-8; contents will be copied without substitution"
                ));
                continue;
            }
        };

        if text.matches("{{").count() != text.matches("}}").count() {
            diags.error(format!(
                "{TEMPLATE_DIR}/{relative} has unbalanced {{{{ / }}}} delimiters"
            ));
        }
        if token::suspicious(&text) {
            diags.warning(format!(
                "{TEMPLATE_DIR}/{relative} contains '{{{{.' text that never forms a valid token"
            ));
        }

        let file_tokens = token::distinct_tokens(&text);
        if file_tokens.is_empty() && !relative.contains("{{.") {
            diags.info(format!("{TEMPLATE_DIR}/{relative}: no tokens"));
        } else {
            let mut all = token::distinct_tokens(&relative);
            for name in file_tokens {
                if !all.contains(&name) {
                    all.push(name);
                }
            }
            diags.info(format!(
                "{TEMPLATE_DIR}/{relative}: tokens {}",
                all.join(", ")
            ));
        }
        record_tokens(&text, &mut findings.tokens);
    }

    if findings.template_files == 0 {
        diags.warning(format!("{TEMPLATE_DIR}/ is empty — rendering produces no files"));
    }

    findings
}

fn check_boilerplate(boilerplate_dir: &Path, diags: &mut Diagnostics, scan: &mut ScanFindings) {
    if !boilerplate_dir.is_dir() {
        return;
    }
    for entry in WalkDir::new(boilerplate_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                diags.error(format!("unreadable entry under {BOILERPLATE_DIR}/: {e}"));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        scan.boilerplate_files_seen += 1;
        if entry.file_name().to_string_lossy() == ".gitignore" {
            scan.has_gitignore = true;
        }
        let relative = entry
            .path()
            .strip_prefix(boilerplate_dir)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .into_owned();

        if let Ok(text) = std::fs::read_to_string(entry.path()) {
            if !token::distinct_tokens(&text).is_empty() {
                diags.warning(format!(
                    "{BOILERPLATE_DIR}/{relative} contains tokens but is copied verbatim"
                ));
            }
        }
    }
}

fn check_prompt_coverage(
    manifest: Option<&Manifest>,
    scan: &ScanFindings,
    diags: &mut Diagnostics,
) {
    let Some(manifest) = manifest else { return };

    let prompts: BTreeSet<&str> = manifest.prompt_names().into_iter().collect();
    for name in &scan.tokens {
        if !prompts.contains(name.as_str()) {
            diags.warning(format!(
                "token {name} has no prompt — it will go unrendered in a non-interactive run"
            ));
        }
    }
    for name in prompts {
        if !scan.tokens.iter().any(|t| t == name) {
            diags.warning(format!("prompt {name} is not used by any template file"));
        }
    }
}

fn check_best_practices(scan: &ScanFindings, diags: &mut Diagnostics) {
    if scan.template_files > 0 && !scan.has_readme {
        diags.warning("no README.md template — generated projects will have no documentation");
    }
    if scan.template_files > 0 && !scan.has_gitignore {
        diags.warning("no .gitignore in template/ or boilerplate/");
    }
    if scan.has_go_source && !scan.has_go_mod {
        diags.warning("set contains .go files but no go.mod template");
    }
}

fn record_tokens(text: &str, into: &mut Vec<String>) {
    for name in token::distinct_tokens(text) {
        if !into.contains(&name) {
            into.push(name);
        }
    }
}
