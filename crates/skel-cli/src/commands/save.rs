use std::path::{Path, PathBuf};

use anyhow::Result;

use skel_core::registry::Registry;
use skel_core::validate;

use crate::output;

/// Validate a template set directory and save it into the registry.
///
/// Structural errors block the save; warnings are shown but do not.
pub async fn run(dir: &Path, tag: &str, force: bool, template_dir: Option<PathBuf>) -> Result<()> {
    output::print_header(&format!("skel save: {tag}"));
    output::print_key_value("Source", &dir.display().to_string());

    output::print_step(1, 2, "Validating template set");
    let diagnostics = validate::check_dir(dir);
    for entry in diagnostics.entries() {
        match entry.severity {
            validate::Severity::Error => output::print_error(&entry.message),
            validate::Severity::Warning => output::print_warning(&entry.message),
            validate::Severity::Info => {}
        }
    }
    if diagnostics.error_count() > 0 {
        anyhow::bail!(
            "not saved: {} structural error(s) in {}",
            diagnostics.error_count(),
            dir.display()
        );
    }

    output::print_step(2, 2, "Copying into registry");
    let registry = Registry::open(template_dir)?;
    let meta = registry.save(dir, tag, force)?;

    output::print_success(&format!("Saved as '{tag}'"));
    output::print_key_value("Files", &meta.file_count.to_string());
    output::print_key_value("Digest", &meta.digest[..12]);
    output::print_key_value("Location", &registry.path_for(tag).display().to_string());

    Ok(())
}
