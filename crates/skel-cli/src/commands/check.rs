use std::path::Path;

use anyhow::Result;

use skel_core::validate::{self, Severity};

use crate::output;

/// Run structural validation on a template set directory and print the
/// findings. Exits non-zero on errors, and on warnings with `--strict`.
pub async fn run(dir: &Path, strict: bool) -> Result<()> {
    output::print_header(&format!("skel check: {}", dir.display()));

    let diagnostics = validate::check_dir(dir);
    for entry in diagnostics.entries() {
        match entry.severity {
            Severity::Error => output::print_error(&entry.message),
            Severity::Warning => output::print_warning(&entry.message),
            Severity::Info => output::print_info(&entry.message),
        }
    }
    println!("{}", diagnostics.render_report(&dir.display().to_string()));

    if diagnostics.error_count() > 0 {
        anyhow::bail!("{} error(s) found", diagnostics.error_count());
    }
    if strict && diagnostics.warning_count() > 0 {
        anyhow::bail!(
            "{} warning(s) found (strict mode)",
            diagnostics.warning_count()
        );
    }
    Ok(())
}
