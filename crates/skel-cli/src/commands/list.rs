use std::path::PathBuf;

use anyhow::Result;

use skel_core::registry::Registry;
use skel_core::templates::embedded;

use crate::output;

/// List the builtin template sets and the registry's saved sets.
pub async fn run(template_dir: Option<PathBuf>) -> Result<()> {
    output::print_header("Builtin templates");
    for name in embedded::BUILTIN_NAMES {
        let set = embedded::load(name)?;
        output::print_list_item(&format!(
            "{name} ({} files, tokens: {})",
            set.file_count(),
            set.required_tokens().join(", ")
        ));
    }

    let registry = Registry::open(template_dir)?;
    output::print_header("Saved templates");
    output::print_key_value("Registry", &registry.root().display().to_string());

    let saved = registry.list()?;
    if saved.is_empty() {
        println!("  (none — save one with `skel save <dir> <tag>`)");
        return Ok(());
    }
    for meta in saved {
        output::print_list_item(&format!(
            "{} ({} files, digest {})",
            meta.tag,
            meta.file_count,
            &meta.digest[..12]
        ));
    }

    Ok(())
}
