use std::path::PathBuf;

use anyhow::Result;
use dialoguer::Confirm;

use skel_core::registry::Registry;

use crate::output;

/// Delete a saved template set from the registry, confirming first
/// unless `--yes` was given.
pub async fn run(tag: &str, yes: bool, template_dir: Option<PathBuf>) -> Result<()> {
    output::print_header(&format!("skel remove: {tag}"));

    let registry = Registry::open(template_dir)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete saved template '{tag}'?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Aborted.");
            return Ok(());
        }
    }

    registry.remove(tag)?;
    output::print_success(&format!("Removed '{tag}'"));
    Ok(())
}
