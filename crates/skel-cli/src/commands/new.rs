use std::path::Path;

use anyhow::Result;

use skel_core::manifest::MANIFEST_FILE;
use skel_core::templates::embedded;
use skel_core::templates::set::{TemplateFile, BOILERPLATE_DIR, TEMPLATE_DIR};

use crate::output;
use crate::PresetChoice;

/// Author a new template set from a builtin preset.
///
/// This is authoring, not rendering: the preset's files are copied with
/// their `{{.Token}}` placeholders intact, giving the author a working
/// starting point to edit. The manifest is copied too so the prompt list
/// stays in sync with the copied files.
pub async fn run(name: &str, preset: &PresetChoice, output_dir: &Path) -> Result<()> {
    output::print_header(&format!("skel new: {name}"));

    let set_dir = output_dir.join(name);
    if set_dir.exists() {
        anyhow::bail!("directory already exists: {}", set_dir.display());
    }

    let preset_set = embedded::load(preset.set_name())?;
    output::print_key_value("Preset", preset.set_name());

    output::print_step(1, 3, "Copying template files (tokens intact)");
    write_files(&set_dir.join(TEMPLATE_DIR), &preset_set.files)?;

    output::print_step(2, 3, "Copying boilerplate files");
    write_files(&set_dir.join(BOILERPLATE_DIR), &preset_set.boilerplate)?;

    output::print_step(3, 3, "Writing prompt manifest");
    if let Some(manifest) = &preset_set.manifest {
        let json = serde_json::to_string_pretty(manifest)?;
        std::fs::write(set_dir.join(MANIFEST_FILE), json + "\n")?;
    }

    output::print_success(&format!(
        "Template set '{name}' created from {}",
        preset.set_name()
    ));
    println!();
    println!("  Next steps:");
    println!("    edit {}/{TEMPLATE_DIR}/", set_dir.display());
    println!("    skel check {}", set_dir.display());
    println!("    skel save {} {name}", set_dir.display());
    println!();

    Ok(())
}

fn write_files(root: &Path, files: &[TemplateFile]) -> Result<()> {
    for file in files {
        let dest = root.join(&file.relative_path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, file.contents.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_copies_preset_with_tokens_intact() {
        let dir = tempfile::tempdir().unwrap();
        run("my_cli", &PresetChoice::BasicCli, dir.path())
            .await
            .unwrap();

        let set_dir = dir.path().join("my_cli");
        let main = std::fs::read_to_string(set_dir.join("template/{{.AppName}}.go")).unwrap();
        assert!(main.contains("{{.AppName}}"));
        assert!(set_dir.join("project.json").exists());
        assert!(set_dir.join("boilerplate/.gitignore").exists());

        // The authored copy round-trips through the set loader.
        let set =
            skel_core::templates::set::TemplateSet::from_dir("my_cli", &set_dir).unwrap();
        assert_eq!(set.files.len(), 3);
    }

    #[tokio::test]
    async fn test_new_refuses_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("taken")).unwrap();
        assert!(run("taken", &PresetChoice::Library, dir.path())
            .await
            .is_err());
    }
}
