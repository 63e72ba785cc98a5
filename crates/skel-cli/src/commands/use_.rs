use std::path::{Path, PathBuf};

use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use skel_core::registry::Registry;
use skel_core::source;
use skel_core::templates::renderer::{MissingTokenPolicy, RenderOptions, Renderer};
use skel_core::templates::set::TemplateSet;
use skel_core::toolchain;
use skel_core::values::{parse_assignment, ValueMap};

use crate::output;

/// Behavior flags for `skel use`.
pub struct UseFlags {
    pub defaults: bool,
    pub no_input: bool,
    pub keep_missing: bool,
    pub force: bool,
}

/// Render a template set into a target directory.
///
/// The value mapping is assembled in layers, later layers winning:
/// manifest defaults (with `--defaults`), a `--values` file, `--set` flags,
/// then interactive answers. With `--no-input` nothing is prompted and any
/// still-missing token fails the render before a single file is written.
pub async fn run(
    template_spec: &str,
    target: &Path,
    assignments: &[String],
    values_file: Option<&Path>,
    flags: UseFlags,
    template_dir: Option<PathBuf>,
) -> Result<()> {
    output::print_header(&format!("skel use: {template_spec}"));

    let registry = Registry::open(template_dir)?;
    let set = source::resolve(template_spec, &registry).await?;
    output::print_key_value("Template", &set.name);
    output::print_key_value("Target", &target.display().to_string());

    let mut values = assemble_values(&set, assignments, values_file, &flags)?;
    if !flags.no_input {
        prompt_for_missing(&set, &mut values)?;
    }

    let renderer = Renderer::new(RenderOptions {
        policy: if flags.keep_missing {
            MissingTokenPolicy::Keep
        } else {
            MissingTokenPolicy::Error
        },
        force: flags.force,
    });

    // Plan before touching the target, so a missing value leaves nothing behind.
    let plan = renderer.plan(&set, &values)?;
    renderer.prepare_target(target)?;

    let bar = ProgressBar::new(plan.files.len() as u64);
    bar.set_style(ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")?);
    for file in &plan.files {
        bar.set_message(file.relative_path.display().to_string());
        renderer.write_planned(target, file)?;
        bar.inc(1);
    }
    bar.finish_and_clear();
    let boilerplate_copied = renderer.copy_boilerplate(&set, &plan, target)?;

    output::print_success(&format!(
        "Rendered {} file(s) ({} boilerplate) into {}",
        plan.files.len(),
        boilerplate_copied,
        target.display()
    ));

    if plan
        .files
        .iter()
        .any(|f| f.relative_path.extension().is_some_and(|e| e == "go"))
    {
        print_go_hint();
    }

    Ok(())
}

fn assemble_values(
    set: &TemplateSet,
    assignments: &[String],
    values_file: Option<&Path>,
    flags: &UseFlags,
) -> Result<ValueMap> {
    let mut values = ValueMap::new();

    if flags.defaults {
        if let Some(manifest) = &set.manifest {
            values.merge(manifest.defaults());
        }
    }
    if let Some(path) = values_file {
        values.merge(ValueMap::from_file(path)?);
    }
    for assignment in assignments {
        let (token, value) = parse_assignment(assignment)?;
        values.set(token, value);
    }

    Ok(values)
}

/// Ask for every required token the layered mapping does not cover yet.
/// Tokens with a manifest prompt are asked in manifest order with their
/// message and default; tokens without one get a generic question.
fn prompt_for_missing(set: &TemplateSet, values: &mut ValueMap) -> Result<()> {
    let required = set.required_tokens();

    if let Some(manifest) = &set.manifest {
        for prompt in &manifest.prompts {
            if !required.contains(&prompt.name) || values.contains(&prompt.name) {
                continue;
            }
            let mut input = Input::<String>::new()
                .with_prompt(prompt.message.clone())
                .allow_empty(true);
            if let Some(default) = &prompt.default {
                input = input.default(default.clone());
            }
            values.set(prompt.name.clone(), input.interact_text()?);
        }
    }

    for token in required {
        if values.contains(&token) {
            continue;
        }
        let answer: String = Input::new()
            .with_prompt(format!("Value for {token}"))
            .allow_empty(true)
            .interact_text()?;
        values.set(token, answer);
    }

    Ok(())
}

fn print_go_hint() {
    let report = toolchain::check_go();
    if !report.found {
        output::print_warning(
            "no Go toolchain on PATH — install Go to build the generated project",
        );
        return;
    }
    match report.version {
        Some(version) if report.below_minimum => {
            output::print_warning(&format!(
                "Go {version} found, but the generated go.mod declares {}",
                toolchain::GO_MINIMUM
            ));
        }
        Some(version) => {
            output::print_key_value("Go toolchain", &version.to_string());
        }
        None => {
            output::print_key_value("Go toolchain", "found (version unknown)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_no_input() -> UseFlags {
        UseFlags {
            defaults: false,
            no_input: true,
            keep_missing: false,
            force: false,
        }
    }

    #[tokio::test]
    async fn test_use_builtin_with_set_flags() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ping");
        let assignments: Vec<String> = [
            "AppName=ping",
            "Version=1.0.0",
            "Description=pings a host",
            "Author=jdoe",
            "ModuleName=example.com/ping",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        run(
            "basic_cli_template",
            &target,
            &assignments,
            None,
            flags_no_input(),
            Some(dir.path().join("registry")),
        )
        .await
        .unwrap();

        let main = std::fs::read_to_string(target.join("ping.go")).unwrap();
        assert!(main.contains("appName    = \"ping\""));
        let readme = std::fs::read_to_string(target.join("README.md")).unwrap();
        assert!(readme.contains("go install example.com/ping@latest"));
    }

    #[tokio::test]
    async fn test_use_no_input_fails_fast_on_missing_token() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("ping");
        // Author is deliberately missing.
        let assignments: Vec<String> = [
            "AppName=ping",
            "Version=1.0.0",
            "Description=pings a host",
            "ModuleName=example.com/ping",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let err = run(
            "basic_cli_template",
            &target,
            &assignments,
            None,
            flags_no_input(),
            Some(dir.path().join("registry")),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Author"));
        assert!(!target.exists());
    }

    #[tokio::test]
    async fn test_use_defaults_fill_missing_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        run(
            "basic_cli_template",
            &target,
            &[],
            None,
            UseFlags {
                defaults: true,
                no_input: true,
                keep_missing: false,
                force: false,
            },
            Some(dir.path().join("registry")),
        )
        .await
        .unwrap();

        // The builtin manifest's defaults name the app "mycli".
        assert!(target.join("mycli.go").exists());
    }
}
