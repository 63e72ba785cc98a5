use std::path::PathBuf;

use anyhow::Result;

use skel_core::registry::Registry;
use skel_core::source;

use crate::output;

/// Print a template set's token vocabulary: every distinct token in
/// first-seen order, which files reference it, and whether the manifest
/// has a prompt for it.
pub async fn run(template_spec: &str, template_dir: Option<PathBuf>) -> Result<()> {
    output::print_header(&format!("skel tokens: {template_spec}"));

    let registry = Registry::open(template_dir)?;
    let set = source::resolve(template_spec, &registry).await?;

    let required = set.required_tokens();
    if required.is_empty() {
        println!("  (no tokens — the set renders as a verbatim copy)");
        return Ok(());
    }

    for token in &required {
        let users: Vec<String> = set
            .files
            .iter()
            .filter(|f| f.tokens().contains(token))
            .map(|f| f.relative_path.display().to_string())
            .collect();
        let coverage = match set.manifest.as_ref().and_then(|m| m.prompt_for(token)) {
            Some(prompt) => match &prompt.default {
                Some(default) => format!("prompt, default \"{default}\""),
                None => "prompt, no default".to_string(),
            },
            None => "NO PROMPT".to_string(),
        };
        output::print_key_value(token, &format!("{} [{coverage}]", users.join(", ")));
    }

    println!();
    output::print_key_value("Tokens", &required.len().to_string());
    output::print_key_value(
        "Files",
        &format!(
            "{} template, {} boilerplate",
            set.files.len(),
            set.boilerplate.len()
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokens_for_builtin() {
        let dir = tempfile::tempdir().unwrap();
        run("basic_cli_template", Some(dir.path().join("registry")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_tokens_unknown_template_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = run("no_such_set", Some(dir.path().join("registry"))).await;
        assert!(result.is_err());
    }
}
