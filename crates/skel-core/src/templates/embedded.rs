//! Compile-time embedded builtin template sets.
//!
//! Each constant loads an asset from the top-level `templates/` directory via
//! [`include_str!`]. The paths are relative to this source file
//! (`crates/skel-core/src/templates/embedded.rs`).
//!
//! ## Adding a new builtin set
//!
//! 1. Create the set directory under `templates/` (`template/`, optional
//!    `boilerplate/` and `project.json`)
//! 2. Add `include_str!` constants here and wire them into [`load`]
//! 3. Add the set name to [`BUILTIN_NAMES`]
//!
//! ## Warning
//!
//! Do NOT rename or move files under `templates/` without updating the
//! `include_str!` paths here. Do NOT edit a builtin's `project.json` without
//! checking that its prompts still cover every token the files reference
//! (`skel check` on the source directory will tell you).

use std::path::PathBuf;

use crate::error::{Result, SkelError};
use crate::manifest::Manifest;
use crate::templates::set::{TemplateFile, TemplateSet};

/// Names of the builtin template sets, in listing order.
pub const BUILTIN_NAMES: [&str; 3] = [
    "basic_cli_template",
    "library_template",
    "web_service_template",
];

// -------------------------------------------------------
// basic_cli_template — flag-parsing CLI starter
// -------------------------------------------------------

const BASIC_CLI_MAIN: &str =
    include_str!("../../../../templates/basic_cli_template/template/{{.AppName}}.go");
const BASIC_CLI_GO_MOD: &str =
    include_str!("../../../../templates/basic_cli_template/template/go.mod");
const BASIC_CLI_README: &str =
    include_str!("../../../../templates/basic_cli_template/template/README.md");
const BASIC_CLI_GITIGNORE: &str =
    include_str!("../../../../templates/basic_cli_template/boilerplate/.gitignore");
const BASIC_CLI_MANIFEST: &str =
    include_str!("../../../../templates/basic_cli_template/project.json");

// -------------------------------------------------------
// library_template — options-pattern library starter
// -------------------------------------------------------

const LIBRARY_MAIN: &str =
    include_str!("../../../../templates/library_template/template/{{.LibName}}.go");
const LIBRARY_TEST: &str =
    include_str!("../../../../templates/library_template/template/{{.LibName}}_test.go");
const LIBRARY_GO_MOD: &str =
    include_str!("../../../../templates/library_template/template/go.mod");
const LIBRARY_README: &str =
    include_str!("../../../../templates/library_template/template/README.md");
const LIBRARY_GITIGNORE: &str =
    include_str!("../../../../templates/library_template/boilerplate/.gitignore");
const LIBRARY_MANIFEST: &str =
    include_str!("../../../../templates/library_template/project.json");

// -------------------------------------------------------
// web_service_template — HTTP service starter
// -------------------------------------------------------

const WEB_SERVICE_MAIN: &str = include_str!(
    "../../../../templates/web_service_template/template/cmd/{{.ServiceName}}/main.go"
);
const WEB_SERVICE_SERVER: &str =
    include_str!("../../../../templates/web_service_template/template/internal/server/server.go");
const WEB_SERVICE_GO_MOD: &str =
    include_str!("../../../../templates/web_service_template/template/go.mod");
const WEB_SERVICE_README: &str =
    include_str!("../../../../templates/web_service_template/template/README.md");
const WEB_SERVICE_GITIGNORE: &str =
    include_str!("../../../../templates/web_service_template/boilerplate/.gitignore");
const WEB_SERVICE_MANIFEST: &str =
    include_str!("../../../../templates/web_service_template/project.json");

/// True if `name` names a builtin set.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_NAMES.contains(&name)
}

/// Construct a builtin template set in memory.
pub fn load(name: &str) -> Result<TemplateSet> {
    let (manifest_json, files, boilerplate) = match name {
        "basic_cli_template" => (
            BASIC_CLI_MANIFEST,
            vec![
                TemplateFile::text("README.md", BASIC_CLI_README),
                TemplateFile::text("go.mod", BASIC_CLI_GO_MOD),
                TemplateFile::text("{{.AppName}}.go", BASIC_CLI_MAIN),
            ],
            vec![TemplateFile::text(".gitignore", BASIC_CLI_GITIGNORE)],
        ),
        "library_template" => (
            LIBRARY_MANIFEST,
            vec![
                TemplateFile::text("README.md", LIBRARY_README),
                TemplateFile::text("go.mod", LIBRARY_GO_MOD),
                TemplateFile::text("{{.LibName}}.go", LIBRARY_MAIN),
                TemplateFile::text("{{.LibName}}_test.go", LIBRARY_TEST),
            ],
            vec![TemplateFile::text(".gitignore", LIBRARY_GITIGNORE)],
        ),
        "web_service_template" => (
            WEB_SERVICE_MANIFEST,
            vec![
                TemplateFile::text("README.md", WEB_SERVICE_README),
                TemplateFile::text("cmd/{{.ServiceName}}/main.go", WEB_SERVICE_MAIN),
                TemplateFile::text("go.mod", WEB_SERVICE_GO_MOD),
                TemplateFile::text("internal/server/server.go", WEB_SERVICE_SERVER),
            ],
            vec![TemplateFile::text(".gitignore", WEB_SERVICE_GITIGNORE)],
        ),
        _ => {
            return Err(SkelError::TemplateNotFound {
                spec: name.to_string(),
                available: BUILTIN_NAMES.iter().map(|n| n.to_string()).collect(),
            })
        }
    };

    let manifest_path = PathBuf::from(format!("<builtin:{name}>/project.json"));
    let manifest = Manifest::parse(manifest_json, &manifest_path)?;

    Ok(TemplateSet {
        name: name.to_string(),
        manifest: Some(manifest),
        files,
        boilerplate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_loads() {
        for name in BUILTIN_NAMES {
            let set = load(name).unwrap();
            assert_eq!(set.name, name);
            assert!(!set.files.is_empty());
            assert!(set.manifest.is_some());
        }
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(matches!(
            load("nope"),
            Err(SkelError::TemplateNotFound { .. })
        ));
    }

    #[test]
    fn test_prompts_cover_required_tokens() {
        // A token without a prompt would silently go unrendered in
        // interactive use; the builtin manifests must stay complete.
        for name in BUILTIN_NAMES {
            let set = load(name).unwrap();
            let manifest = set.manifest.as_ref().unwrap();
            for token in set.required_tokens() {
                assert!(
                    manifest.prompt_for(&token).is_some(),
                    "{name}: token {token} has no prompt"
                );
            }
        }
    }

    #[test]
    fn test_basic_cli_vocabulary() {
        let set = load("basic_cli_template").unwrap();
        let tokens = set.required_tokens();
        for expected in ["AppName", "ModuleName", "Version", "Description", "Author"] {
            assert!(tokens.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_web_service_vocabulary() {
        let set = load("web_service_template").unwrap();
        let tokens = set.required_tokens();
        for expected in ["ServiceName", "ModuleName", "Port", "Description", "EnableTLS"] {
            assert!(tokens.contains(&expected.to_string()), "missing {expected}");
        }
    }
}
