//! Template sets and the renderer that turns them into projects.
//!
//! A template set groups the files that must be rendered together to
//! produce one coherent output artifact (a CLI program plus its README,
//! say). Both filenames and contents may contain `{{.Token}}` placeholders;
//! substitution is a single pass of literal replacement — there is no
//! templating language behind the delimiter.
//!
//! The three builtin sets live in the repository's top-level `templates/`
//! directory and are embedded into the binary at compile time via
//! [`include_str!`] in the [`embedded`] module. User sets are directories
//! loaded at runtime with [`set::TemplateSet::from_dir`].

pub mod embedded;
pub mod renderer;
pub mod set;
