//! Core library for the skel scaffolding tool.
//!
//! Provides the template set model and the single-pass `{{.Token}}`
//! substitution renderer, along with shared infrastructure: the prompt
//! manifest, layered value mappings, the local template registry, the
//! [`source::TemplateSource`] resolution chain, structural validation,
//! and Go toolchain detection for the builtin starter sets.
//!
//! The CLI binary lives in the `skel` crate; this crate has no terminal
//! or prompt dependencies and is usable as a plain library.

pub mod error;
pub mod manifest;
pub mod registry;
pub mod source;
pub mod templates;
pub mod token;
pub mod toolchain;
pub mod validate;
pub mod values;
