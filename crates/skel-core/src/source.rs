//! Template sources: the seam between a template identifier on the CLI and
//! a loaded [`TemplateSet`].
//!
//! `skel use <spec>` resolves `spec` through a fixed chain: an existing
//! filesystem path first, then a registry tag, then a builtin set name.
//! Each link is a [`TemplateSource`] implementation, so listing commands
//! and resolution share one interface.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{Result, SkelError};
use crate::registry::Registry;
use crate::templates::embedded;
use crate::templates::set::{TemplateSet, TEMPLATE_DIR};

/// One place template sets can come from.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Short identifier for logs and listings: "dir", "registry", "builtin".
    fn kind(&self) -> &'static str;

    /// Whether this source can resolve the given spec.
    fn contains(&self, spec: &str) -> bool;

    /// Load the set. Callers check [`contains`](Self::contains) first;
    /// loading a spec this source does not contain is an error.
    async fn load(&self, spec: &str) -> Result<TemplateSet>;

    /// Enumerable specs this source offers (empty for path-based sources).
    fn available(&self) -> Vec<String>;
}

/// An explicit filesystem path to a template set directory.
pub struct DirSource;

#[async_trait]
impl TemplateSource for DirSource {
    fn kind(&self) -> &'static str {
        "dir"
    }

    fn contains(&self, spec: &str) -> bool {
        Path::new(spec).join(TEMPLATE_DIR).is_dir()
    }

    async fn load(&self, spec: &str) -> Result<TemplateSet> {
        let path = Path::new(spec);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| spec.to_string());
        TemplateSet::from_dir(&name, path)
    }

    fn available(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Saved sets in the local registry, addressed by tag.
pub struct RegistrySource {
    registry: Registry,
}

impl RegistrySource {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl TemplateSource for RegistrySource {
    fn kind(&self) -> &'static str {
        "registry"
    }

    fn contains(&self, spec: &str) -> bool {
        self.registry.contains(spec)
    }

    async fn load(&self, spec: &str) -> Result<TemplateSet> {
        TemplateSet::from_dir(spec, &self.registry.path_for(spec))
    }

    fn available(&self) -> Vec<String> {
        self.registry
            .list()
            .map(|metas| metas.into_iter().map(|m| m.tag).collect())
            .unwrap_or_default()
    }
}

/// The compile-time embedded builtin sets.
pub struct BuiltinSource;

#[async_trait]
impl TemplateSource for BuiltinSource {
    fn kind(&self) -> &'static str {
        "builtin"
    }

    fn contains(&self, spec: &str) -> bool {
        embedded::is_builtin(spec)
    }

    async fn load(&self, spec: &str) -> Result<TemplateSet> {
        embedded::load(spec)
    }

    fn available(&self) -> Vec<String> {
        embedded::BUILTIN_NAMES.iter().map(|n| n.to_string()).collect()
    }
}

/// The resolution chain used by `skel use` and `skel tokens`:
/// path, then registry tag, then builtin name.
pub fn source_chain(registry: &Registry) -> Vec<Box<dyn TemplateSource>> {
    vec![
        Box::new(DirSource),
        Box::new(RegistrySource::new(registry.clone())),
        Box::new(BuiltinSource),
    ]
}

/// Resolve a template spec through the chain.
pub async fn resolve(spec: &str, registry: &Registry) -> Result<TemplateSet> {
    let sources = source_chain(registry);
    for source in &sources {
        if source.contains(spec) {
            tracing::debug!(kind = source.kind(), spec, "resolved template spec");
            return source.load(spec).await;
        }
    }

    let mut available = Vec::new();
    for source in &sources {
        available.extend(source.available());
    }
    Err(SkelError::TemplateNotFound {
        spec: spec.to_string(),
        available,
    })
}
