//! Collaborators the build core drives but does not implement.

use std::any::Any;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use super::Sites;

/// Turns source files into content nodes.
pub trait ContentCollector: Send + Sync {
    /// Reprocess exactly `paths` into the sites' content trees, or every
    /// source when `paths` is empty.
    fn collect(&self, sites: &Sites, paths: &[PathBuf]) -> anyhow::Result<()>;
}

/// A compiled, executable template.
pub trait Template: Send + Sync {
    fn name(&self) -> &str;
}

/// Template layer of one site.
pub trait TemplateEngine: Send + Sync {
    /// Compile or re-link all templates. `prototype` is the already
    /// compiled engine of the first site, when there is one.
    fn compile(&self, prototype: Option<&dyn TemplateEngine>) -> anyhow::Result<()>;

    /// Whether a layout (layouts-relative slash path) is known.
    fn has_template(&self, path: &str) -> bool;

    fn lookup(&self, name: &str) -> Option<Arc<dyn Template>>;

    fn execute(&self, template: &dyn Template, out: &mut dyn Write, data: &Value)
    -> anyhow::Result<()>;

    /// Concrete engine, for prototypes of the same type.
    fn as_any(&self) -> &dyn Any;
}

/// Process-wide cache of processed resources.
pub trait ResourceCache: Send + Sync {
    /// Drop every entry whose key matches; returns how many were dropped.
    fn evict_matches(&self, matches: &dyn Fn(&str) -> bool) -> usize;
}

/// Cache of loaded data files.
pub trait DataCache: Send + Sync {
    fn reset(&self);
}

/// Everything a [`Sites`] needs from the outside.
pub struct Collaborators {
    pub collector: Arc<dyn ContentCollector>,
    pub resources: Arc<dyn ResourceCache>,
    pub data: Arc<dyn DataCache>,
    /// Template engine for a language code.
    pub templates: Box<dyn Fn(&str) -> Arc<dyn TemplateEngine>>,
}
