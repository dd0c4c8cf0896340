//! Source roots: which component a filesystem path belongs to.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::core::{ComponentKind, Identity};
use crate::utils::path::relative_slash;

/// One tracked source directory.
#[derive(Debug, Clone)]
struct SourceRoot {
    kind: ComponentKind,
    dir: PathBuf,
}

/// Ordered set of source roots; the first root containing a path wins.
#[derive(Debug, Clone, Default)]
pub struct SourceRoots {
    roots: Vec<SourceRoot>,
}

impl SourceRoots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots in component order (content, layouts, data, i18n, static, assets).
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut roots = Self::new();
        for kind in ComponentKind::ALL {
            roots.push(kind, config.source_dir(kind));
        }
        roots
    }

    pub fn push(&mut self, kind: ComponentKind, dir: impl Into<PathBuf>) -> &mut Self {
        self.roots.push(SourceRoot {
            kind,
            dir: dir.into(),
        });
        self
    }

    /// Identity of `path`, or `None` when it lies outside every root.
    pub fn classify(&self, path: &Path) -> Option<Identity> {
        self.make_path_relative(path)
            .map(|(kind, rel)| Identity::new(kind, &rel))
    }

    /// Component and root-relative slash path of `path`.
    pub fn make_path_relative(&self, path: &Path) -> Option<(ComponentKind, String)> {
        self.roots.iter().find_map(|root| {
            relative_slash(path, &root.dir).map(|rel| (root.kind, rel))
        })
    }

    /// Directory of the first root of `kind`.
    pub fn dir(&self, kind: ComponentKind) -> Option<&Path> {
        self.roots
            .iter()
            .find(|root| root.kind == kind)
            .map(|root| root.dir.as_path())
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
