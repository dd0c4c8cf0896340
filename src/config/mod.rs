//! Site configuration management for `weft.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! ├── types/         # ConfigError, ConfigHandle
//! ├── snapshot.rs    # SiteSnapshot (per-site immutable view)
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                      |
//! |--------------------|----------------------------------------------|
//! | `[site]`           | Base URL, languages, menu and locale flags   |
//! | `[build]`          | Source dirs, drafts/future/expired, busters  |
//! | `[refs]`           | Not-found URL and diagnostic level           |
//! | `[menus.<name>]`   | Static menu entries                          |
//! | `[taxonomies]`     | Taxonomy singular -> plural                  |
//! | `[sitemap]`        | Sitemap defaults                             |

pub mod section;
mod snapshot;
pub mod types;

pub use section::{
    BuildSectionConfig, CacheBuster, CacheBusterConfig, ErrorLevel, LanguageConfig,
    MenuEntryConfig, MenusConfig, RefsConfig, SiteSectionConfig, SitemapConfig,
    TaxonomiesConfig, ViewName,
};
pub use snapshot::SiteSnapshot;
pub use types::{ConfigError, ConfigHandle};

use crate::core::ComponentKind;
use crate::utils::path::normalize_path;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing weft.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub site: SiteSectionConfig,

    #[serde(default)]
    pub build: BuildSectionConfig,

    #[serde(default)]
    pub refs: RefsConfig,

    #[serde(default)]
    pub menus: MenusConfig,

    #[serde(default)]
    pub taxonomies: TaxonomiesConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl SiteConfig {
    /// Load and validate a config file; the root is its parent directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))
            .with_context(|| format!("Failed to load config `{}`", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Invalid config `{}`", path.display()))?;

        // watcher events carry absolute paths, so the roots must too
        config.config_path = normalize_path(path);
        config.root = project_root(path);
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check everything that can fail later at rebuild time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.build.compile_ignore_files()?;
        self.build.compile_cache_busters()?;

        if let Some(menu) = &self.site.section_pages_menu
            && menu.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "site.section_pages_menu must not be empty".into(),
            ));
        }
        for (menu, entries) in &self.menus {
            for entry in entries {
                let unnamed = entry.identifier.as_deref().is_none_or(str::is_empty)
                    && entry.name.as_deref().is_none_or(|n| n.trim().is_empty())
                    && entry.page_ref.is_none();
                if unnamed {
                    return Err(ConfigError::Validation(format!(
                        "menus.{menu}: entry needs an identifier, a name or a page_ref"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Absolute directory of a source component.
    pub fn source_dir(&self, kind: ComponentKind) -> PathBuf {
        self.root.join(self.build.dir(kind))
    }
}

/// Absolute parent directory of a config file; a bare file name lives in
/// the working directory.
fn project_root(config_path: &Path) -> PathBuf {
    let parent = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    normalize_path(parent)
}
