//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"
//! layouts = "layouts"
//! drafts = false
//! ignore_files = ['\.draft\.md$']
//!
//! [[build.cache_busters]]
//! source = 'assets/.*\.(js|ts)$'
//! target = '(js|scripts)'
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::core::ComponentKind;
use crate::policy::BuildFlags;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    pub content: PathBuf,
    pub layouts: PathBuf,
    pub data: PathBuf,
    pub i18n: PathBuf,
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    pub assets: PathBuf,

    /// Include pages marked `draft = true`.
    pub drafts: bool,
    /// Include pages with a publish date in the future.
    pub future: bool,
    /// Include pages past their expiry date.
    pub expired: bool,

    /// Regexes; matching source paths never trigger a rebuild.
    pub ignore_files: Vec<String>,

    pub cache_busters: Vec<CacheBusterConfig>,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            layouts: "layouts".into(),
            data: "data".into(),
            i18n: "i18n".into(),
            static_dir: "static".into(),
            assets: "assets".into(),
            drafts: false,
            future: false,
            expired: false,
            ignore_files: Vec::new(),
            cache_busters: CacheBusterConfig::defaults(),
        }
    }
}

impl BuildSectionConfig {
    /// Configured directory of a component, relative to the site root.
    pub fn dir(&self, kind: ComponentKind) -> &PathBuf {
        match kind {
            ComponentKind::Content => &self.content,
            ComponentKind::Layouts => &self.layouts,
            ComponentKind::Data => &self.data,
            ComponentKind::I18n => &self.i18n,
            ComponentKind::Static => &self.static_dir,
            ComponentKind::Assets => &self.assets,
        }
    }

    pub fn flags(&self) -> BuildFlags {
        BuildFlags {
            future: self.future,
            expired: self.expired,
            drafts: self.drafts,
        }
    }

    pub fn compile_ignore_files(&self) -> Result<Vec<Regex>, ConfigError> {
        self.ignore_files
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!("build.ignore_files: `{pattern}`: {e}"))
                })
            })
            .collect()
    }

    pub fn compile_cache_busters(&self) -> Result<Vec<CacheBuster>, ConfigError> {
        self.cache_busters.iter().map(CacheBusterConfig::compile).collect()
    }
}

/// `[[build.cache_busters]]`: when a source file matching `source` changes,
/// evict resource cache entries whose key matches `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheBusterConfig {
    pub source: String,
    pub target: String,
}

impl CacheBusterConfig {
    pub fn defaults() -> Vec<Self> {
        vec![
            Self {
                source: r"assets/.*\.(js|ts|jsx|tsx)$".into(),
                target: "(js|scripts|javascript)".into(),
            },
            Self {
                source: r"assets/.*\.(css|sass|scss)$".into(),
                target: "(css|styles|scss|sass)".into(),
            },
        ]
    }

    pub fn compile(&self) -> Result<CacheBuster, ConfigError> {
        let build = |field: &str, pattern: &str| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    ConfigError::Validation(format!("build.cache_busters.{field}: `{pattern}`: {e}"))
                })
        };
        Ok(CacheBuster {
            source: build("source", &self.source)?,
            target: build("target", &self.target)?,
        })
    }
}

/// Compiled cache-buster rule.
#[derive(Debug, Clone)]
pub struct CacheBuster {
    source: Regex,
    target: Regex,
}

impl CacheBuster {
    /// Target matcher if `path` (component-qualified, e.g. `assets/js/main.js`)
    /// falls under this rule.
    pub fn target_for(&self, path: &str) -> Option<&Regex> {
        self.source.is_match(path).then_some(&self.target)
    }
}
