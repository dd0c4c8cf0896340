//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"
//! base_url = "https://example.org/"
//! default_content_language = "en"
//! section_pages_menu = "main"
//! timeout = 30000
//!
//! [site.languages.en]
//! weight = 1
//!
//! [site.languages.zh]
//! weight = 2
//! has_cjk_language = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub title: String,

    /// Absolute base URL, or `/` for relative permalinks.
    pub base_url: String,

    pub default_content_language: String,

    /// Serve the default language under `/<lang>/` as well.
    pub default_content_language_in_subdir: bool,

    /// Menu that receives one entry per top-level section.
    pub section_pages_menu: Option<String>,

    /// Keep configured menu URLs free of the base URL context root.
    pub canonify_urls: bool,

    /// Timeout for external content operations, in milliseconds.
    pub timeout: u64,

    pub has_cjk_language: bool,

    pub enable_emoji: bool,

    /// Per-language overrides; empty means a single site in the default language.
    pub languages: BTreeMap<String, LanguageConfig>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            base_url: "/".into(),
            default_content_language: "en".into(),
            default_content_language_in_subdir: false,
            section_pages_menu: None,
            canonify_urls: false,
            timeout: 30_000,
            has_cjk_language: false,
            enable_emoji: false,
            languages: BTreeMap::new(),
        }
    }
}

impl SiteSectionConfig {
    /// Language codes ordered by weight (zero last), then code.
    pub fn language_codes(&self) -> Vec<String> {
        if self.languages.is_empty() {
            return vec![self.default_content_language.clone()];
        }
        let mut langs: Vec<_> = self.languages.iter().collect();
        langs.sort_by_key(|(code, lang)| (lang.weight == 0, lang.weight, code.as_str()));
        langs.into_iter().map(|(code, _)| code.clone()).collect()
    }

    pub fn is_multilingual(&self) -> bool {
        self.languages.len() > 1
    }
}

/// `[site.languages.<code>]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    pub weight: i32,
    pub title: Option<String>,
    pub has_cjk_language: Option<bool>,
}
