//! `[sitemap]` defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub change_freq: Option<String>,
    /// `-1` leaves priority unset.
    pub priority: f64,
    pub filename: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            change_freq: None,
            priority: -1.0,
            filename: "sitemap.xml".into(),
        }
    }
}
