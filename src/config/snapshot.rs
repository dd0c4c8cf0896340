//! Immutable per-site view of the configuration.

use std::sync::Arc;
use std::time::Duration;

use super::{SiteConfig, SitemapConfig, TaxonomiesConfig};

/// Values read on hot paths during a build cycle.
///
/// Built once per site and swapped wholesale when the config reloads;
/// never mutated in place.
#[derive(Debug, Clone)]
pub struct SiteSnapshot {
    inner: Arc<SnapshotInner>,
}

#[derive(Debug)]
struct SnapshotInner {
    sitemap: SitemapConfig,
    taxonomies: TaxonomiesConfig,
    timeout: Duration,
    has_cjk_language: bool,
    enable_emoji: bool,
}

impl SiteSnapshot {
    /// Snapshot for `lang`; per-language settings override site-wide ones.
    pub fn new(config: &SiteConfig, lang: &str) -> Self {
        let has_cjk_language = config
            .site
            .languages
            .get(lang)
            .and_then(|l| l.has_cjk_language)
            .unwrap_or(config.site.has_cjk_language);

        Self {
            inner: Arc::new(SnapshotInner {
                sitemap: config.sitemap.clone(),
                taxonomies: config.taxonomies.clone(),
                timeout: Duration::from_millis(config.site.timeout),
                has_cjk_language,
                enable_emoji: config.site.enable_emoji,
            }),
        }
    }

    pub fn sitemap(&self) -> &SitemapConfig {
        &self.inner.sitemap
    }

    pub fn taxonomies(&self) -> &TaxonomiesConfig {
        &self.inner.taxonomies
    }

    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    pub fn has_cjk_language(&self) -> bool {
        self.inner.has_cjk_language
    }

    pub fn enable_emoji(&self) -> bool {
        self.inner.enable_emoji
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_defaults() {
        let snapshot = SiteSnapshot::new(&SiteConfig::default(), "en");
        assert_eq!(snapshot.timeout(), Duration::from_secs(30));
        assert_eq!(snapshot.sitemap().filename, "sitemap.xml");
        assert!(!snapshot.has_cjk_language());
    }

    #[test]
    fn test_language_override() {
        let config = SiteConfig::parse(
            r#"
            [site.languages.en]
            weight = 1
            [site.languages.ja]
            weight = 2
            has_cjk_language = true
            "#,
        )
        .unwrap();
        assert!(SiteSnapshot::new(&config, "ja").has_cjk_language());
        assert!(!SiteSnapshot::new(&config, "en").has_cjk_language());
    }
}
