//! URL path types.
//!
//! - [`UrlPath`]: site-relative, decoded path of a page or output format
//! - [`BaseUrl`]: the configured `base-url`, used to build absolute permalinks

use std::borrow::Borrow;
use std::sync::{Arc, OnceLock};

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};

/// Decoded URL path (internal representation)
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - Page URLs end with `/`, file URLs (e.g. `/index.xml`) may not
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create page URL (with trailing slash). Strips query string and fragment.
    pub fn from_page(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.is_empty() || trimmed == "/" {
            return Self::root();
        }

        let path = strip_query_fragment(trimmed);
        let mut normalized = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        Self(Arc::from(normalized))
    }

    /// Create file URL (no trailing slash normalization).
    pub fn from_file(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.is_empty() {
            return Self::root();
        }
        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    pub fn root() -> Self {
        Self(Arc::from("/"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this is a page URL (ends with `/`).
    #[inline]
    pub fn is_page_url(&self) -> bool {
        self.0.ends_with('/')
    }
}

/// Strip query string and fragment, resolving `.` and `..` segments.
fn strip_query_fragment(path: &str) -> String {
    static BASE: OnceLock<Option<url::Url>> = OnceLock::new();
    let base = BASE.get_or_init(|| url::Url::parse("http://x").ok());

    match base.as_ref().and_then(|base| base.join(path).ok()) {
        Some(parsed) => percent_decode_str(parsed.path())
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| parsed.path().to_string()),
        None => path.split(['?', '#']).next().unwrap_or(path).to_string(),
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Default for UrlPath {
    fn default() -> Self {
        Self::root()
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UrlPath {
    fn from(s: &str) -> Self {
        Self::from_page(s)
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

impl Serialize for UrlPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for UrlPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_page(&s))
    }
}

// ============================================================================
// Base URL
// ============================================================================

/// Configured site base URL.
///
/// `https://example.org/docs/` has root `https://example.org/docs` and
/// context root `/docs`; a bare `/` base yields relative permalinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    /// Base without trailing slash
    root: String,
    /// Path part without trailing slash (`""` when mounted at the host root)
    context_root: String,
}

impl BaseUrl {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().trim_end_matches('/');
        let context_root = match url::Url::parse(raw) {
            Ok(url) => url.path().trim_end_matches('/').to_string(),
            Err(_) => raw.to_string(),
        };
        Self {
            root: raw.to_string(),
            context_root,
        }
    }

    /// `https://example.org/docs`
    pub fn root(&self) -> &str {
        &self.root
    }

    /// `/docs`, or `""` when the site is served from the host root
    pub fn context_root(&self) -> &str {
        &self.context_root
    }

    /// Absolute permalink for a site-relative path.
    pub fn permalink(&self, rel: &UrlPath) -> String {
        format!("{}{}", self.root, rel)
    }

    /// Prefix a site-relative path with the context root.
    pub fn with_context_root(&self, path: &str) -> String {
        format!("{}{}", self.context_root, path)
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self::parse("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_page_normalizes_slashes() {
        assert_eq!(UrlPath::from_page("posts/hello"), "/posts/hello/");
        assert_eq!(UrlPath::from_page("/posts/hello/"), "/posts/hello/");
        assert_eq!(UrlPath::from_page(""), "/");
        assert_eq!(UrlPath::from_page("  /  "), "/");
    }

    #[test]
    fn test_from_page_strips_query_and_fragment() {
        assert_eq!(UrlPath::from_page("/about?x=1#team"), "/about/");
    }

    #[test]
    fn test_from_page_keeps_unicode_decoded() {
        assert_eq!(UrlPath::from_page("/博客/文章"), "/博客/文章/");
    }

    #[test]
    fn test_from_file_keeps_extension() {
        let url = UrlPath::from_file("posts/index.xml");
        assert_eq!(url, "/posts/index.xml");
        assert!(!url.is_page_url());
    }

    #[test]
    fn test_base_url_with_path() {
        let base = BaseUrl::parse("https://example.org/docs/");
        assert_eq!(base.root(), "https://example.org/docs");
        assert_eq!(base.context_root(), "/docs");
        assert_eq!(
            base.permalink(&UrlPath::from_page("/about")),
            "https://example.org/docs/about/"
        );
        assert_eq!(base.with_context_root("/blog/"), "/docs/blog/");
    }

    #[test]
    fn test_base_url_host_root() {
        let base = BaseUrl::parse("https://example.org");
        assert_eq!(base.context_root(), "");
        assert_eq!(
            base.permalink(&UrlPath::from_page("/about/")),
            "https://example.org/about/"
        );
    }

    #[test]
    fn test_base_url_relative() {
        let base = BaseUrl::parse("/");
        assert_eq!(base.root(), "");
        assert_eq!(base.permalink(&UrlPath::from_page("/about/")), "/about/");
    }
}
