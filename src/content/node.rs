use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::{NavSlots, PageKind, PageMeta};
use crate::core::{Identity, UrlPath};

/// Converter capabilities of a rendered page that links depend on.
pub trait DocumentInfo: Send + Sync {
    /// Suffix appended to heading anchors (some heading-ID dialects add
    /// one, e.g. `:wrap`); empty for most converters.
    fn anchor_suffix(&self) -> &str {
        ""
    }
}

/// A named output of a page (`html`, `rss`, `json`...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    pub name: String,
    pub rel_permalink: UrlPath,
}

/// One unit of the content tree: home, section, taxonomy, term or page.
///
/// Keys are slash paths without trailing slash (`/`, `/posts`,
/// `/posts/hello`). The collector builds nodes; the core only annotates
/// navigation slots and scratch state.
pub struct ContentNode {
    key: String,
    kind: PageKind,
    source: Option<Identity>,
    source_path: Option<PathBuf>,
    resources: Vec<PathBuf>,
    meta: PageMeta,
    rel_permalink: UrlPath,
    outputs: Vec<OutputFormat>,
    nav: Option<NavSlots>,
    document: Option<Arc<dyn DocumentInfo>>,
    scratch: RwLock<serde_json::Map<String, Value>>,
}

impl ContentNode {
    /// Node with navigation support and a permalink derived from the key.
    pub fn new(key: &str, kind: PageKind) -> Self {
        let key = normalize_key(key);
        Self {
            rel_permalink: UrlPath::from_page(&key),
            key,
            kind,
            source: None,
            source_path: None,
            resources: Vec::new(),
            meta: PageMeta::default(),
            outputs: Vec::new(),
            nav: Some(NavSlots::default()),
            document: None,
            scratch: RwLock::new(serde_json::Map::new()),
        }
    }

    pub fn with_meta(mut self, meta: PageMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Source file identity and its absolute path.
    pub fn with_source(mut self, identity: Identity, path: impl Into<PathBuf>) -> Self {
        self.source = Some(identity);
        self.source_path = Some(path.into());
        self
    }

    pub fn with_permalink(mut self, rel_permalink: UrlPath) -> Self {
        self.rel_permalink = rel_permalink;
        self
    }

    pub fn with_output(mut self, name: &str, rel_permalink: UrlPath) -> Self {
        self.outputs.push(OutputFormat {
            name: name.to_string(),
            rel_permalink,
        });
        self
    }

    /// Bundle resources (images, data files) owned by this page.
    pub fn with_resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_document(mut self, document: Arc<dyn DocumentInfo>) -> Self {
        self.document = Some(document);
        self
    }

    /// Opt out of next/prev navigation.
    pub fn without_navigation(mut self) -> Self {
        self.nav = None;
        self
    }

    // ------------------------------------------------------------------------

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn meta(&self) -> &PageMeta {
        &self.meta
    }

    pub fn source(&self) -> Option<&Identity> {
        self.source.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    pub(super) fn remove_resource(&mut self, path: &Path) -> bool {
        let before = self.resources.len();
        self.resources.retain(|r| r != path);
        self.resources.len() != before
    }

    pub fn rel_permalink(&self) -> &UrlPath {
        &self.rel_permalink
    }

    /// Named output format, if the page has it.
    pub fn output_format(&self, name: &str) -> Option<&OutputFormat> {
        self.outputs
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
    }

    pub fn outputs(&self) -> &[OutputFormat] {
        &self.outputs
    }

    /// Navigation capability: `Some` if the node takes next/prev links.
    pub fn nav(&self) -> Option<&NavSlots> {
        self.nav.as_ref()
    }

    pub fn document(&self) -> Option<&dyn DocumentInfo> {
        self.document.as_deref()
    }

    pub fn link_title(&self) -> &str {
        self.meta.link_title()
    }

    pub fn weight(&self) -> i32 {
        self.meta.weight
    }

    pub fn is_headless(&self) -> bool {
        self.meta.headless
    }

    /// First path segment (`posts` for `/posts/hello`); empty for home.
    pub fn section(&self) -> &str {
        self.key
            .trim_start_matches('/')
            .split('/')
            .next()
            .unwrap_or("")
    }

    /// Section path segments of a branch node.
    pub fn sections(&self) -> Vec<&str> {
        self.key
            .split('/')
            .filter(|s| !s.is_empty())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Scratch: per-page template state, cleared by page-state resets

    pub fn scratch_get(&self, key: &str) -> Option<Value> {
        self.scratch.read().get(key).cloned()
    }

    pub fn scratch_set(&self, key: &str, value: Value) {
        self.scratch.write().insert(key.to_string(), value);
    }

    /// Clear per-page state. Navigation slots belong to the lazy graph
    /// and are left alone.
    pub fn reset_state(&self) {
        self.scratch.write().clear();
    }
}

impl fmt::Debug for ContentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentNode")
            .field("key", &self.key)
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// `posts/hello/` -> `/posts/hello`, `` -> `/`
pub fn normalize_key(key: &str) -> String {
    let trimmed = key.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Key of the enclosing directory; `None` for home.
pub fn parent_key(key: &str) -> Option<String> {
    if key == "/" {
        return None;
    }
    match key.rfind('/') {
        Some(0) | None => Some("/".to_string()),
        Some(idx) => Some(key[..idx].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(""), "/");
        assert_eq!(normalize_key("/"), "/");
        assert_eq!(normalize_key("posts/hello/"), "/posts/hello");
    }

    #[test]
    fn test_parent_key() {
        assert_eq!(parent_key("/"), None);
        assert_eq!(parent_key("/posts").as_deref(), Some("/"));
        assert_eq!(parent_key("/posts/a").as_deref(), Some("/posts"));
    }

    #[test]
    fn test_node_defaults() {
        let node = ContentNode::new("posts/hello", PageKind::Page);
        assert_eq!(node.key(), "/posts/hello");
        assert_eq!(node.rel_permalink(), &UrlPath::from_page("/posts/hello/"));
        assert_eq!(node.section(), "posts");
        assert!(node.nav().is_some());
        assert!(ContentNode::new("/", PageKind::Home).sections().is_empty());
    }

    #[test]
    fn test_output_format_lookup() {
        let node = ContentNode::new("/posts", PageKind::Section)
            .with_output("RSS", UrlPath::from_file("/posts/index.xml"));
        assert!(node.output_format("rss").is_some());
        assert!(node.output_format("json").is_none());
    }

    #[test]
    fn test_reset_state_clears_scratch_only() {
        let node = ContentNode::new("/a", PageKind::Page);
        let neighbors = super::super::Neighbors {
            next: Some("/b".into()),
            prev: None,
        };
        node.scratch_set("count", Value::from(3));
        node.nav().unwrap().set_global(neighbors.clone());

        node.reset_state();
        assert!(node.scratch_get("count").is_none());
        assert_eq!(node.nav().unwrap().global(), neighbors);
    }
}
