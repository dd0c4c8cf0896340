use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::node::{normalize_key, parent_key};
use super::order::sort_default;
use super::{ContentNode, PageKind};
use crate::core::{ContentKind, Identity};

/// Page lookup failure that is not a plain "not found".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("page reference {reference:?} is ambiguous, candidates: {}", candidates.join(", "))]
    Ambiguous {
        reference: String,
        candidates: Vec<String>,
    },
}

/// The content tree of one site, keyed by node key.
///
/// Derived collections (sorted regular pages, parent links, the name
/// index used for short references) are cached and dropped whenever the
/// structure changes or page state is reset.
#[derive(Default)]
pub struct ContentTree {
    nodes: BTreeMap<String, ContentNode>,
    caches: TreeCaches,
}

#[derive(Default)]
struct TreeCaches {
    regular_pages: RwLock<Option<Arc<Vec<String>>>>,
    parents: RwLock<Option<Arc<FxHashMap<String, String>>>>,
    by_name: RwLock<Option<Arc<FxHashMap<String, Vec<String>>>>>,
}

impl TreeCaches {
    fn clear(&self) {
        *self.regular_pages.write() = None;
        *self.parents.write() = None;
        *self.by_name.write() = None;
    }
}

fn cached<T>(slot: &RwLock<Option<Arc<T>>>, build: impl FnOnce() -> T) -> Arc<T> {
    if let Some(value) = slot.read().as_ref() {
        return Arc::clone(value);
    }
    let mut guard = slot.write();
    Arc::clone(guard.get_or_insert_with(|| Arc::new(build())))
}

impl ContentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node.
    pub fn insert(&mut self, node: ContentNode) -> Option<ContentNode> {
        self.caches.clear();
        self.nodes.insert(node.key().to_string(), node)
    }

    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.nodes.get(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in key order.
    pub fn iter(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values()
    }

    /// Nodes that get rendered (everything but headless nodes), in key order.
    pub fn walk_renderable(&self) -> impl Iterator<Item = &ContentNode> {
        self.nodes.values().filter(|node| !node.is_headless())
    }

    pub fn find_by_source(&self, path: &Path) -> Option<&ContentNode> {
        self.nodes
            .values()
            .find(|node| node.source_path() == Some(path))
    }

    // ========================================================================
    // Collections
    // ========================================================================

    /// Regular pages in default order.
    pub fn regular_pages(&self) -> Vec<&ContentNode> {
        let keys = cached(&self.caches.regular_pages, || {
            let mut pages: Vec<_> = self
                .nodes
                .values()
                .filter(|node| node.kind() == PageKind::Page)
                .collect();
            sort_default(&mut pages);
            pages.into_iter().map(|p| p.key().to_string()).collect()
        });
        keys.iter().filter_map(|key| self.nodes.get(key)).collect()
    }

    /// Home and every section at any depth, in key order.
    pub fn sections(&self) -> Vec<&ContentNode> {
        self.nodes
            .values()
            .filter(|node| matches!(node.kind(), PageKind::Home | PageKind::Section))
            .collect()
    }

    /// Regular pages whose parent is `section_key`, in default order.
    pub fn direct_pages(&self, section_key: &str) -> Vec<&ContentNode> {
        let parents = self.parents();
        let mut pages: Vec<_> = self
            .nodes
            .values()
            .filter(|node| {
                node.kind() == PageKind::Page
                    && parents.get(node.key()).map(String::as_str) == Some(section_key)
            })
            .collect();
        sort_default(&mut pages);
        pages
    }

    /// Nearest existing branch node above `key`.
    pub fn parent_of(&self, key: &str) -> Option<&ContentNode> {
        let parents = self.parents();
        parents.get(key).and_then(|parent| self.nodes.get(parent))
    }

    fn parents(&self) -> Arc<FxHashMap<String, String>> {
        cached(&self.caches.parents, || {
            let mut parents = FxHashMap::default();
            for key in self.nodes.keys() {
                let mut candidate = parent_key(key);
                while let Some(ancestor) = candidate {
                    if self
                        .nodes
                        .get(&ancestor)
                        .is_some_and(|node| node.kind().is_branch())
                    {
                        parents.insert(key.clone(), ancestor);
                        break;
                    }
                    candidate = parent_key(&ancestor);
                }
            }
            parents
        })
    }

    fn name_index(&self) -> Arc<FxHashMap<String, Vec<String>>> {
        cached(&self.caches.by_name, || {
            let mut index: FxHashMap<String, Vec<String>> = FxHashMap::default();
            for key in self.nodes.keys() {
                if let Some((_, name)) = key.rsplit_once('/')
                    && !name.is_empty()
                {
                    index.entry(name.to_string()).or_default().push(key.clone());
                }
            }
            index
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve a page reference.
    ///
    /// `/posts/a.md`, `/posts/a` and `/posts/a/` are absolute. Anything
    /// else is tried relative to the context page's directory, then from
    /// the root, then (for bare names) by unique node name.
    pub fn get_page_ref(
        &self,
        context: Option<&ContentNode>,
        reference: &str,
    ) -> Result<Option<&ContentNode>, LookupError> {
        let Some(cleaned) = clean_ref(reference) else {
            return Ok(None);
        };
        if cleaned.starts_with('/') {
            return Ok(self.get(&cleaned));
        }

        if let Some(ctx) = context {
            let base = if ctx.kind().is_branch() {
                ctx.key().to_string()
            } else {
                parent_key(ctx.key()).unwrap_or_else(|| "/".to_string())
            };
            if let Some(node) = join_key(&base, &cleaned).and_then(|key| self.get(&key)) {
                return Ok(Some(node));
            }
        }

        if let Some(node) = join_key("/", &cleaned).and_then(|key| self.get(&key)) {
            return Ok(Some(node));
        }
        if cleaned.contains('/') || cleaned == "." {
            return Ok(None);
        }

        let index = self.name_index();
        match index.get(&cleaned).map(Vec::as_slice) {
            Some([key]) => Ok(self.get(key)),
            Some(keys) if keys.len() > 1 => Err(LookupError::Ambiguous {
                reference: reference.to_string(),
                candidates: keys.to_vec(),
            }),
            _ => Ok(None),
        }
    }

    // ========================================================================
    // Mutation between cycles
    // ========================================================================

    /// Remove whatever `path` backs.
    ///
    /// A page source removes its node; a section source also removes every
    /// node below it. A bundle resource is detached from its owning page.
    /// Returns the keys of removed nodes.
    pub fn remove_by_source(&mut self, path: &Path) -> Vec<String> {
        let hit = self
            .find_by_source(path)
            .map(|node| (node.key().to_string(), node.kind()));

        let Some((key, kind)) = hit else {
            for node in self.nodes.values_mut() {
                if node.remove_resource(path) {
                    crate::debug!("content"; "detached resource {} from {}", path.display(), node.key());
                    break;
                }
            }
            return Vec::new();
        };

        let mut removed = vec![key.clone()];
        if kind == PageKind::Section {
            let prefix = format!("{key}/");
            removed.extend(
                self.nodes
                    .keys()
                    .filter(|k| k.starts_with(&prefix))
                    .cloned(),
            );
        }
        for k in &removed {
            self.nodes.remove(k);
        }
        self.caches.clear();

        crate::debug!("content"; "removed {} node(s) for {}", removed.len(), path.display());
        removed
    }

    /// Drop derived collections (sorted pages, parents, name index).
    pub fn drop_collections(&self) {
        self.caches.clear();
    }

    /// Full reset: derived collections and every page's state.
    pub fn reset_page_state(&self) {
        self.caches.clear();
        for node in self.nodes.values() {
            node.reset_state();
        }
    }

    /// Selective reset: state of pages whose source is in `identities`.
    /// Returns the number of pages reset.
    pub fn reset_page_state_for(&self, identities: &BTreeSet<Identity>) -> usize {
        let mut count = 0;
        for node in self.nodes.values() {
            if node.source().is_some_and(|id| identities.contains(id)) {
                node.reset_state();
                count += 1;
            }
        }
        count
    }
}

/// Normalize a reference: slashes, content extension, `_index`/`index`.
/// Absolute results start with `/`; `.` means "the context directory".
fn clean_ref(reference: &str) -> Option<String> {
    let mut r = reference.trim().replace('\\', "/");
    if r.is_empty() {
        return None;
    }
    let absolute = r.starts_with('/');

    if let Some((stem, ext)) = r.rsplit_once('.')
        && !ext.contains('/')
        && ContentKind::from_extension(ext).is_some()
    {
        r = stem.to_string();
    }

    let mut segments: Vec<&str> = r.split('/').filter(|s| !s.is_empty()).collect();
    if matches!(segments.last(), Some(&"_index") | Some(&"index")) {
        segments.pop();
    }
    let joined = segments.join("/");

    Some(if absolute {
        normalize_key(&joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    })
}

/// Join a relative reference onto a key, resolving `.` and `..`.
fn join_key(base: &str, rel: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for part in rel.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            part => segments.push(part),
        }
    }
    Some(normalize_key(&segments.join("/")))
}
