use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::*;
use crate::core::{ComponentKind, Identity};
use crate::utils::date::DateTimeUtc;

fn content_id(rel: &str) -> Identity {
    Identity::new(ComponentKind::Content, rel)
}

fn branch(key: &str, kind: PageKind, source: &str) -> ContentNode {
    ContentNode::new(key, kind).with_source(content_id(source), format!("/site/content/{source}"))
}

fn page(key: &str, source: &str, day: u8) -> ContentNode {
    ContentNode::new(key, PageKind::Page)
        .with_source(content_id(source), format!("/site/content/{source}"))
        .with_meta(PageMeta {
            title: Some(key.trim_start_matches('/').to_string()),
            date: Some(DateTimeUtc::from_ymd(2024, 1, day)),
            ..Default::default()
        })
}

/// ```text
/// /                 (_index.md)
/// /about            (about.md)
/// /posts            (posts/_index.md)
/// /posts/a          (posts/a.md, day 1)
/// /posts/b          (posts/b.md, day 2, bundle with cover.png)
/// /posts/deep       (posts/deep/_index.md)
/// /posts/deep/c     (posts/deep/c.md, day 3)
/// /notes/a          (notes/a.md, day 4, no /notes section node)
/// ```
fn sample_tree() -> ContentTree {
    let mut tree = ContentTree::new();
    tree.insert(branch("/", PageKind::Home, "_index.md"));
    tree.insert(page("/about", "about.md", 5));
    tree.insert(branch("/posts", PageKind::Section, "posts/_index.md"));
    tree.insert(page("/posts/a", "posts/a.md", 1));
    tree.insert(
        page("/posts/b", "posts/b/index.md", 2)
            .with_resources(vec![PathBuf::from("/site/content/posts/b/cover.png")]),
    );
    tree.insert(branch("/posts/deep", PageKind::Section, "posts/deep/_index.md"));
    tree.insert(page("/posts/deep/c", "posts/deep/c.md", 3));
    tree.insert(page("/notes/a", "notes/a.md", 4));
    tree
}

fn keys(nodes: &[&ContentNode]) -> Vec<String> {
    nodes.iter().map(|n| n.key().to_string()).collect()
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn test_regular_pages_default_order() {
    let tree = sample_tree();
    assert_eq!(
        keys(&tree.regular_pages()),
        vec!["/about", "/notes/a", "/posts/deep/c", "/posts/b", "/posts/a"]
    );
}

#[test]
fn test_sections_include_home() {
    let tree = sample_tree();
    assert_eq!(keys(&tree.sections()), vec!["/", "/posts", "/posts/deep"]);
}

#[test]
fn test_direct_pages() {
    let tree = sample_tree();
    assert_eq!(keys(&tree.direct_pages("/posts")), vec!["/posts/b", "/posts/a"]);
    assert_eq!(keys(&tree.direct_pages("/posts/deep")), vec!["/posts/deep/c"]);
    // `/notes` has no section node, so its page hangs off home
    assert_eq!(keys(&tree.direct_pages("/")), vec!["/about", "/notes/a"]);
}

#[test]
fn test_parent_of() {
    let tree = sample_tree();
    assert_eq!(tree.parent_of("/posts/deep/c").unwrap().key(), "/posts/deep");
    assert_eq!(tree.parent_of("/notes/a").unwrap().key(), "/");
    assert!(tree.parent_of("/").is_none());
}

#[test]
fn test_walk_renderable_skips_headless() {
    let mut tree = sample_tree();
    tree.insert(ContentNode::new("/hidden", PageKind::Page).with_meta(PageMeta {
        headless: true,
        ..Default::default()
    }));
    assert!(tree.walk_renderable().all(|n| n.key() != "/hidden"));
    assert!(tree.get("/hidden").is_some());
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_page_ref_absolute() {
    let tree = sample_tree();
    for reference in ["/posts/a", "/posts/a/", "/posts/a.md", "posts/a.md"] {
        let node = tree.get_page_ref(None, reference).unwrap();
        assert_eq!(node.unwrap().key(), "/posts/a", "{reference}");
    }
    assert_eq!(tree.get_page_ref(None, "/posts/_index.md").unwrap().unwrap().key(), "/posts");
    assert_eq!(tree.get_page_ref(None, "/").unwrap().unwrap().key(), "/");
    assert_eq!(tree.get_page_ref(None, "/_index.md").unwrap().unwrap().key(), "/");
}

#[test]
fn test_get_page_ref_relative_to_context() {
    let tree = sample_tree();
    let b = tree.get("/posts/b").unwrap();
    assert_eq!(tree.get_page_ref(Some(b), "a.md").unwrap().unwrap().key(), "/posts/a");
    assert_eq!(
        tree.get_page_ref(Some(b), "deep/c").unwrap().unwrap().key(),
        "/posts/deep/c"
    );
    assert_eq!(tree.get_page_ref(Some(b), "../about").unwrap().unwrap().key(), "/about");

    let deep = tree.get("/posts/deep").unwrap();
    assert_eq!(tree.get_page_ref(Some(deep), "c").unwrap().unwrap().key(), "/posts/deep/c");
}

#[test]
fn test_get_page_ref_missing() {
    let tree = sample_tree();
    assert!(tree.get_page_ref(None, "/nope").unwrap().is_none());
    assert!(tree.get_page_ref(None, "").unwrap().is_none());
    assert!(tree.get_page_ref(None, "../../escape").unwrap().is_none());
}

#[test]
fn test_get_page_ref_by_unique_name() {
    let tree = sample_tree();
    assert_eq!(tree.get_page_ref(None, "c.md").unwrap().unwrap().key(), "/posts/deep/c");
}

#[test]
fn test_get_page_ref_ambiguous_name() {
    let tree = sample_tree();
    let about = tree.get("/about").unwrap();
    // `a` exists under /posts and /notes; from /about neither is relative
    let err = tree.get_page_ref(Some(about), "a").unwrap_err();
    let LookupError::Ambiguous { candidates, .. } = &err;
    assert_eq!(candidates, &vec!["/notes/a".to_string(), "/posts/a".to_string()]);
    assert!(err.to_string().contains("ambiguous"));
}

// ============================================================================
// Removal & resets
// ============================================================================

#[test]
fn test_remove_page_by_source() {
    let mut tree = sample_tree();
    let removed = tree.remove_by_source(Path::new("/site/content/posts/a.md"));
    assert_eq!(removed, vec!["/posts/a"]);
    assert!(tree.get("/posts/a").is_none());
    assert_eq!(keys(&tree.direct_pages("/posts")), vec!["/posts/b"]);
}

#[test]
fn test_remove_section_takes_descendants() {
    let mut tree = sample_tree();
    let removed = tree.remove_by_source(Path::new("/site/content/posts/_index.md"));
    assert_eq!(removed.len(), 5);
    assert!(tree.iter().all(|n| !n.key().starts_with("/posts")));
    assert!(tree.get("/about").is_some());
}

#[test]
fn test_remove_home_keeps_children() {
    let mut tree = sample_tree();
    let removed = tree.remove_by_source(Path::new("/site/content/_index.md"));
    assert_eq!(removed, vec!["/"]);
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_remove_bundle_resource() {
    let mut tree = sample_tree();
    let cover = Path::new("/site/content/posts/b/cover.png");
    assert!(tree.remove_by_source(cover).is_empty());
    assert!(tree.get("/posts/b").unwrap().resources().is_empty());
}

#[test]
fn test_remove_unknown_is_noop() {
    let mut tree = sample_tree();
    assert!(tree.remove_by_source(Path::new("/site/content/none.md")).is_empty());
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_selective_reset() {
    let tree = sample_tree();
    for node in tree.iter() {
        node.scratch_set("seen", true.into());
    }

    let ids = BTreeSet::from([content_id("posts/a.md"), content_id("unknown.md")]);
    assert_eq!(tree.reset_page_state_for(&ids), 1);
    assert!(tree.get("/posts/a").unwrap().scratch_get("seen").is_none());
    assert!(tree.get("/posts/b").unwrap().scratch_get("seen").is_some());
}

#[test]
fn test_full_reset() {
    let tree = sample_tree();
    for node in tree.iter() {
        node.scratch_set("seen", true.into());
    }
    let _ = tree.regular_pages();

    tree.reset_page_state();
    assert!(tree.iter().all(|n| n.scratch_get("seen").is_none()));
    assert_eq!(tree.regular_pages().len(), 5);
}

#[test]
fn test_insert_invalidates_collections() {
    let mut tree = sample_tree();
    assert_eq!(tree.regular_pages().len(), 5);
    tree.insert(page("/posts/z", "posts/z.md", 9));
    assert_eq!(tree.regular_pages()[0].key(), "/posts/z");
}
