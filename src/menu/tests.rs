use std::collections::BTreeMap;

use super::*;
use crate::config::{MenuEntryConfig, SiteConfig};
use crate::content::{ContentNode, ContentTree, PageKind, PageMenus, PageMeta};
use crate::core::BaseUrl;

fn node(key: &str, kind: PageKind, title: &str, weight: i32, menus: Option<PageMenus>) -> ContentNode {
    ContentNode::new(key, kind).with_meta(PageMeta {
        title: Some(title.to_string()),
        weight,
        menus,
        ..Default::default()
    })
}

fn under(menu: &str, config: MenuEntryConfig) -> Option<PageMenus> {
    Some(PageMenus::Entries(BTreeMap::from([(menu.to_string(), config)])))
}

fn child_of(parent: &str, weight: i32) -> MenuEntryConfig {
    MenuEntryConfig {
        parent: Some(parent.to_string()),
        weight,
        ..Default::default()
    }
}

/// ```text
/// /                 home
/// /about            menus = "main"
/// /blog             section, weight 1
/// /blog/first       [menus.main] identifier = "blog"
/// /docs             section, weight 2
/// /docs/config      [menus.main] parent = "docs", weight 2
/// /docs/guide       section
/// /docs/install     [menus.main] parent = "docs", weight 1
/// /hidden           headless, menus = "main"
/// ```
fn sample_tree() -> ContentTree {
    let mut tree = ContentTree::new();
    tree.insert(node("/", PageKind::Home, "Home", 0, None));
    tree.insert(node("/about", PageKind::Page, "About", 0, Some(PageMenus::Name("main".into()))));
    tree.insert(node("/blog", PageKind::Section, "Blog", 1, None));
    tree.insert(node(
        "/blog/first",
        PageKind::Page,
        "First",
        0,
        under(
            "main",
            MenuEntryConfig {
                identifier: Some("blog".into()),
                ..Default::default()
            },
        ),
    ));
    tree.insert(node("/docs", PageKind::Section, "Docs", 2, None));
    tree.insert(node("/docs/config", PageKind::Page, "Config", 0, under("main", child_of("docs", 2))));
    tree.insert(node("/docs/guide", PageKind::Section, "Guide", 0, None));
    tree.insert(node("/docs/install", PageKind::Page, "Install", 0, under("main", child_of("docs", 1))));

    let mut hidden = PageMeta {
        title: Some("Hidden".into()),
        menus: Some(PageMenus::Name("main".into())),
        ..Default::default()
    };
    hidden.headless = true;
    tree.insert(ContentNode::new("/hidden", PageKind::Page).with_meta(hidden));
    tree
}

fn assemble(config: &SiteConfig, tree: &ContentTree, section_menu: Option<&str>) -> Menus {
    let base_url = BaseUrl::parse(&config.site.base_url);
    assemble_menus(&MenuInputs {
        config: &config.menus,
        section_pages_menu: section_menu,
        tree,
        base_url: &base_url,
        canonify_urls: config.site.canonify_urls,
    })
}

fn names(menu: &Menu) -> Vec<&str> {
    menu.iter().map(|e| e.name.as_str()).collect()
}

// ============================================================================
// Static entries
// ============================================================================

#[test]
fn test_page_ref_binds_page_values() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        page_ref = "/docs"
        "#,
    )
    .unwrap();
    let menus = assemble(&config, &ContentTree::new(), None);
    assert!(menus["main"].get("").is_some());

    let menus = assemble(&config, &sample_tree(), None);
    let docs = menus["main"].get("Docs").unwrap();
    assert_eq!(docs.page.as_deref(), Some("/docs"));
    assert_eq!(docs.url.as_deref(), Some("/docs/"));
    assert_eq!(docs.weight, 2);
}

#[test]
fn test_unresolved_page_ref_is_not_an_error() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        name = "Gone"
        page_ref = "/missing"
        "#,
    )
    .unwrap();
    let menus = assemble(&config, &sample_tree(), None);
    let gone = menus["main"].get("Gone").unwrap();
    assert!(gone.page.is_none());
    assert!(gone.url.is_none());
}

#[test]
fn test_site_relative_urls_get_context_root() {
    let source = r#"
        [site]
        base_url = "https://example.org/sub/"

        [[menus.main]]
        name = "Start"
        url = "/getting started/"

        [[menus.main]]
        name = "GitHub"
        url = "https://github.com/example"
        "#;
    let config = SiteConfig::parse(source).unwrap();
    let menus = assemble(&config, &ContentTree::new(), None);
    assert_eq!(menus["main"].get("Start").unwrap().url.as_deref(), Some("/sub/getting-started/"));
    assert_eq!(
        menus["main"].get("GitHub").unwrap().url.as_deref(),
        Some("https://github.com/example")
    );

    let mut config = SiteConfig::parse(source).unwrap();
    config.site.canonify_urls = true;
    let menus = assemble(&config, &ContentTree::new(), None);
    assert_eq!(menus["main"].get("Start").unwrap().url.as_deref(), Some("/getting-started/"));
}

// ============================================================================
// Section and page entries
// ============================================================================

#[test]
fn test_section_pages_menu_top_level_only() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        identifier = "blog"
        name = "Weblog"
        "#,
    )
    .unwrap();
    let before = crate::logger::warning_count();
    let menus = assemble(&config, &sample_tree(), Some("main"));
    let main = &menus["main"];

    // static "blog" wins over the section entry and the page entry
    assert_eq!(main.get("blog").unwrap().name, "Weblog");
    assert!(crate::logger::warning_count() > before);

    let docs = main.get("docs").unwrap();
    assert_eq!(docs.name, "Docs");
    assert_eq!(docs.url.as_deref(), Some("/docs/"));
    assert_eq!(names(&docs.children), ["Install", "Config"]);

    assert!(main.get("guide").is_none());
    assert!(main.get("Home").is_none());
}

#[test]
fn test_duplicate_page_entry_dropped() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        name = "About"
        url = "/company/"
        "#,
    )
    .unwrap();
    let menus = assemble(&config, &sample_tree(), None);
    let abouts: Vec<_> = menus["main"].iter().filter(|e| e.key_name() == "About").collect();
    assert_eq!(abouts.len(), 1);
    assert_eq!(abouts[0].url.as_deref(), Some("/company/"));
    assert!(abouts[0].page.is_none());
}

#[test]
fn test_headless_pages_contribute_nothing() {
    let menus = assemble(&SiteConfig::default(), &sample_tree(), None);
    assert!(menus["main"].get("Hidden").is_none());
}

// ============================================================================
// Hierarchy
// ============================================================================

#[test]
fn test_orphan_gets_placeholder_parent() {
    let mut tree = ContentTree::new();
    tree.insert(node("/child", PageKind::Page, "Child", 0, under("side", child_of("ghost", 0))));

    let menus = assemble(&SiteConfig::default(), &tree, None);
    let side = &menus["side"];
    assert_eq!(side.len(), 1);

    let ghost = side.get("ghost").unwrap();
    assert_eq!(ghost.name, "ghost");
    assert!(ghost.url.is_none());
    assert!(ghost.page.is_none());
    assert_eq!(names(&ghost.children), ["Child"]);
}

#[test]
fn test_roots_and_ordering() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        name = "Zeta"
        weight = 0

        [[menus.main]]
        name = "Alpha"
        weight = 5

        [[menus.main]]
        name = "Beta"
        weight = 5
        "#,
    )
    .unwrap();
    let menus = assemble(&config, &sample_tree(), None);

    // `docs` is a placeholder: no section menu configured
    assert_eq!(names(&menus["main"]), ["Alpha", "Beta", "About", "First", "Zeta", "docs"]);
    assert!(menus["main"].iter().all(|e| e.parent.is_none()));
}

#[test]
fn test_assembly_is_deterministic() {
    let config = SiteConfig::parse(
        r#"
        [[menus.main]]
        name = "Home"
        url = "/"

        [[menus.footer]]
        name = "Legal"
        url = "/legal/"
        parent = "company"
        "#,
    )
    .unwrap();
    let tree = sample_tree();
    let first = assemble(&config, &tree, Some("main"));
    let second = assemble(&config, &tree, Some("main"));
    assert_eq!(first, second);
    assert_eq!(first.keys().collect::<Vec<_>>(), ["footer", "main"]);
}
