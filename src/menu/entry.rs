use std::cmp::Ordering;

use crate::config::MenuEntryConfig;
use crate::content::{ContentNode, weight_key};

/// One node of an assembled menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuEntry {
    pub menu: String,
    pub identifier: Option<String>,
    pub parent: Option<String>,
    pub name: String,
    pub title: String,
    pub weight: i32,
    pub url: Option<String>,
    /// Key of the page this entry is bound to.
    pub page: Option<String>,
    pub pre: Option<String>,
    pub post: Option<String>,
    pub children: Menu,
}

impl MenuEntry {
    pub fn from_config(menu: &str, config: &MenuEntryConfig) -> Self {
        Self {
            menu: menu.to_string(),
            identifier: config.identifier.clone().filter(|id| !id.is_empty()),
            parent: config.parent.clone().filter(|p| !p.is_empty()),
            name: config.name.clone().unwrap_or_default(),
            title: config.title.clone().unwrap_or_default(),
            weight: config.weight,
            url: config.url.clone(),
            page: None,
            pre: config.pre.clone(),
            post: config.post.clone(),
            children: Menu::default(),
        }
    }

    /// Entry contributed by a page's front matter.
    pub fn from_page(menu: &str, config: &MenuEntryConfig, page: &ContentNode) -> Self {
        let mut entry = Self::from_config(menu, config);
        entry.set_page_values(page);
        entry
    }

    /// Parent synthesized for children whose declared parent does not exist.
    pub fn placeholder(menu: &str, name: &str) -> Self {
        Self {
            menu: menu.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Bind to `page`, filling name, title and weight where unset.
    pub fn set_page_values(&mut self, page: &ContentNode) {
        if self.name.is_empty() {
            self.name = page.link_title().to_string();
        }
        if self.title.is_empty() {
            self.title = page.meta().title().to_string();
        }
        if self.weight == 0 {
            self.weight = page.weight();
        }
        self.url = Some(page.rel_permalink().to_string());
        self.page = Some(page.key().to_string());
    }

    /// The identifier, or the trimmed name when no identifier is set.
    pub fn key_name(&self) -> &str {
        match self.identifier.as_deref() {
            Some(id) => id,
            None => self.name.trim(),
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Ordered sibling entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu(Vec<MenuEntry>);

impl Menu {
    pub fn push(&mut self, entry: MenuEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MenuEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entry at this level with the given key name.
    pub fn get(&self, key_name: &str) -> Option<&MenuEntry> {
        self.0.iter().find(|entry| entry.key_name() == key_name)
    }

    /// Sort this level and every level below it: weight (zero last), then
    /// name, then identifier.
    pub fn sort(&mut self) {
        self.0.sort_by(compare_entries);
        for entry in &mut self.0 {
            entry.children.sort();
        }
    }
}

impl<'a> IntoIterator for &'a Menu {
    type Item = &'a MenuEntry;
    type IntoIter = std::slice::Iter<'a, MenuEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn compare_entries(a: &MenuEntry, b: &MenuEntry) -> Ordering {
    weight_key(a.weight)
        .cmp(&weight_key(b.weight))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.identifier.cmp(&b.identifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PageKind, PageMeta};

    fn named(name: &str, weight: i32) -> MenuEntry {
        MenuEntry {
            name: name.to_string(),
            weight,
            ..MenuEntry::default()
        }
    }

    #[test]
    fn test_key_name_prefers_identifier() {
        let mut entry = named("  Blog ", 0);
        assert_eq!(entry.key_name(), "Blog");
        entry.identifier = Some("posts".into());
        assert_eq!(entry.key_name(), "posts");
    }

    #[test]
    fn test_empty_identifier_is_unset() {
        let config = MenuEntryConfig {
            identifier: Some(String::new()),
            name: Some("Docs".into()),
            ..Default::default()
        };
        assert_eq!(MenuEntry::from_config("main", &config).key_name(), "Docs");
    }

    #[test]
    fn test_set_page_values_keeps_explicit_fields() {
        let page = ContentNode::new("/about", PageKind::Page).with_meta(PageMeta {
            title: Some("About us".into()),
            weight: 7,
            ..Default::default()
        });

        let mut entry = named("Who", 0);
        entry.set_page_values(&page);
        assert_eq!(entry.name, "Who");
        assert_eq!(entry.title, "About us");
        assert_eq!(entry.weight, 7);
        assert_eq!(entry.url.as_deref(), Some("/about/"));
        assert_eq!(entry.page.as_deref(), Some("/about"));
    }

    #[test]
    fn test_sort_order() {
        let mut menu = Menu::default();
        menu.push(named("zero", 0));
        menu.push(named("b", 2));
        menu.push(named("a", 2));
        menu.push(named("first", 1));

        let mut child_menu = Menu::default();
        child_menu.push(named("y", 0));
        child_menu.push(named("x", 0));
        let mut parent = named("parent", 3);
        parent.children = child_menu;
        menu.push(parent);

        menu.sort();
        let names: Vec<_> = menu.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["first", "a", "b", "parent", "zero"]);

        let children: Vec<_> = menu.get("parent").unwrap().children.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(children, ["x", "y"]);
    }
}
