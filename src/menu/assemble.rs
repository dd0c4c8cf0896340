use std::collections::BTreeMap;

use super::{MenuEntry, Menus};
use crate::config::MenusConfig;
use crate::content::{ContentTree, PageKind};
use crate::core::BaseUrl;
use crate::utils::slug::urlize_path;

/// Everything menu assembly reads. Assembly never mutates its inputs.
pub struct MenuInputs<'a> {
    pub config: &'a MenusConfig,
    /// Menu that receives one entry per top-level section, if any.
    pub section_pages_menu: Option<&'a str>,
    pub tree: &'a ContentTree,
    pub base_url: &'a BaseUrl,
    pub canonify_urls: bool,
}

/// `(menu name, entry key name)`
type FlatKey = (String, String);

/// Build every menu from scratch.
///
/// Entries are collected into a flat map (static config first, then
/// section entries, then page entries), grouped under their parents and
/// frozen into sorted trees. A page entry colliding with an existing key
/// is logged and dropped; a missing parent is replaced by a placeholder.
pub fn assemble_menus(inputs: &MenuInputs<'_>) -> Menus {
    let mut flat: BTreeMap<FlatKey, MenuEntry> = BTreeMap::new();

    for (name, configs) in inputs.config {
        for config in configs {
            let mut entry = MenuEntry::from_config(name, config);
            if let Some(page_ref) = config.page_ref.as_deref() {
                match inputs.tree.get_page_ref(None, page_ref) {
                    Ok(Some(page)) => entry.set_page_values(page),
                    Ok(None) => {
                        crate::debug!("menu"; "{name}: page_ref {page_ref:?} not found");
                    }
                    Err(e) => crate::debug!("menu"; "{name}: {e}"),
                }
            } else if let Some(url) = entry.url.take() {
                entry.url = Some(node_menu_url(&url, inputs));
            }
            flat.insert((name.clone(), entry.key_name().to_string()), entry);
        }
    }

    if let Some(menu) = inputs.section_pages_menu {
        for section in inputs.tree.sections() {
            if section.kind() == PageKind::Home {
                continue;
            }
            // top level only; nested sections map onto their root
            let id = section.section();
            let key = (menu.to_string(), id.to_string());
            if flat.contains_key(&key) {
                continue;
            }
            let mut entry = MenuEntry {
                menu: menu.to_string(),
                identifier: Some(id.to_string()),
                name: section.link_title().to_string(),
                weight: section.weight(),
                ..MenuEntry::default()
            };
            entry.set_page_values(section);
            flat.insert(key, entry);
        }
    }

    for page in inputs.tree.walk_renderable() {
        let Some(page_menus) = page.meta().menus.as_ref() else {
            continue;
        };
        for (name, config) in page_menus.entries() {
            let entry = MenuEntry::from_page(&name, &config, page);
            let key = (name, entry.key_name().to_string());
            if flat.contains_key(&key) {
                crate::warn!(
                    "menu";
                    "{}: duplicate menu entry with identifier {:?} in menu {:?}",
                    page.key(),
                    key.1,
                    key.0
                );
                continue;
            }
            flat.insert(key, entry);
        }
    }

    let mut children: BTreeMap<FlatKey, Vec<FlatKey>> = BTreeMap::new();
    for (key, entry) in &flat {
        if let Some(parent) = &entry.parent {
            children
                .entry((key.0.clone(), parent.clone()))
                .or_default()
                .push(key.clone());
        }
    }

    for (menu, parent) in children.keys() {
        flat.entry((menu.clone(), parent.clone()))
            .or_insert_with(|| MenuEntry::placeholder(menu, parent));
    }

    let mut menus = Menus::new();
    for (key, entry) in &flat {
        if entry.parent.is_none() {
            menus
                .entry(key.0.clone())
                .or_default()
                .push(freeze(key, entry, &flat, &children));
        }
    }
    for menu in menus.values_mut() {
        menu.sort();
    }
    menus
}

/// Clone `entry` with its whole subtree attached.
///
/// Only reached from roots, and every entry has one parent, so parent
/// cycles are never entered.
fn freeze(
    key: &FlatKey,
    entry: &MenuEntry,
    flat: &BTreeMap<FlatKey, MenuEntry>,
    children: &BTreeMap<FlatKey, Vec<FlatKey>>,
) -> MenuEntry {
    let mut entry = entry.clone();
    for child in children.get(key).into_iter().flatten() {
        if let Some(child_entry) = flat.get(child) {
            entry.children.push(freeze(child, child_entry, flat, children));
        }
    }
    entry
}

/// Rewrite a configured site-relative URL the way page URLs are written.
fn node_menu_url(url: &str, inputs: &MenuInputs<'_>) -> String {
    if !url.starts_with('/') {
        return url.to_string();
    }
    let url = urlize_path(url);
    if inputs.canonify_urls {
        url
    } else {
        inputs.base_url.with_context_root(&url)
    }
}
