//! Navigation slots: the annotation the lazy graph writes onto pages.

use parking_lot::RwLock;

use super::{ContentNode, ContentTree};

/// Keys of a page's neighbors in some ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Global and section-scoped neighbors of one page.
///
/// Present only on nodes that support next/prev navigation; see
/// [`super::ContentNode::nav`].
#[derive(Debug, Default)]
pub struct NavSlots {
    global: RwLock<Neighbors>,
    in_section: RwLock<Neighbors>,
}

impl NavSlots {
    pub fn global(&self) -> Neighbors {
        self.global.read().clone()
    }

    pub fn in_section(&self) -> Neighbors {
        self.in_section.read().clone()
    }

    pub fn set_global(&self, neighbors: Neighbors) {
        *self.global.write() = neighbors;
    }

    pub fn set_in_section(&self, neighbors: Neighbors) {
        *self.in_section.write() = neighbors;
    }
}

/// Link every regular page to its neighbors in default order.
///
/// `next` is the item before a page, `prev` the item after it; default
/// order is newest first, so `next` is the newer page. Neighbors come from
/// the full list; pages without navigation support are skipped.
pub fn assign_global_neighbors(tree: &ContentTree) {
    for node in tree.iter() {
        if let Some(nav) = node.nav() {
            nav.set_global(Neighbors::default());
        }
    }
    link(&tree.regular_pages(), NavSlots::set_global);
}

/// Link the direct pages of every section (home included) within that
/// section only.
pub fn assign_section_neighbors(tree: &ContentTree) {
    for node in tree.iter() {
        if let Some(nav) = node.nav() {
            nav.set_in_section(Neighbors::default());
        }
    }
    for section in tree.sections() {
        link(&tree.direct_pages(section.key()), NavSlots::set_in_section);
    }
}

fn link(pages: &[&ContentNode], set: fn(&NavSlots, Neighbors)) {
    for (i, page) in pages.iter().enumerate() {
        let Some(nav) = page.nav() else {
            continue;
        };
        let neighbors = Neighbors {
            next: i
                .checked_sub(1)
                .map(|j| pages[j].key().to_string()),
            prev: pages.get(i + 1).map(|p| p.key().to_string()),
        };
        set(nav, neighbors);
    }
}
