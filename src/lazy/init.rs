use std::sync::Arc;

use super::{LazyError, LazyNode};
use crate::content::{assign_global_neighbors, assign_section_neighbors};
use crate::menu::Menus;
use crate::site::Site;
use crate::taxonomy::{TaxonomyList, assemble_taxonomies};

/// The derived views of one site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitNode {
    NextPrev,
    NextPrevInSection,
    Menus,
    Taxonomies,
}

impl InitNode {
    pub const ALL: [Self; 4] = [
        Self::NextPrev,
        Self::NextPrevInSection,
        Self::Menus,
        Self::Taxonomies,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::NextPrev => "next_prev",
            Self::NextPrevInSection => "next_prev_in_section",
            Self::Menus => "menus",
            Self::Taxonomies => "taxonomies",
        }
    }
}

/// Lazy graph of a site: every derived view is computed on first access
/// and kept until [`SiteInit::reset_all`].
pub struct SiteInit {
    next_prev: LazyNode<Site, ()>,
    next_prev_in_section: LazyNode<Site, ()>,
    menus: LazyNode<Site, Menus>,
    taxonomies: LazyNode<Site, TaxonomyList>,
}

impl Default for SiteInit {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteInit {
    pub fn new() -> Self {
        Self {
            next_prev: LazyNode::new(InitNode::NextPrev.name(), |site: &Site| {
                assign_global_neighbors(&site.content());
                Ok(())
            }),
            next_prev_in_section: LazyNode::new(
                InitNode::NextPrevInSection.name(),
                |site: &Site| {
                    assign_section_neighbors(&site.content());
                    Ok(())
                },
            ),
            menus: LazyNode::new(InitNode::Menus.name(), |site: &Site| {
                Ok(site.assemble_menus())
            }),
            taxonomies: LazyNode::new(InitNode::Taxonomies.name(), |site: &Site| {
                let tree = site.content();
                Ok(assemble_taxonomies(&tree, site.snapshot().taxonomies())?)
            }),
        }
    }

    /// Evaluate `node` for its side effects and memoized result.
    pub fn evaluate(&self, node: InitNode, site: &Site) -> Result<(), LazyError> {
        match node {
            InitNode::NextPrev => self.next_prev.evaluate(site).map(drop),
            InitNode::NextPrevInSection => self.next_prev_in_section.evaluate(site).map(drop),
            InitNode::Menus => self.menus.evaluate(site).map(drop),
            InitNode::Taxonomies => self.taxonomies.evaluate(site).map(drop),
        }
    }

    pub fn menus(&self, site: &Site) -> Result<Arc<Menus>, LazyError> {
        self.menus.evaluate(site)
    }

    pub fn taxonomies(&self, site: &Site) -> Result<Arc<TaxonomyList>, LazyError> {
        self.taxonomies.evaluate(site)
    }

    /// Forget every memoized view. Nothing is recomputed until accessed.
    pub fn reset_all(&self) {
        self.next_prev.reset();
        self.next_prev_in_section.reset();
        self.menus.reset();
        self.taxonomies.reset();
        crate::debug!("lazy"; "derived views reset");
    }

    pub fn is_evaluated(&self, node: InitNode) -> bool {
        match node {
            InitNode::NextPrev => self.next_prev.is_evaluated(),
            InitNode::NextPrevInSection => self.next_prev_in_section.is_evaluated(),
            InitNode::Menus => self.menus.is_evaluated(),
            InitNode::Taxonomies => self.taxonomies.is_evaluated(),
        }
    }

    /// Times `node` has been computed since the site was created.
    pub fn evaluations(&self, node: InitNode) -> usize {
        match node {
            InitNode::NextPrev => self.next_prev.evaluations(),
            InitNode::NextPrevInSection => self.next_prev_in_section.evaluations(),
            InitNode::Menus => self.menus.evaluations(),
            InitNode::Taxonomies => self.taxonomies.evaluations(),
        }
    }
}
