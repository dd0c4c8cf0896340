//! Classification: what kinds of sources a batch touched.

use std::collections::BTreeSet;

use super::{ChangeEvent, SourceRoots};
use crate::core::{ComponentKind, Identity};
use crate::logger::DistinctLogger;

/// Per-cycle record of what changed. Built once per batch, then dropped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeSet {
    /// Events on content files, in batch order
    pub content: Vec<ChangeEvent>,
    pub layout_changed: bool,
    /// A layout the template engine did not know before this batch
    pub layout_added: bool,
    pub data_changed: bool,
    pub i18n_changed: bool,
    /// Identities of every tracked event in the batch
    pub identities: BTreeSet<Identity>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    pub fn source_changed(&self) -> bool {
        !self.content.is_empty()
    }
}

/// Resolve identities and set change flags.
///
/// `has_template` answers whether a layout path is already known to the
/// template engine. Events outside every source root are dropped silently.
pub fn classify_events(
    events: &[ChangeEvent],
    roots: &SourceRoots,
    has_template: impl Fn(&str) -> bool,
    logger: &DistinctLogger,
) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for event in events {
        let Some(id) = roots.classify(&event.path) else {
            continue;
        };

        match id.kind() {
            ComponentKind::Content => {
                logger.debug(format!("content changed: {}", id.path()));
                changes.content.push(event.clone());
            }
            ComponentKind::Layouts => {
                logger.debug(format!("template changed: {}", id.path()));
                changes.layout_changed = true;
                if !has_template(id.path()) {
                    changes.layout_added = true;
                }
            }
            ComponentKind::Data => {
                logger.debug(format!("data changed: {}", id.path()));
                changes.data_changed = true;
            }
            ComponentKind::I18n => {
                logger.debug(format!("i18n changed: {}", id.path()));
                changes.i18n_changed = true;
            }
            ComponentKind::Static | ComponentKind::Assets => {
                logger.debug(format!("{} changed: {}", id.kind(), id.path()));
            }
        }

        changes.identities.insert(id);
    }

    changes
}
