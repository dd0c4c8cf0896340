//! Default page ordering.

use std::cmp::Ordering;

use super::ContentNode;

/// Weight ascending (zero weight last), then date newest first (undated
/// last), then link title, then key.
pub fn compare_default(a: &ContentNode, b: &ContentNode) -> Ordering {
    weight_key(a.weight())
        .cmp(&weight_key(b.weight()))
        .then_with(|| b.meta().sort_date().cmp(&a.meta().sort_date()))
        .then_with(|| a.link_title().cmp(b.link_title()))
        .then_with(|| a.key().cmp(b.key()))
}

/// Sort key placing weight `0` (unset) after every explicit weight.
#[inline]
pub fn weight_key(weight: i32) -> (bool, i32) {
    (weight == 0, weight)
}

pub fn sort_default(pages: &mut [&ContentNode]) {
    pages.sort_by(|a, b| compare_default(a, b));
}
