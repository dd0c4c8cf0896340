//! Second stage of change detection: one event per path.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use super::{ChangeEvent, Op};

/// Collapse events per path with priority write > create > first seen.
///
/// Editors commonly emit create-then-write (or several writes) for one
/// save. Output has one event per path, in first-seen path order.
pub fn translate_events(events: Vec<ChangeEvent>) -> Vec<ChangeEvent> {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut grouped: FxHashMap<PathBuf, Op> = FxHashMap::default();

    for event in events {
        match grouped.get_mut(&event.path) {
            Some(kept) => *kept = collapse(*kept, event.op),
            None => {
                order.push(event.path.clone());
                grouped.insert(event.path, event.op);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|path| {
            let op = grouped.remove(&path)?;
            Some(ChangeEvent::new(path, op))
        })
        .collect()
}

#[inline]
fn collapse(kept: Op, next: Op) -> Op {
    match (kept, next) {
        (Op::Write, _) | (_, Op::Write) => Op::Write,
        (Op::Create, _) | (_, Op::Create) => Op::Create,
        (first, _) => first,
    }
}
