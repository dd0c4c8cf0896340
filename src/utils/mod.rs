//! Small shared helpers.

pub mod date;
pub mod path;
pub mod slug;

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Remove duplicates, keeping the first occurrence of each item.
pub fn unique_in_order<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_in_order() {
        let out = unique_in_order(["b", "a", "b", "c", "a"]);
        assert_eq!(out, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_unique_in_order_empty() {
        assert!(unique_in_order(Vec::<String>::new()).is_empty());
    }
}
