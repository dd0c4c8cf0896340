//! Content tree model.
//!
//! The collector (an external collaborator) fills a [`ContentTree`] with
//! [`ContentNode`]s. The build core reads the tree, annotates navigation
//! slots and scratch state, and removes nodes whose sources disappear.
//!
//! | Module  | Purpose                                          |
//! |---------|--------------------------------------------------|
//! | `kind`  | `PageKind`, section path classification          |
//! | `meta`  | Front matter fields the core reads               |
//! | `nav`   | Next/prev navigation slots                       |
//! | `node`  | `ContentNode`, output formats, converter info    |
//! | `order` | Default page ordering                            |
//! | `tree`  | `ContentTree`: lookup, removal, state resets     |

mod kind;
mod meta;
mod nav;
mod node;
mod order;
mod tree;

#[cfg(test)]
mod tests;

pub use kind::{PageKind, kind_from_sections};
pub use meta::{PageMenus, PageMeta};
pub use nav::{NavSlots, Neighbors, assign_global_neighbors, assign_section_neighbors};
pub use node::{ContentNode, DocumentInfo, OutputFormat, normalize_key, parent_key};
pub use order::{compare_default, sort_default, weight_key};
pub use tree::{ContentTree, LookupError};
