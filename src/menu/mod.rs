//! Site menus.
//!
//! Menus are rebuilt from scratch whenever the lazy graph asks for them:
//! static `[[menus.<name>]]` entries, optional per-section entries, and
//! entries pages declare in front matter.

mod assemble;
mod entry;

#[cfg(test)]
mod tests;

pub use assemble::{MenuInputs, assemble_menus};
pub use entry::{Menu, MenuEntry};

use std::collections::BTreeMap;

/// Menu name -> root entries.
pub type Menus = BTreeMap<String, Menu>;
