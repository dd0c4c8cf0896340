//! Lazy derived views.
//!
//! [`LazyNode`] is a memoized, resettable cell; [`SiteInit`] groups the
//! nodes one site needs (navigation links, menus, taxonomies).

mod init;
mod node;

pub use init::{InitNode, SiteInit};
pub use node::{LazyError, LazyNode};
