//! Weft - the incremental build core of a static site generator.
//!
//! Weft owns what happens between "a file changed" and "these pages need
//! rendering again":
//!
//! - [`watch`] turns raw filesystem events into classified change sets
//! - [`site`] runs one rebuild cycle per batch over every language
//! - [`lazy`] memoizes derived views (neighbors, menus, taxonomies)
//! - [`menu`], [`refs`] and [`taxonomy`] build those views from the
//!   [`content`] tree
//!
//! Parsing content and executing templates are left to collaborators
//! plugged in through [`site::Collaborators`].

pub mod logger;

pub mod config;
pub mod content;
pub mod core;
pub mod lazy;
pub mod menu;
pub mod policy;
pub mod refs;
pub mod render;
pub mod site;
pub mod taxonomy;
pub mod utils;
pub mod watch;

pub use config::SiteConfig;
pub use content::{ContentNode, ContentTree, PageKind, PageMeta};
pub use self::core::{ComponentKind, Identity};
pub use site::{BuildCfg, BuildError, Collaborators, Site, Sites};
pub use watch::{ChangeEvent, Op, SourceWatcher};
