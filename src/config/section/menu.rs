//! `[[menus.<name>]]` static menu entries and page front matter menu entries.
//!
//! ```toml
//! [[menus.main]]
//! name = "Blog"
//! page_ref = "/posts"
//! weight = 10
//!
//! [[menus.main]]
//! name = "GitHub"
//! url = "https://github.com/example"
//! parent = "about"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Menu name -> configured entries, in file order.
pub type MenusConfig = BTreeMap<String, Vec<MenuEntryConfig>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuEntryConfig {
    pub identifier: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub parent: Option<String>,
    pub weight: i32,
    /// Direct link; mutually exclusive with `page_ref` in practice.
    pub url: Option<String>,
    /// Page path resolved through the content tree.
    pub page_ref: Option<String>,
    pub pre: Option<String>,
    pub post: Option<String>,
}
