//! Configuration section definitions.
//!
//! Each module corresponds to a section in `weft.toml`:
//!
//! | Module     | TOML Section      | Purpose                                  |
//! |------------|-------------------|------------------------------------------|
//! | `site`     | `[site]`          | Base URL, languages, locale flags        |
//! | `build`    | `[build]`         | Source dirs, build flags, cache busters  |
//! | `refs`     | `[refs]`          | Cross-reference not-found handling       |
//! | `menu`     | `[menus.<name>]`  | Static menu entries                      |
//! | `taxonomy` | `[taxonomies]`    | Taxonomy names (singular -> plural)      |
//! | `sitemap`  | `[sitemap]`       | Sitemap defaults                         |

mod build;
mod menu;
mod refs;
mod site;
mod sitemap;
mod taxonomy;

pub use build::{BuildSectionConfig, CacheBuster, CacheBusterConfig};
pub use menu::{MenuEntryConfig, MenusConfig};
pub use refs::{ErrorLevel, RefsConfig};
pub use site::{LanguageConfig, SiteSectionConfig};
pub use sitemap::SitemapConfig;
pub use taxonomy::{TaxonomiesConfig, ViewName};
