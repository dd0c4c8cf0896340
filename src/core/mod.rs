//! Core types - pure abstractions shared across the codebase.

mod category;
mod identity;
mod url;

pub use category::{ComponentKind, ContentKind};
pub use identity::Identity;
pub use self::url::{BaseUrl, UrlPath};
