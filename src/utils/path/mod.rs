//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: filesystem paths (`normalize_path`, `to_slash`, `relative_slash`)
//! - [`route`]: link strings (`split_path_fragment`)

pub mod fs;
pub mod route;

pub use fs::{normalize_path, relative_slash, to_slash};
pub use route::split_path_fragment;
