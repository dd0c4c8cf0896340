//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types                    |
//! | `handle` | Reloadable configuration handle (thread-safe)|

mod error;
pub mod handle;

pub use error::ConfigError;
pub use handle::ConfigHandle;
