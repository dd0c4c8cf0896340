//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` / `debug!` for module-prefixed terminal output
//! - `warn!` / `error!` for diagnostics, counted per process
//! - [`DistinctLogger`] which prints each distinct message once
//!
//! # Example
//!
//! ```ignore
//! log!("rebuild"; "{} content files changed", count);
//! warn!("menu"; "duplicate menu entry {:?}", key);
//! ```

use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use std::{
    io::{Write, stderr, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag
static VERBOSE: AtomicBool = AtomicBool::new(false);

static WARNINGS: AtomicUsize = AtomicUsize::new(0);
static ERRORS: AtomicUsize = AtomicUsize::new(0);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Info,
    Warn,
    Error,
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown in verbose mode)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Log a warning (stderr, counted)
#[macro_export]
macro_rules! warn {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log_at($crate::logger::Level::Warn, $module, &format!($($arg)*))
    }};
}

/// Log an error (stderr, counted)
#[macro_export]
macro_rules! error {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log_at($crate::logger::Level::Error, $module, &format!($($arg)*))
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    log_at(Level::Info, module, message);
}

/// Log a message at the given level.
///
/// Info goes to stdout, warnings and errors to stderr.
pub fn log_at(level: Level, module: &str, message: &str) {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());

    match level {
        Level::Info => {
            let mut out = stdout().lock();
            execute!(out, Clear(ClearType::UntilNewLine)).ok();
            writeln!(out, "{prefix} {message}").ok();
            out.flush().ok();
        }
        Level::Warn => {
            WARNINGS.fetch_add(1, Ordering::Relaxed);
            let tag = "WARN".bright_yellow().bold().to_string();
            writeln!(stderr().lock(), "{prefix} {tag} {message}").ok();
        }
        Level::Error => {
            ERRORS.fetch_add(1, Ordering::Relaxed);
            let tag = "ERROR".bright_red().bold().to_string();
            writeln!(stderr().lock(), "{prefix} {tag} {message}").ok();
        }
    }
}

/// Warnings logged since process start.
pub fn warning_count() -> usize {
    WARNINGS.load(Ordering::Relaxed)
}

/// Errors logged since process start.
pub fn error_count() -> usize {
    ERRORS.load(Ordering::Relaxed)
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "watch" => prefix.bright_green().bold().to_string(),
        "rebuild" => prefix.bright_blue().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Distinct Logger
// ============================================================================

/// Logger that prints each distinct `(level, message)` once.
///
/// Rebuild cycles create one per batch so that a flood of identical
/// change messages (editors saving the same file repeatedly) prints once.
pub struct DistinctLogger {
    module: &'static str,
    seen: Mutex<FxHashSet<(Level, String)>>,
}

impl DistinctLogger {
    pub fn new(module: &'static str) -> Self {
        Self {
            module,
            seen: Mutex::new(FxHashSet::default()),
        }
    }

    /// Log at info level unless this message was already logged.
    pub fn println(&self, message: impl Into<String>) -> bool {
        self.emit(Level::Info, message.into(), false)
    }

    /// Debug-level variant; deduplicated even when verbose is off.
    pub fn debug(&self, message: impl Into<String>) -> bool {
        self.emit(Level::Info, message.into(), !is_verbose())
    }

    pub fn warn(&self, message: impl Into<String>) -> bool {
        self.emit(Level::Warn, message.into(), false)
    }

    /// Returns `true` if the message was new.
    fn emit(&self, level: Level, message: String, silent: bool) -> bool {
        let mut seen = self.seen.lock();
        if seen.contains(&(level, message.clone())) {
            return false;
        }
        if !silent {
            log_at(level, self.module, &message);
        }
        seen.insert((level, message));
        true
    }

    /// Number of distinct messages seen so far.
    pub fn len(&self) -> usize {
        self.seen.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
