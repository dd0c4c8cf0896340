//! First stage of change detection: drop noise, keep real source events.

use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;
use rustc_hash::FxHashSet;
use unicode_normalization::UnicodeNormalization;

use super::ChangeEvent;
use crate::config::{BuildSectionConfig, ConfigError};
use crate::utils::path::to_slash;

/// Source inclusion rules.
pub trait SourceFilter {
    /// Excluded by configuration or an editor artifact.
    fn is_ignored(&self, path: &Path) -> bool;

    /// `Ok(false)` for directories and other non-files; `Err` when the
    /// path cannot be inspected (typically because it no longer exists).
    fn is_regular_source_file(&self, path: &Path) -> io::Result<bool>;
}

/// Default rules: `build.ignore_files` regexes plus editor temp files.
#[derive(Debug, Clone, Default)]
pub struct SourceSpec {
    ignore: Vec<Regex>,
}

impl SourceSpec {
    pub fn new(ignore: Vec<Regex>) -> Self {
        Self { ignore }
    }

    pub fn from_config(build: &BuildSectionConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(build.compile_ignore_files()?))
    }
}

impl SourceFilter for SourceSpec {
    fn is_ignored(&self, path: &Path) -> bool {
        if is_temp_file(path) {
            return true;
        }
        let slashed = to_slash(path);
        self.ignore.iter().any(|re| re.is_match(&slashed))
    }

    fn is_regular_source_file(&self, path: &Path) -> io::Result<bool> {
        Ok(std::fs::metadata(path)?.is_file())
    }
}

/// Drop duplicate, ignored and non-file events.
///
/// A remove or rename whose path no longer exists is kept even though it
/// cannot be checked: a deleted file and a deleted directory look the
/// same after the fact.
pub fn filter_events(events: Vec<ChangeEvent>, filter: &impl SourceFilter) -> Vec<ChangeEvent> {
    let mut seen = FxHashSet::default();
    let mut kept = Vec::with_capacity(events.len());

    for event in events {
        if !seen.insert(event.clone()) {
            continue;
        }
        if filter.is_ignored(&event.path) {
            crate::debug!("watch"; "ignored: {}", event);
            continue;
        }

        let regular = match filter.is_regular_source_file(&event.path) {
            Ok(regular) => regular,
            Err(e) if e.kind() == io::ErrorKind::NotFound && event.op.may_remove() => true,
            Err(_) => false,
        };
        if !regular {
            continue;
        }

        kept.push(ChangeEvent::new(normalize_unicode(event.path), event.op));
    }
    kept
}

/// macOS reports decomposed (NFD) names; compose them so a path compares
/// equal however the event source spelled it.
fn normalize_unicode(path: PathBuf) -> PathBuf {
    if cfg!(target_os = "macos") {
        nfc_path(&path)
    } else {
        path
    }
}

/// NFC form of a path (lossy for non-UTF-8 paths, which are returned as-is).
pub fn nfc_path(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(s) => PathBuf::from(s.nfc().collect::<String>()),
        None => path.to_path_buf(),
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "swx" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
        || name.starts_with('#')
        || name == "4913"
}
