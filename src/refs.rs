//! Cross-reference resolution (`ref` / `relref`).
//!
//! A reference is a page path plus an optional `#fragment`. Unresolvable
//! references are not errors: they log one `REF_NOT_FOUND` diagnostic and
//! resolve to the configured fallback URL. Only a reference that cannot be
//! parsed at all returns `Err`.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::config::{ErrorLevel, RefsConfig};
use crate::content::{ContentNode, ContentTree};
use crate::core::BaseUrl;
use crate::utils::path::route::split_path_fragment;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefError {
    #[error("invalid reference {reference:?}: {reason} (fallback {not_found_url:?})")]
    Parse {
        reference: String,
        reason: &'static str,
        not_found_url: String,
    },
}

impl RefError {
    /// The fallback link callers may still emit.
    pub fn not_found_url(&self) -> &str {
        match self {
            Self::Parse { not_found_url, .. } => not_found_url,
        }
    }
}

/// Location of the reference in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn is_valid(&self) -> bool {
        self.line > 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}:{}:{}\"", self.filename, self.line, self.column)
    }
}

/// Where a reference is written: the page, and the position if known.
#[derive(Default, Clone, Copy)]
pub struct RefSource<'a> {
    pub page: Option<&'a ContentNode>,
    pub position: Option<&'a Position>,
}

impl<'a> RefSource<'a> {
    pub fn page(page: &'a ContentNode) -> Self {
        Self {
            page: Some(page),
            position: None,
        }
    }

    pub fn at(mut self, position: &'a Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Per-site reference resolver.
pub struct RefLinker {
    lang: String,
    not_found_url: String,
    level: ErrorLevel,
    base_url: BaseUrl,
    not_found: AtomicUsize,
}

impl RefLinker {
    pub fn new(lang: &str, config: &RefsConfig, base_url: BaseUrl) -> Self {
        Self {
            lang: lang.to_string(),
            not_found_url: config.not_found_url.clone(),
            level: config.error_level,
            base_url,
            not_found: AtomicUsize::new(0),
        }
    }

    pub fn not_found_url(&self) -> &str {
        &self.not_found_url
    }

    /// `REF_NOT_FOUND` diagnostics logged so far.
    pub fn not_found_count(&self) -> usize {
        self.not_found.load(Ordering::Relaxed)
    }

    /// Resolve `reference` to a link.
    ///
    /// `relative` selects the site-relative permalink over the absolute
    /// one; `output_format` links a named output (`rss`, `json`) instead
    /// of the default one.
    pub fn ref_link(
        &self,
        tree: &ContentTree,
        reference: &str,
        source: RefSource<'_>,
        relative: bool,
        output_format: Option<&str>,
    ) -> Result<String, RefError> {
        let reference = reference.replace('\\', "/");
        let (raw_path, raw_fragment) = split_path_fragment(&reference);
        let raw_path = raw_path.split_once('?').map_or(raw_path, |(path, _)| path);
        let path = self.decode(&reference, raw_path)?;
        let fragment = self.decode(&reference, raw_fragment)?;

        let mut link = String::new();
        let mut target = None;

        if !path.is_empty() {
            let found = match tree.get_page_ref(source.page, &path) {
                Ok(Some(page)) => page,
                Ok(None) => {
                    self.log_not_found(&path, "page not found", source);
                    return Ok(self.not_found_url.clone());
                }
                Err(e) => {
                    self.log_not_found(&path, &e.to_string(), source);
                    return Ok(self.not_found_url.clone());
                }
            };

            let rel = match output_format {
                Some(name) => match found.output_format(name) {
                    Some(format) => &format.rel_permalink,
                    None => {
                        self.log_not_found(&path, &format!("output format {name:?}"), source);
                        return Ok(self.not_found_url.clone());
                    }
                },
                None => found.rel_permalink(),
            };
            link = if relative {
                rel.to_string()
            } else {
                self.base_url.permalink(rel)
            };
            target = Some(found);
        }

        if !fragment.is_empty() {
            link.push('#');
            link.push_str(&fragment);
            // a found target decides; a bare fragment uses the source page
            let document = match target {
                Some(page) => page.document(),
                None => source.page.and_then(ContentNode::document),
            };
            if let Some(document) = document {
                link.push_str(document.anchor_suffix());
            }
        }

        Ok(link)
    }

    fn decode(&self, reference: &str, component: &str) -> Result<String, RefError> {
        let error = |reason| RefError::Parse {
            reference: reference.to_string(),
            reason,
            not_found_url: self.not_found_url.clone(),
        };
        if !has_valid_escapes(component) {
            return Err(error("invalid percent-encoding"));
        }
        percent_decode_str(component)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|_| error("percent-encoding is not UTF-8"))
    }

    fn log_not_found(&self, reference: &str, what: &str, source: RefSource<'_>) {
        self.not_found.fetch_add(1, Ordering::Relaxed);

        let lang = &self.lang;
        let message = match (source.position.filter(|p| p.is_valid()), source.page) {
            (Some(position), _) => {
                format!("[{lang}] REF_NOT_FOUND: Ref {reference:?}: {position}: {what}")
            }
            (None, None) => format!("[{lang}] REF_NOT_FOUND: Ref {reference:?}: {what}"),
            (None, Some(page)) => format!(
                "[{lang}] REF_NOT_FOUND: Ref {reference:?} from page {:?}: {what}",
                page.key()
            ),
        };
        match self.level {
            ErrorLevel::Error => crate::error!("refs"; "{message}"),
            ErrorLevel::Warning => crate::warn!("refs"; "{message}"),
        }
    }
}

/// Every `%` starts a two-digit hex escape.
fn has_valid_escapes(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
