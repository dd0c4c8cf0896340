//! File category definitions.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Markup format of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Markdown,
    AsciiDoc,
    Org,
    Pandoc,
    Rst,
    Html,
}

impl ContentKind {
    /// Detect content kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "md" | "markdown" | "mdown" => Some(Self::Markdown),
            "adoc" | "asciidoc" => Some(Self::AsciiDoc),
            "org" => Some(Self::Org),
            "pdc" | "pandoc" => Some(Self::Pandoc),
            "rst" => Some(Self::Rst),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Detect content kind from file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Display name for this content kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::AsciiDoc => "asciidoc",
            Self::Org => "org",
            Self::Pandoc => "pandoc",
            Self::Rst => "rst",
            Self::Html => "html",
        }
    }

    /// Check if a path is a content file.
    #[inline]
    pub fn is_content_file(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// Source component a tracked file belongs to.
///
/// Declaration order is the order in which source roots are checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Content,
    Layouts,
    Data,
    I18n,
    Static,
    Assets,
}

impl ComponentKind {
    pub const ALL: [Self; 6] = [
        Self::Content,
        Self::Layouts,
        Self::Data,
        Self::I18n,
        Self::Static,
        Self::Assets,
    ];

    /// Directory-style name, also the first segment of cache-buster paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Layouts => "layouts",
            Self::Data => "data",
            Self::I18n => "i18n",
            Self::Static => "static",
            Self::Assets => "assets",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
