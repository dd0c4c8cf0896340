//! Stable identities of tracked source files.

use std::fmt;
use std::sync::Arc;

use super::ComponentKind;

/// `(component, root-relative slash path)` of a source file.
///
/// Cheap to clone; used as a map key when correlating change events with
/// pages and derived values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity {
    kind: ComponentKind,
    path: Arc<str>,
}

impl Identity {
    /// Backslashes become `/`, leading slashes are dropped.
    pub fn new(kind: ComponentKind, path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        Self {
            kind,
            path: Arc::from(normalized.trim_start_matches('/')),
        }
    }

    #[inline]
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// Root-relative path, e.g. `posts/a.md`.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Component-qualified path, e.g. `content/posts/a.md`.
    pub fn qualified_path(&self) -> String {
        format!("{}/{}", self.kind.name(), self.path)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_identity_normalizes_path() {
        let id = Identity::new(ComponentKind::Content, "\\posts\\a.md");
        assert_eq!(id.path(), "posts/a.md");
        assert_eq!(id.qualified_path(), "content/posts/a.md");
        assert_eq!(id.to_string(), "content:posts/a.md");
    }

    #[test]
    fn test_identity_equality_includes_kind() {
        let a = Identity::new(ComponentKind::Content, "a.md");
        let b = Identity::new(ComponentKind::Data, "a.md");
        let mut set = FxHashSet::default();
        set.insert(a.clone());
        set.insert(b);
        set.insert(a);
        assert_eq!(set.len(), 2);
    }
}
