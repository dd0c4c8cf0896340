//! Filesystem path normalization.

use std::path::{Component, Path, PathBuf};

/// Absolute form of `path`: canonicalized when it exists, otherwise
/// joined onto the current directory.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Render a path with `/` separators regardless of platform.
pub fn to_slash(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&part.to_string_lossy());
            }
            Component::RootDir => out.push('/'),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str("..");
            }
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
        }
    }
    out.replace('\\', "/")
}

/// Root-relative, slash-separated form of `path`, or `None` when `path`
/// lies outside `root` (or is `root` itself).
pub fn relative_slash(path: &Path, root: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = to_slash(rel);
    (!rel.is_empty()).then_some(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("posts/a.md")), "posts/a.md");
        assert_eq!(to_slash(Path::new("/site/content")), "/site/content");
        assert_eq!(to_slash(Path::new("./posts/./a.md")), "posts/a.md");
        assert_eq!(to_slash(Path::new("")), "");
    }

    #[test]
    fn test_relative_slash() {
        let root = Path::new("/site/content");
        assert_eq!(
            relative_slash(Path::new("/site/content/posts/a.md"), root).as_deref(),
            Some("posts/a.md")
        );
        assert_eq!(relative_slash(Path::new("/site/layouts/a.html"), root), None);
        assert_eq!(relative_slash(root, root), None);
    }

    #[test]
    fn test_relative_slash_respects_component_boundary() {
        let root = Path::new("/site/content");
        assert_eq!(relative_slash(Path::new("/site/contents/a.md"), root), None);
    }

    #[test]
    fn test_normalize_path() {
        let missing = Path::new("/definitely/not/here.md");
        assert_eq!(normalize_path(missing), missing);

        let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
        assert_eq!(normalize_path(Path::new(".")), cwd);
        assert!(normalize_path(Path::new("not-here/weft.toml")).is_absolute());
    }
}
