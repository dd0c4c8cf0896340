//! URL slugs for taxonomy terms and menu URLs.

use deunicode::deunicode;

/// Slugify free text into a URL key: transliterate to ASCII, lowercase,
/// runs of non-alphanumerics become a single `-`.
///
/// `"Rust Lang"` -> `"rust-lang"`, `"Ünïcödé!"` -> `"unicode"`
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text);
    let mut out = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    out
}

/// Clean up a site-relative URL path: spaces become `-`, repeated slashes
/// collapse, the trailing slash is preserved.
pub fn urlize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.trim().chars() {
        match c {
            '/' if out.ends_with('/') => {}
            ' ' => out.push('-'),
            c => out.push(c),
        }
    }
    out
}
