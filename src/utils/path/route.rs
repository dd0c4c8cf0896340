//! Link string utilities.

/// Split a link into path and fragment; the fragment is empty when there is no `#`.
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    url.split_once('#').unwrap_or((url, ""))
}
