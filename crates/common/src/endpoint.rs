//! URL building for calls between services.

use url::Url;

/// Returns true when `segment` is sent as its own path segment.
///
/// URL normalization removes `.` and `..`, so names equal to them never
/// reach the other side.
pub fn is_addressable(segment: &str) -> bool {
    segment != "." && segment != ".."
}

/// Appends percent-encoded path segments to `base`, keeping its path.
///
/// An empty segment becomes a trailing slash. Returns `None` when `base`
/// cannot carry a path, e.g. `mailto:` URLs.
pub fn append_segments(base: &Url, segments: &[&str]) -> Option<Url> {
    let mut url = base.clone();
    url.path_segments_mut().ok()?.pop_if_empty().extend(segments);
    Some(url)
}
