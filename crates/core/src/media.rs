//! Media reference rules.
//!
//! Mobile clients capture photos into device-local storage and report them
//! with URIs that only make sense on that device. Those references must never
//! become canonical.

/// URI prefixes that point into a single device's local storage.
pub const TRANSIENT_URI_SCHEMES: &[&str] = &["file://", "content://", "ph://", "blob:"];

/// Category assigned to a photo when the client does not send one.
pub const DEFAULT_PHOTO_CATEGORY: &str = "general";

/// Whether `uri` is a device-local reference.
///
/// Matching is case-insensitive and ignores leading whitespace.
///
/// ```
/// use arbor_core::media::is_transient_uri;
///
/// assert!(is_transient_uri("file:///data/user/0/cache/a.jpg"));
/// assert!(!is_transient_uri("https://cdn.example.org/a.jpg"));
/// ```
pub fn is_transient_uri(uri: &str) -> bool {
    let lowered = uri.trim_start().to_ascii_lowercase();
    TRANSIENT_URI_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
}

/// Return the URI if it may be stored canonically.
///
/// Empty strings and transient references yield `None`.
pub fn persistable_uri(uri: Option<&str>) -> Option<&str> {
    uri.map(str::trim)
        .filter(|u| !u.is_empty() && !is_transient_uri(u))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_scheme_is_transient() {
        assert!(is_transient_uri("file:///storage/emulated/0/DCIM/x.jpg"));
    }

    #[test]
    fn content_scheme_is_transient_regardless_of_case() {
        assert!(is_transient_uri("CONTENT://media/external/images/1"));
    }

    #[test]
    fn remote_urls_are_not_transient() {
        assert!(!is_transient_uri("https://storage.example.org/trees/1.jpg"));
        assert!(!is_transient_uri("s3://bucket/key.jpg"));
    }

    #[test]
    fn persistable_rejects_empty_and_local() {
        assert_eq!(persistable_uri(None), None);
        assert_eq!(persistable_uri(Some("   ")), None);
        assert_eq!(persistable_uri(Some("file:///tmp/a.jpg")), None);
    }

    #[test]
    fn persistable_trims_remote_uri() {
        assert_eq!(
            persistable_uri(Some("  https://cdn.example.org/a.jpg ")),
            Some("https://cdn.example.org/a.jpg")
        );
    }
}
