//! Open Graph preview images, rendered as 1200x630 SVG documents.

pub mod listing;
pub mod product;
pub mod svg;

use sha2::{Digest, Sha256};

pub const CONTENT_TYPE: &str = "image/svg+xml";
pub const CACHE_CONTROL: &str = "public, max-age=3600";

/// Strong `ETag` for a rendered image, quoted as the header requires.
pub fn etag(image: &str) -> String {
    format!("\"{:x}\"", Sha256::digest(image.as_bytes()))
}

/// Returns `true` when an `If-None-Match` value names `etag` (or `*`).
pub fn matches_etag(if_none_match: &str, etag: &str) -> bool {
    if_none_match
        .split(',')
        .map(|candidate| candidate.trim().trim_start_matches("W/"))
        .any(|candidate| candidate == "*" || candidate == etag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn etag_is_stable_and_quoted() {
        let a = etag("<svg/>");
        assert_eq!(a, etag("<svg/>"));
        assert_ne!(a, etag("<svg></svg>"));
        assert!(a.starts_with('"') && a.ends_with('"'));
        assert_eq!(a.len(), 64 + 2);
    }

    #[test]
    fn if_none_match_accepts_lists_and_weak_tags() {
        let tag = etag("x");
        assert!(matches_etag(&tag, &tag));
        assert!(matches_etag(&format!("\"other\", W/{tag}"), &tag));
        assert!(matches_etag("*", &tag));
        assert!(!matches_etag("\"other\"", &tag));
    }
}
