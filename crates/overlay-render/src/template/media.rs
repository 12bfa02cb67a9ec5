//! Rewriting relative media references to absolute URLs.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A `src` or `srcset` attribute pointing at a relative `./media_*` asset.
/// The tail is kept verbatim, query strings and descriptors included.
static MEDIA_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(src|srcset)="\./media_([^"]+)""#).unwrap());

/// Rebases every relative `./media_*` attribute reference onto `media_base`.
///
/// Authoring tools emit profile assets as document-relative `./media_<hash>`
/// references; served from anywhere else those break, so the overlay rewrites
/// them against the deployment's media origin. Attribute values that are
/// already absolute are left alone.
///
/// # Example
///
/// ```rust
/// use overlay_render::rewrite_media_urls;
///
/// let html = rewrite_media_urls(
///     r#"<img src="./media_1a2b.png?width=750">"#,
///     "https://pages.example.net/people",
/// );
/// assert_eq!(
///     html,
///     r#"<img src="https://pages.example.net/people/media_1a2b.png?width=750">"#
/// );
/// ```
pub fn rewrite_media_urls(html: &str, media_base: &str) -> String {
    MEDIA_ATTR
        .replace_all(html, |caps: &Captures| {
            format!(r#"{}="{}/media_{}""#, &caps[1], media_base, &caps[2])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://pages.example.net/people";

    #[test]
    fn test_rewrites_src() {
        assert_eq!(
            rewrite_media_urls(r#"<img src="./media_123.png">"#, BASE),
            r#"<img src="https://pages.example.net/people/media_123.png">"#
        );
    }

    #[test]
    fn test_rewrites_srcset() {
        assert_eq!(
            rewrite_media_urls(r#"<img srcset="./media_123.png 750w">"#, BASE),
            r#"<img srcset="https://pages.example.net/people/media_123.png 750w">"#
        );
    }

    #[test]
    fn test_rewrites_every_occurrence() {
        let html = r#"<img src="./media_a.png"><source srcset="./media_b.webp">"#;
        let rewritten = rewrite_media_urls(html, BASE);
        assert!(rewritten.contains(r#"src="https://pages.example.net/people/media_a.png""#));
        assert!(rewritten.contains(r#"srcset="https://pages.example.net/people/media_b.webp""#));
    }

    #[test]
    fn test_absolute_urls_untouched() {
        let html = r#"<img src="https://cdn.example.net/media_123.png">"#;
        assert_eq!(rewrite_media_urls(html, BASE), html);
    }

    #[test]
    fn test_other_relative_paths_untouched() {
        let html = r#"<img src="./images/logo.png">"#;
        assert_eq!(rewrite_media_urls(html, BASE), html);
    }

    #[test]
    fn test_tail_kept_verbatim() {
        let html = r#"<img src="./media_1a2b.jpeg?width=750&format=webply&optimize=medium">"#;
        assert_eq!(
            rewrite_media_urls(html, BASE),
            r#"<img src="https://pages.example.net/people/media_1a2b.jpeg?width=750&format=webply&optimize=medium">"#
        );
    }
}
