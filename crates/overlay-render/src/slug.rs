//! Display name ↔ URL-friendly slug conversion.
//!
//! Profile pages and the lookup API are keyed by slug, derived from the
//! person's display name: lowercase, strip anything that is not a word
//! character, whitespace or hyphen, collapse whitespace and underscores into
//! single hyphens, and trim hyphens from the ends. `Dr. Ada Lovelace-Byron`
//! becomes `dr-ada-lovelace-byron`.
//!
//! The reverse direction is best-effort only (casing and punctuation are
//! gone for good) and exists for display fallbacks, not round-tripping.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters outside word / whitespace / hyphen, dropped outright.
/// Word characters are ASCII here; accented letters are stripped, not
/// transliterated.
static INVALID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^[:word:]\s-]").unwrap());

/// Whitespace and underscore runs, each collapsed to one hyphen.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_]+").unwrap());

/// Hyphen runs, collapsed to one.
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").unwrap());

/// Converts a display name to its URL-friendly slug.
///
/// # Example
///
/// ```rust
/// use overlay_render::slugify;
///
/// assert_eq!(slugify("Ada Lovelace"), "ada-lovelace");
/// assert_eq!(slugify("Dr. Grace  Hopper, Jr."), "dr-grace-hopper-jr");
/// assert_eq!(slugify("__trim__me__"), "trim-me");
/// ```
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = INVALID.replace_all(&lowered, "");
    let hyphenated = SEPARATORS.replace_all(&stripped, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Best-effort inverse of [`slugify`]: hyphens become spaces and each word
/// gets its first letter uppercased.
///
/// # Example
///
/// ```rust
/// use overlay_render::unslugify;
///
/// assert_eq!(unslugify("ada-lovelace"), "Ada Lovelace");
/// ```
pub fn unslugify(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
