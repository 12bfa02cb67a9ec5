//! The substitution engine and the [`Renderer`] pipeline.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use serde_json::Value;

use super::media::rewrite_media_urls;
use crate::context::{format_value, resolve_path};
use crate::error::RenderError;

/// One placeholder token: opening marker, dotted path, closing marker.
///
/// Either marker may appear percent-encoded, and the two styles pair freely
/// (see the module docs on the marker quirk). Matching is case-sensitive:
/// `%7b%7b` does not open a token. The path class excludes `}` and `%` so a
/// token never swallows its own closing marker.
static TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(%7B%7B|\{\{)([^}%]+)(%7D%7D|\}\})").unwrap());

/// Replaces every resolvable token in `template` with its context value.
///
/// This is the token pass alone: no media rewriting, no escaping. Tokens
/// that do not resolve are left verbatim, markers included.
///
/// # Example
///
/// ```rust
/// use overlay_render::substitute;
/// use serde_json::json;
///
/// let context = json!({"user": {"name": "Ada"}});
///
/// assert_eq!(substitute("{{user.name}}", &context), "Ada");
/// assert_eq!(substitute("{{user.role}}", &context), "{{user.role}}");
/// ```
pub fn substitute(template: &str, context: &Value) -> String {
    substitute_with(template, context, false)
}

fn substitute_with(template: &str, context: &Value, escape: bool) -> String {
    TOKEN
        .replace_all(template, |caps: &Captures| {
            let raw_path = &caps[2];
            // The path may have gone through the same encoding stage as the
            // markers around it.
            let path = urlencoding::decode(raw_path)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| raw_path.to_string());

            match resolve_path(context, &path) {
                Some(value) => {
                    let text = format_value(value);
                    if escape {
                        escape_html(&text)
                    } else {
                        text
                    }
                }
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Escapes the characters that would let a value break out of HTML content.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// The full rendering pipeline: substitution followed by media rewriting.
///
/// A `Renderer` holds the deployment configuration (the media origin and
/// the escaping switch) and nothing else. Rendering is a pure function of
/// (template, context); no state crosses calls, so a single `Renderer` can
/// serve any number of threads.
///
/// # Example
///
/// ```rust
/// use overlay_render::Renderer;
/// use serde_json::json;
///
/// let renderer = Renderer::new("https://pages.example.net/people");
/// let context = json!({"title": "Cardiology"});
///
/// let html = renderer.render(
///     r#"<p>{{title}}</p><img srcset="./media_x.png 750w">"#,
///     &context,
/// );
/// assert_eq!(
///     html,
///     r#"<p>Cardiology</p><img srcset="https://pages.example.net/people/media_x.png 750w">"#
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    media_base: String,
    escape_values: bool,
}

impl Renderer {
    /// Creates a renderer that rebases `./media_*` references onto
    /// `media_base`, an origin plus path segment, with or without a
    /// trailing slash.
    pub fn new(media_base: impl Into<String>) -> Self {
        let mut media_base = media_base.into();
        while media_base.ends_with('/') {
            media_base.pop();
        }
        Self {
            media_base,
            escape_values: false,
        }
    }

    /// Switches HTML-escaping of substituted values on or off.
    ///
    /// Off by default: values land in the page raw, so context data must be
    /// trusted or escaped upstream. When on, `&`, `<`, `>` and `"` in
    /// substituted values are escaped; template text outside token spans is
    /// never touched either way.
    pub fn escape_values(mut self, escape: bool) -> Self {
        self.escape_values = escape;
        self
    }

    /// The configured media origin, normalized without a trailing slash.
    pub fn media_base(&self) -> &str {
        &self.media_base
    }

    /// Renders a template against a JSON context.
    ///
    /// Cannot fail: unresolved tokens stay in the output and both passes are
    /// plain text transforms.
    pub fn render(&self, template: &str, context: &Value) -> String {
        let substituted = substitute_with(template, context, self.escape_values);
        rewrite_media_urls(&substituted, &self.media_base)
    }

    /// Renders with any serializable data as the context.
    ///
    /// The one fallible entry point: conversion of `data` into the JSON
    /// context model can fail; rendering itself cannot.
    pub fn render_data<T: Serialize>(
        &self,
        template: &str,
        data: &T,
    ) -> Result<String, RenderError> {
        let context = serde_json::to_value(data)?;
        Ok(self.render(template, &context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> Renderer {
        Renderer::new("https://pages.example.net/people")
    }

    #[test]
    fn test_token_free_template_unchanged() {
        let template = "<p>no tokens here</p>";
        assert_eq!(substitute(template, &json!({})), template);
    }

    #[test]
    fn test_simple_substitution() {
        let context = json!({"user": {"name": "Ada"}});
        assert_eq!(substitute("Hello {{user.name}}!", &context), "Hello Ada!");
    }

    #[test]
    fn test_multiple_tokens() {
        let context = json!({"user": {"first": "Grace", "last": "Hopper"}});
        assert_eq!(
            substitute("{{user.first}} {{user.last}}", &context),
            "Grace Hopper"
        );
    }

    #[test]
    fn test_missing_path_left_verbatim() {
        let context = json!({"user": {}});
        assert_eq!(
            substitute("<p>{{user.missing}}</p>", &context),
            "<p>{{user.missing}}</p>"
        );
    }

    #[test]
    fn test_encoded_markers_substitute() {
        let context = json!({"user": {"name": "Grace"}});
        assert_eq!(substitute("%7B%7Buser.name%7D%7D", &context), "Grace");
    }

    #[test]
    fn test_mixed_marker_styles_pair() {
        let context = json!({"user": {"name": "Ada"}});
        assert_eq!(substitute("{{user.name%7D%7D", &context), "Ada");
        assert_eq!(substitute("%7B%7Buser.name}}", &context), "Ada");
    }

    #[test]
    fn test_unresolved_encoded_token_kept_encoded() {
        let context = json!({});
        assert_eq!(
            substitute("%7B%7Buser.name%7D%7D", &context),
            "%7B%7Buser.name%7D%7D"
        );
    }

    #[test]
    fn test_lowercase_encoding_is_not_a_marker() {
        let context = json!({"user": {"name": "Ada"}});
        assert_eq!(
            substitute("%7b%7buser.name%7d%7d", &context),
            "%7b%7buser.name%7d%7d"
        );
    }

    #[test]
    fn test_empty_braces_are_not_a_token() {
        assert_eq!(substitute("{{}}", &json!({"": "x"})), "{{}}");
    }

    #[test]
    fn test_falsy_values_still_substitute() {
        let context = json!({"empty": "", "zero": 0, "off": false});
        assert_eq!(substitute("[{{empty}}|{{zero}}|{{off}}]", &context), "[|0|false]");
    }

    #[test]
    fn test_null_substitutes_as_word() {
        let context = json!({"user": {"middle": null}});
        assert_eq!(substitute("{{user.middle}}", &context), "null");
    }

    #[test]
    fn test_array_index_in_path() {
        let context = json!({"links": [{"url": "https://a.example"}]});
        assert_eq!(substitute("{{links.0.url}}", &context), "https://a.example");
    }

    #[test]
    fn test_path_with_spaces_does_not_resolve() {
        let context = json!({"user": {"name": "Ada"}});
        assert_eq!(substitute("{{ user.name }}", &context), "{{ user.name }}");
    }

    #[test]
    fn test_render_applies_media_rewrite() {
        let context = json!({});
        assert_eq!(
            renderer().render(r#"<img src="./media_123.png">"#, &context),
            r#"<img src="https://pages.example.net/people/media_123.png">"#
        );
    }

    #[test]
    fn test_render_rewrites_media_inside_substituted_values() {
        let context = json!({"body": r#"<img src="./media_9f.jpeg">"#});
        assert_eq!(
            renderer().render("{{body}}", &context),
            r#"<img src="https://pages.example.net/people/media_9f.jpeg">"#
        );
    }

    #[test]
    fn test_media_base_trailing_slash_normalized() {
        let renderer = Renderer::new("https://pages.example.net/people/");
        assert_eq!(renderer.media_base(), "https://pages.example.net/people");
        assert_eq!(
            renderer.render(r#"<img src="./media_p.png">"#, &json!({})),
            r#"<img src="https://pages.example.net/people/media_p.png">"#
        );
    }

    #[test]
    fn test_escaping_is_opt_in() {
        let context = json!({"name": r#"<b>"A&B"</b>"#});

        let raw = renderer().render("{{name}}", &context);
        assert_eq!(raw, r#"<b>"A&B"</b>"#);

        let escaped = renderer().escape_values(true).render("{{name}}", &context);
        assert_eq!(escaped, "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_escaping_leaves_template_text_alone() {
        let context = json!({"name": "Ada"});
        let html = renderer()
            .escape_values(true)
            .render("<p class=\"x\">{{name}}</p>", &context);
        assert_eq!(html, "<p class=\"x\">Ada</p>");
    }

    #[test]
    fn test_render_data_serializes_structs() {
        #[derive(Serialize)]
        struct Profile {
            name: &'static str,
            visits: u32,
        }

        let html = renderer()
            .render_data("{{name}}: {{visits}}", &Profile { name: "Ada", visits: 3 })
            .unwrap();
        assert_eq!(html, "Ada: 3");
    }

    #[test]
    fn test_rendering_unresolved_output_is_idempotent() {
        let context = json!({"user": {"name": "Ada"}});
        let template = "{{user.name}} {{user.role}} %7B%7Bteam%7D%7D";

        let once = substitute(template, &context);
        assert_eq!(once, "Ada {{user.role}} %7B%7Bteam%7D%7D");
        assert_eq!(substitute(&once, &context), once);
    }

    #[test]
    fn test_concurrent_renders_are_independent() {
        let renderer = renderer();
        std::thread::scope(|scope| {
            for i in 0..8 {
                let renderer = &renderer;
                scope.spawn(move || {
                    let context = json!({"n": i});
                    assert_eq!(renderer.render("{{n}}", &context), i.to_string());
                });
            }
        });
    }
}
