//! The composed fetch-and-render pipeline.

use serde_json::Value;
use tracing::debug;

use overlay_render::Renderer;

use crate::error::ClientResult;
use crate::fetch::TemplateFetcher;

/// Fetches a template and renders it against a profile context in one step.
///
/// This is the headline operation of the toolkit: pull the published page
/// template, fill its tokens from the profile record, rewrite media
/// references, hand back HTML ready to serve.
///
/// # Example
///
/// ```rust,no_run
/// use overlay_client::Overlay;
/// use serde_json::json;
///
/// let overlay = Overlay::new("https://pages.example.net/people");
/// let html = overlay
///     .fetch_and_render(
///         "https://pages.example.net/people/profile-template",
///         &json!({"user": {"name": "Ada Lovelace"}}),
///     )
///     .unwrap();
/// # let _ = html;
/// ```
pub struct Overlay {
    fetcher: TemplateFetcher,
    renderer: Renderer,
}

impl Overlay {
    /// Create a pipeline whose renderer rebases `./media_*` references onto
    /// `media_base`.
    pub fn new(media_base: impl Into<String>) -> Self {
        Self {
            fetcher: TemplateFetcher::new(),
            renderer: Renderer::new(media_base),
        }
    }

    /// Create a pipeline with an explicit fetcher and renderer, for callers
    /// that need custom timeouts or the escaping mode.
    pub fn with_parts(fetcher: TemplateFetcher, renderer: Renderer) -> Self {
        Self { fetcher, renderer }
    }

    /// The renderer this pipeline applies after fetching.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Fetch the template at `template_url` and render it against `context`.
    ///
    /// Fetching is the only fallible step; rendering never fails and leaves
    /// unresolved tokens in place.
    pub fn fetch_and_render(&self, template_url: &str, context: &Value) -> ClientResult<String> {
        let template = self.fetcher.fetch(template_url)?;
        debug!(
            "rendering {} byte template against context",
            template.len()
        );
        Ok(self.renderer.render(&template, context))
    }

    /// Like [`Overlay::fetch_and_render`], with any serializable data as the
    /// context.
    pub fn fetch_and_render_data<T: serde::Serialize>(
        &self,
        template_url: &str,
        data: &T,
    ) -> ClientResult<String> {
        let template = self.fetcher.fetch(template_url)?;
        Ok(self.renderer.render_data(&template, data)?)
    }
}
