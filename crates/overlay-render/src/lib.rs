//! # Overlay Render - HTML placeholder substitution
//!
//! `overlay-render` fills remotely-authored HTML templates with profile data.
//! Templates carry `{{path.to.property}}` placeholder tokens (the markers may
//! arrive URL-percent-encoded), values come from a nested JSON context, and a
//! second pass rewrites relative `./media_*` attribute references to absolute
//! URLs against a configured origin.
//!
//! The crate is the rendering foundation for the `overlay` toolkit, but has
//! no I/O of its own and can be used anywhere a template string and a context
//! are already in hand.
//!
//! ## Core Concepts
//!
//! - [`Renderer`]: the full pipeline of token substitution, then media rewrite
//! - [`substitute`]: the token pass alone, for callers without media concerns
//! - [`slugify`] / [`unslugify`]: display name ↔ URL-friendly slug
//!
//! ## Quick Start
//!
//! ```rust
//! use overlay_render::Renderer;
//! use serde_json::json;
//!
//! let renderer = Renderer::new("https://pages.example.net/people");
//! let context = json!({"user": {"name": "Ada Lovelace", "title": "Engineer"}});
//!
//! let html = renderer.render(
//!     r#"<h1>{{user.name}}</h1><img src="./media_portrait.png">"#,
//!     &context,
//! );
//!
//! assert_eq!(
//!     html,
//!     r#"<h1>Ada Lovelace</h1><img src="https://pages.example.net/people/media_portrait.png">"#
//! );
//! ```
//!
//! ## Fail-Open Substitution
//!
//! A token whose path does not resolve is not an error: the matched text is
//! left in the output exactly as found, markers included. Partial data never
//! breaks a whole page, and rendering the unresolved output again with the
//! same context is a no-op. Only the [`Renderer::render_data`] convenience is
//! fallible, and only because `Serialize` → JSON conversion can fail.
//!
//! ## No Escaping by Default
//!
//! Substituted values are inserted into the page raw. Context data therefore
//! has to be trusted (or escaped) upstream; see [`Renderer::escape_values`]
//! for the opt-in escaping mode.

pub mod context;
pub mod error;
pub mod slug;
pub mod template;

pub use context::{format_value, resolve_path};
pub use error::RenderError;
pub use slug::{slugify, unslugify};
pub use template::{rewrite_media_urls, substitute, Renderer};
