//! Two-pass template rendering: token substitution, then media rewriting.
//!
//! Templates are processed in two passes:
//!
//! **Pass 1 - Substitution**: every `{{path.to.property}}` token (markers
//! plain or percent-encoded) is replaced with the value at that path in the
//! context, coerced to text. Tokens that do not resolve stay in the output
//! exactly as written.
//!
//! ```text
//! Template: <h1>{{user.name}}</h1> <p>{{user.missing}}</p>
//! After:    <h1>Ada</h1> <p>{{user.missing}}</p>
//! ```
//!
//! **Pass 2 - Media rewrite**: relative `src`/`srcset` references of the form
//! `./media_<tail>` are rebased onto the configured media origin. This pass
//! runs over the substituted output, so media references that arrived via
//! substituted values get rewritten too.
//!
//! ```text
//! Input:  <img src="./media_1a2b.png?width=750">
//! Output: <img src="https://pages.example.net/people/media_1a2b.png?width=750">
//! ```
//!
//! ## Marker Quirk
//!
//! Opening and closing markers are matched independently, so a plain `{{`
//! may close with an encoded `%7D%7D` and vice versa. Deployed templates
//! pass through URL-encoding stages that produce exactly these mixed spans,
//! so the lenient pairing is load-bearing and kept.

mod engine;
mod media;

pub use engine::{substitute, Renderer};
pub use media::rewrite_media_urls;
