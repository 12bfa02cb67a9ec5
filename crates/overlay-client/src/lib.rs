//! # Overlay Client - HTTP collaborators for overlay rendering
//!
//! The renderer in `overlay-render` is a pure transform; this crate supplies
//! the I/O around it:
//!
//! - [`TemplateFetcher`]: fetch template text over HTTP
//! - [`ProfileClient`]: resolve a slug to a profile record against a backing
//!   directory API (public mock listing or internal query endpoint)
//! - [`Overlay`]: the composed fetch-and-render pipeline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use overlay_client::{Overlay, ProfileClient, ProfileSource};
//!
//! let profiles = ProfileClient::new(ProfileSource::Internal {
//!     base_url: "https://profiles.internal.example.net/api/user".into(),
//!     access_code: Some("s3cret".into()),
//! });
//! let overlay = Overlay::new("https://pages.example.net/people");
//!
//! let record = profiles.lookup("ada-lovelace").unwrap();
//! let html = overlay
//!     .fetch_and_render("https://pages.example.net/people/profile-template", &record)
//!     .unwrap();
//! # let _ = html;
//! ```
//!
//! Fetching is the only fallible step of the pipeline; rendering degrades to
//! leaving unresolved tokens in place. Transport and HTTP-status failures are
//! typed in [`ClientError`].

pub mod error;
pub mod fetch;
pub mod overlay;
pub mod profiles;

pub use error::{ClientError, ClientResult};
pub use fetch::TemplateFetcher;
pub use overlay::Overlay;
pub use profiles::{profile_slug, ProfileClient, ProfileSource};
