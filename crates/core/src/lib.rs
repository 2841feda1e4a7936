//! # webpreview-core
//!
//! Renders previews of unpublished content through an in-process kernel.
//!
//! - **renderer**: [`PreviewRenderer`], which assembles and dispatches the preview request
//! - **portal**: portal synthesis for locales no portal serves
//! - **config**: construction-time settings
//! - **error**: the [`PreviewError`] taxonomy
//!
//! All collaborators (route defaults, webspaces, request stack, events and the
//! kernel) are reached through the traits of `webpreview-traits`.

// Re-export foundation crates
pub use webpreview_traits as traits;
pub use webpreview_types as types;

pub mod config;
pub mod error;
pub mod portal;
pub mod renderer;
pub mod request;

pub use config::{ConfigError, PreviewConfig, PreviewDefaults};
pub use error::{ErrorKind, PreviewError, RenderContext};
pub use portal::synthesize_portal_information;
pub use renderer::{Preview, PreviewRenderer, PreviewRendererBuilder};
pub use request::RenderRequest;
