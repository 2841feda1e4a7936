//! Preview rendering for webspace-based websites.
//!
//! [`PreviewApp`] wires a [`PreviewRenderer`] from an application file: the
//! preview settings, the webspaces, the route defaults per content type and
//! the handlebars templates of the website.
//!
//! ```ignore
//! use webpreview::{AmbientRequest, ContentObject, PreviewApp, RenderRequest};
//!
//! let app = PreviewApp::from_file("preview.json")?;
//! let page = ContentObject::new("page", serde_json::json!({"title": "Home"}));
//! let html = app.render_within(
//!     AmbientRequest::new("admin.example"),
//!     &RenderRequest::new(page, 42u64, "corp", "en"),
//! )?;
//! ```

pub mod app;
pub mod error;

pub use app::{AppConfig, PreviewApp};
pub use error::AppError;

pub use webpreview_core::{
    ConfigError, ErrorKind, Preview, PreviewConfig, PreviewError, PreviewRenderer, RenderContext,
    RenderRequest,
};
pub use webpreview_kernel::{TemplateKernel, TemplateKernelFactory};
pub use webpreview_traits::{
    AmbientRequest, EventListeners, KernelError, PRE_RENDER, PreRenderEvent, RequestStack,
    ThreadLocalRequestStack,
};
pub use webpreview_types::{ContentId, ContentObject, Webspace};
