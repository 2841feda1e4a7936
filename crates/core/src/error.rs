// src/error.rs
//! Failures of a preview render.
//!
//! Every variant carries the [`RenderContext`] of the call that failed so the
//! caller can report which object could not be previewed.

use std::fmt;
use thiserror::Error;
use webpreview_traits::KernelError;
use webpreview_types::ContentId;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// The arguments of the render call that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub object_type: String,
    pub id: ContentId,
    pub webspace_key: String,
    pub locale: String,
}

impl fmt::Display for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' in webspace '{}' ({})",
            self.object_type, self.id, self.webspace_key, self.locale
        )
    }
}

/// The kind of a [`PreviewError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    RouteDefaultsProviderNotFound,
    WebspaceNotFound,
    WebspaceLocalizationNotFound,
    MissingRequest,
    TemplateNotFound,
    TemplateRender,
    Unexpected,
}

#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("No route defaults provider supports {context}")]
    RouteDefaultsProviderNotFound { context: RenderContext },

    #[error("Webspace not found for {context}")]
    WebspaceNotFound { context: RenderContext },

    #[error("Webspace has no localization for {context}")]
    WebspaceLocalizationNotFound { context: RenderContext },

    /// A portal had to be synthesized but no request is being handled to take the host from.
    #[error("No current request to resolve the host for {context}")]
    MissingRequest { context: RenderContext },

    #[error("Template not found for {context}: {source}")]
    TemplateNotFound {
        context: RenderContext,
        source: KernelError,
    },

    #[error("Template rendering failed for {context}: {source}")]
    TemplateRender {
        context: RenderContext,
        source: KernelError,
    },

    #[error("Unexpected error while rendering {context}: {source}")]
    Unexpected {
        context: RenderContext,
        source: BoxedError,
    },
}

impl PreviewError {
    /// Classifies a kernel failure.
    pub fn from_kernel(context: RenderContext, error: KernelError) -> Self {
        match error {
            KernelError::InvalidArgument(_) => PreviewError::TemplateNotFound {
                context,
                source: error,
            },
            KernelError::Template(_) => PreviewError::TemplateRender {
                context,
                source: error,
            },
            other => PreviewError::Unexpected {
                context,
                source: Box::new(other),
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PreviewError::RouteDefaultsProviderNotFound { .. } => {
                ErrorKind::RouteDefaultsProviderNotFound
            }
            PreviewError::WebspaceNotFound { .. } => ErrorKind::WebspaceNotFound,
            PreviewError::WebspaceLocalizationNotFound { .. } => {
                ErrorKind::WebspaceLocalizationNotFound
            }
            PreviewError::MissingRequest { .. } => ErrorKind::MissingRequest,
            PreviewError::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            PreviewError::TemplateRender { .. } => ErrorKind::TemplateRender,
            PreviewError::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }

    pub fn context(&self) -> &RenderContext {
        match self {
            PreviewError::RouteDefaultsProviderNotFound { context }
            | PreviewError::WebspaceNotFound { context }
            | PreviewError::WebspaceLocalizationNotFound { context }
            | PreviewError::MissingRequest { context }
            | PreviewError::TemplateNotFound { context, .. }
            | PreviewError::TemplateRender { context, .. }
            | PreviewError::Unexpected { context, .. } => context,
        }
    }
}
