// src/error.rs
use thiserror::Error;
use webpreview_core::{ConfigError, PreviewError};
use webpreview_traits::{KernelError, RouteDefaultsError};

/// A comprehensive error type for loading and running a preview application.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Application file is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Route registration failed: {0}")]
    Routes(#[from] RouteDefaultsError),

    #[error("Kernel failed to boot: {0}")]
    Kernel(#[from] KernelError),

    #[error("Preview failed: {0}")]
    Preview(#[from] PreviewError),
}
