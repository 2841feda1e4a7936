//! Kernel and KernelFactory traits: the boundary into the request handler that
//! actually renders a simulated request.

use log::info;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use webpreview_types::{Response, SimulatedRequest};

/// Failures raised while handling a request, tagged by kind at the kernel boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// The request named something that does not exist, typically a template.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Template error: {0}")]
    Template(String),

    /// An HTTP-level failure, optionally wrapping the failure that caused it.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        message: String,
        #[source]
        previous: Option<Box<KernelError>>,
    },

    #[error("Kernel for environment '{environment}' could not be created: {message}")]
    Boot {
        environment: String,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl KernelError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        KernelError::Http {
            status,
            message: message.into(),
            previous: None,
        }
    }

    /// An HTTP failure caused by `previous`.
    pub fn http_with_previous(
        status: u16,
        message: impl Into<String>,
        previous: KernelError,
    ) -> Self {
        KernelError::Http {
            status,
            message: message.into(),
            previous: Some(Box::new(previous)),
        }
    }

    /// The HTTP status a catching kernel answers with.
    pub fn status(&self) -> u16 {
        match self {
            KernelError::InvalidArgument(_) => 404,
            KernelError::Http { status, .. } => *status,
            _ => 500,
        }
    }
}

/// Whether a request is the outermost one or a sub-request embedded in the
/// output of another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestType {
    #[default]
    Main,
    Sub,
}

/// Handles simulated requests.
pub trait Kernel: Send + Sync {
    /// Handles `request`.
    ///
    /// With `catch` set, failures are turned into error responses; without it
    /// they are returned to the caller as `KernelError`s.
    fn handle(
        &self,
        request: SimulatedRequest,
        request_type: RequestType,
        catch: bool,
    ) -> Result<Response, KernelError>;
}

/// Creates the kernel for a deployment environment.
pub trait KernelFactory: Send + Sync {
    fn create(&self, environment: &str) -> Result<Arc<dyn Kernel>, KernelError>;
}

impl<F> KernelFactory for F
where
    F: Fn(&str) -> Result<Arc<dyn Kernel>, KernelError> + Send + Sync,
{
    fn create(&self, environment: &str) -> Result<Arc<dyn Kernel>, KernelError> {
        self(environment)
    }
}

/// Memoizes the kernels of an inner factory per environment.
///
/// Concurrent first calls for the same environment build the kernel once;
/// a failed build is not cached and will be retried by the next call.
pub struct CachedKernelFactory<F> {
    inner: F,
    kernels: Mutex<HashMap<String, Arc<OnceCell<Arc<dyn Kernel>>>>>,
}

impl<F: KernelFactory> CachedKernelFactory<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            kernels: Mutex::new(HashMap::new()),
        }
    }

    /// Number of environments with a kernel slot.
    pub fn len(&self) -> usize {
        self.kernels.lock().map(|k| k.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<F: KernelFactory> KernelFactory for CachedKernelFactory<F> {
    fn create(&self, environment: &str) -> Result<Arc<dyn Kernel>, KernelError> {
        let cell = {
            let mut kernels = self.kernels.lock().map_err(|_| KernelError::Boot {
                environment: environment.to_string(),
                message: "kernel cache lock poisoned".to_string(),
            })?;
            Arc::clone(kernels.entry(environment.to_string()).or_default())
        };

        cell.get_or_try_init(|| {
            info!("Booting kernel for environment '{}'.", environment);
            self.inner.create(environment)
        })
        .cloned()
    }
}

impl<F> fmt::Debug for CachedKernelFactory<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let environments: Vec<String> = self
            .kernels
            .lock()
            .map(|k| k.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("CachedKernelFactory")
            .field("environments", &environments)
            .finish()
    }
}
