//! Access to the inbound request being handled on the current thread.
//!
//! Preview renders are often triggered while another request is handled (an
//! admin UI posting form data, for example). The renderer inherits that
//! request's parameters and host through a [`RequestStack`].

use std::cell::RefCell;
use std::fmt::Debug;
use std::marker::PhantomData;
use webpreview_types::Parameters;

/// The parts of an inbound request a preview render inherits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmbientRequest {
    pub host: String,
    pub query: Parameters,
    pub body: Parameters,
}

impl AmbientRequest {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, query: Parameters) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Parameters) -> Self {
        self.body = body;
        self
    }
}

pub trait RequestStack: Send + Sync + Debug {
    /// The innermost request currently being handled, if any.
    fn current_request(&self) -> Option<AmbientRequest>;
}

thread_local! {
    static REQUESTS: RefCell<Vec<AmbientRequest>> = const { RefCell::new(Vec::new()) };
}

/// A request stack kept per thread.
///
/// A request is pushed when handling starts and popped when the returned
/// [`RequestScope`] is dropped, so concurrent handlers on other threads
/// never observe each other's requests. All instances share the calling
/// thread's stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadLocalRequestStack;

impl ThreadLocalRequestStack {
    pub fn new() -> Self {
        Self
    }

    /// Makes `request` the current request until the scope is dropped.
    #[must_use = "the request is popped as soon as the scope is dropped"]
    pub fn push(&self, request: AmbientRequest) -> RequestScope {
        let depth = REQUESTS.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(request);
            stack.len() - 1
        });
        RequestScope {
            depth,
            _thread_bound: PhantomData,
        }
    }

    /// Number of requests on the current thread's stack.
    pub fn depth(&self) -> usize {
        REQUESTS.with(|stack| stack.borrow().len())
    }
}

impl RequestStack for ThreadLocalRequestStack {
    fn current_request(&self) -> Option<AmbientRequest> {
        REQUESTS.with(|stack| stack.borrow().last().cloned())
    }
}

/// Removes its request, and every request pushed after it, from the
/// thread's stack on drop.
///
/// Not `Send`: it must be dropped on the thread that pushed it.
#[derive(Debug)]
pub struct RequestScope {
    depth: usize,
    _thread_bound: PhantomData<*const ()>,
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        REQUESTS.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}
