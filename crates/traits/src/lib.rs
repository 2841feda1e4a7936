pub mod events;
pub mod kernel;
pub mod request_stack;
pub mod routing;
pub mod webspace;

pub use events::{EventDispatcher, EventListeners, PRE_RENDER, PreRenderEvent};
pub use kernel::{CachedKernelFactory, Kernel, KernelError, KernelFactory, RequestType};
pub use request_stack::{AmbientRequest, RequestScope, RequestStack, ThreadLocalRequestStack};
pub use routing::{RouteDefaultsError, RouteDefaultsProvider, StaticRouteDefaultsProvider};
pub use webspace::{WebspaceCollection, WebspaceManager};
