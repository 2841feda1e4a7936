//! Renders previews of unpublished content.
//!
//! A preview is rendered by building the request a visitor of the content's
//! portal would send and handing it to the website kernel in-process:
//!
//! 1. the route defaults provider must support the object's type
//! 2. the first portal information serving the webspace and locale is used,
//!    or one is synthesized around the current request's host
//! 3. request attributes are built from the portal information and the
//!    parameters of the current request, if any
//! 4. the provider's route defaults are merged with `object`, `preview`,
//!    `partial` and `_sulu`
//! 5. the `pre-render` event is dispatched, then the kernel handles the request
//!    and its failures are mapped onto [`PreviewError`]

use crate::config::{ConfigError, PreviewConfig};
use crate::error::{PreviewError, RenderContext};
use crate::portal::synthesize_portal_information;
use crate::request::RenderRequest;
use log::{debug, info};
use std::fmt;
use std::sync::Arc;
use webpreview_traits::{
    EventDispatcher, EventListeners, KernelError, KernelFactory, PRE_RENDER, PreRenderEvent,
    RequestStack, RequestType, RouteDefaultsProvider, ThreadLocalRequestStack, WebspaceManager,
};
use webpreview_types::{
    Parameters, PortalInformation, RequestAttributes, Response, RouteDefaults, SimulatedRequest,
};

/// Renders a content object as it would appear on its website.
pub trait Preview: Send + Sync {
    fn render(&self, request: &RenderRequest) -> Result<String, PreviewError>;
}

pub struct PreviewRenderer {
    route_defaults: Arc<dyn RouteDefaultsProvider>,
    request_stack: Arc<dyn RequestStack>,
    kernel_factory: Arc<dyn KernelFactory>,
    webspace_manager: Arc<dyn WebspaceManager>,
    event_dispatcher: Arc<dyn EventDispatcher>,
    config: PreviewConfig,
}

impl PreviewRenderer {
    pub fn builder() -> PreviewRendererBuilder {
        PreviewRendererBuilder::default()
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Resolves the portal information for the request: the first one the
    /// webspace manager knows, otherwise a synthesized one.
    fn portal_information(
        &self,
        request: &RenderRequest,
        context: &RenderContext,
    ) -> Result<Arc<PortalInformation>, PreviewError> {
        let found = self
            .webspace_manager
            .find_portal_informations_by_webspace_key_and_locale(
                &request.webspace_key,
                &request.locale,
                &self.config.environment,
            );

        match found.into_iter().next() {
            Some(portal_information) => {
                debug!(
                    "Previewing {} through portal url '{}'.",
                    context, portal_information.url
                );
                Ok(portal_information)
            }
            None => self.create_portal_information(request, context).map(Arc::new),
        }
    }

    fn create_portal_information(
        &self,
        request: &RenderRequest,
        context: &RenderContext,
    ) -> Result<PortalInformation, PreviewError> {
        let webspace = self
            .webspace_manager
            .find_webspace_by_key(&request.webspace_key)
            .ok_or_else(|| PreviewError::WebspaceNotFound {
                context: context.clone(),
            })?;

        let host = self
            .request_stack
            .current_request()
            .map(|current| current.host)
            .ok_or_else(|| PreviewError::MissingRequest {
                context: context.clone(),
            })?;

        info!(
            "No portal serves {}, synthesizing one for host '{}'.",
            context, host
        );
        synthesize_portal_information(&webspace, &host, &request.locale, &self.config.environment)
            .ok_or_else(|| PreviewError::WebspaceLocalizationNotFound {
                context: context.clone(),
            })
    }

    /// Dispatches the request to the environment's kernel. Exceptions are not
    /// caught by the kernel; an HTTP failure caused by another failure is
    /// replaced by its cause.
    fn handle(&self, request: SimulatedRequest) -> Result<Response, KernelError> {
        let kernel = self.kernel_factory.create(&self.config.environment)?;

        kernel
            .handle(request, RequestType::Main, false)
            .map_err(|error| match error {
                KernelError::Http {
                    previous: Some(previous),
                    ..
                } => *previous,
                other => other,
            })
    }
}

impl Preview for PreviewRenderer {
    fn render(&self, request: &RenderRequest) -> Result<String, PreviewError> {
        let type_name = request.object.type_name.as_str();
        let context = request.context();

        if !self.route_defaults.supports(type_name) {
            return Err(PreviewError::RouteDefaultsProviderNotFound { context });
        }

        let portal_information = self.portal_information(request, &context)?;
        let webspace = Arc::clone(&portal_information.webspace);
        let localization = webspace
            .localization(&request.locale)
            .cloned()
            .ok_or_else(|| PreviewError::WebspaceLocalizationNotFound {
                context: context.clone(),
            })?;

        let (query, body) = match self.request_stack.current_request() {
            Some(current) => (current.query, current.body),
            None => (Parameters::new(), Parameters::new()),
        };

        let attributes = Arc::new(RequestAttributes {
            webspace,
            locale: request.locale.clone(),
            localization,
            portal: portal_information.portal.clone(),
            portal_url: portal_information.url.clone(),
            resource_locator_prefix: portal_information.prefix().to_string(),
            get_parameters: query.clone(),
            post_parameters: body.clone(),
            analytics_key: self.config.defaults.analytics_key.clone(),
            portal_information: Arc::clone(&portal_information),
        });

        let provided = self
            .route_defaults
            .get_by_entity(type_name, &request.id, &request.locale, &request.object)
            .map_err(|e| PreviewError::Unexpected {
                context: context.clone(),
                source: Box::new(e),
            })?;
        let defaults = RouteDefaults::new(
            provided,
            Arc::clone(&request.object),
            request.partial,
            Arc::clone(&attributes),
        );

        let mut simulated = SimulatedRequest::new(query, body, defaults);
        simulated.set_locale(request.locale.clone());
        if let (Some(header), Some(target_group_id)) =
            (self.config.target_group_header(), request.target_group_id())
        {
            simulated.set_header(header, target_group_id);
        }

        self.event_dispatcher
            .dispatch(PRE_RENDER, &PreRenderEvent::new(attributes));

        let response = self
            .handle(simulated)
            .map_err(|error| PreviewError::from_kernel(context, error))?;

        Ok(response.into_content())
    }
}

impl fmt::Debug for PreviewRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreviewRenderer")
            .field("route_defaults", &self.route_defaults.name())
            .field("webspace_manager", &self.webspace_manager)
            .field("config", &self.config)
            .finish()
    }
}

/// A builder for creating a [`PreviewRenderer`].
///
/// The route defaults provider, kernel factory and webspace manager are
/// required. Without a request stack the calling thread's stack is used;
/// without an event dispatcher no listener is notified.
#[derive(Default)]
pub struct PreviewRendererBuilder {
    route_defaults: Option<Arc<dyn RouteDefaultsProvider>>,
    request_stack: Option<Arc<dyn RequestStack>>,
    kernel_factory: Option<Arc<dyn KernelFactory>>,
    webspace_manager: Option<Arc<dyn WebspaceManager>>,
    event_dispatcher: Option<Arc<dyn EventDispatcher>>,
    config: PreviewConfig,
}

impl PreviewRendererBuilder {
    pub fn with_route_defaults_provider(
        mut self,
        provider: Arc<dyn RouteDefaultsProvider>,
    ) -> Self {
        self.route_defaults = Some(provider);
        self
    }

    pub fn with_request_stack(mut self, request_stack: Arc<dyn RequestStack>) -> Self {
        self.request_stack = Some(request_stack);
        self
    }

    pub fn with_kernel_factory(mut self, kernel_factory: Arc<dyn KernelFactory>) -> Self {
        self.kernel_factory = Some(kernel_factory);
        self
    }

    pub fn with_webspace_manager(mut self, webspace_manager: Arc<dyn WebspaceManager>) -> Self {
        self.webspace_manager = Some(webspace_manager);
        self
    }

    pub fn with_event_dispatcher(mut self, event_dispatcher: Arc<dyn EventDispatcher>) -> Self {
        self.event_dispatcher = Some(event_dispatcher);
        self
    }

    pub fn with_config(mut self, config: PreviewConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<PreviewRenderer, ConfigError> {
        Ok(PreviewRenderer {
            route_defaults: self
                .route_defaults
                .ok_or(ConfigError::MissingCollaborator("route defaults provider"))?,
            request_stack: self
                .request_stack
                .unwrap_or_else(|| Arc::new(ThreadLocalRequestStack::new())),
            kernel_factory: self
                .kernel_factory
                .ok_or(ConfigError::MissingCollaborator("kernel factory"))?,
            webspace_manager: self
                .webspace_manager
                .ok_or(ConfigError::MissingCollaborator("webspace manager"))?,
            event_dispatcher: self
                .event_dispatcher
                .unwrap_or_else(|| Arc::new(EventListeners::new())),
            config: self.config,
        })
    }
}
