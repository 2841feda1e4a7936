//! A request kernel that renders simulated requests with handlebars templates.
//!
//! The view to render is taken from the `view` route default. Partial
//! requests and sub-requests render the `<view>:content` template instead,
//! which by convention holds only the content block of the page.
//!
//! Templates see the merged route defaults at the top level (`object`,
//! `preview`, `partial`, `_sulu` and every provider default) plus a `request`
//! object with `locale`, `query`, `body` and `headers`.

mod factory;

pub use factory::TemplateKernelFactory;

use handlebars::Handlebars;
use log::{debug, warn};
use serde_json::{Value, json};
use webpreview_traits::{Kernel, KernelError, RequestType};
use webpreview_types::{Response, SimulatedRequest};

/// Route default naming the template to render.
pub const VIEW_KEY: &str = "view";
/// Suffix of the template used for partial renders.
pub const PARTIAL_SUFFIX: &str = ":content";

pub struct TemplateKernel {
    registry: Handlebars<'static>,
    environment: String,
}

impl TemplateKernel {
    pub fn new(environment: impl Into<String>) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        Self {
            registry,
            environment: environment.into(),
        }
    }

    /// Compiles and registers a template under `name`.
    pub fn register_template(&mut self, name: &str, source: &str) -> Result<(), KernelError> {
        self.registry
            .register_template_string(name, source)
            .map_err(|e| KernelError::Template(format!("template '{name}' does not compile: {e}")))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn template_name(
        request: &SimulatedRequest,
        request_type: RequestType,
    ) -> Result<String, KernelError> {
        let view = request.defaults.get_str(VIEW_KEY).ok_or_else(|| {
            KernelError::InvalidArgument("the route has no 'view' default".to_string())
        })?;
        // A sub-request embeds its output in another page.
        if request.defaults.is_partial() || request_type == RequestType::Sub {
            Ok(format!("{view}{PARTIAL_SUFFIX}"))
        } else {
            Ok(view.to_string())
        }
    }

    fn render(
        &self,
        request: &SimulatedRequest,
        request_type: RequestType,
    ) -> Result<Response, KernelError> {
        let name = Self::template_name(request, request_type)?;
        if !self.registry.has_template(&name) {
            return Err(KernelError::InvalidArgument(format!(
                "Unable to find template \"{name}\""
            )));
        }

        let mut context = request
            .defaults
            .to_value()
            .map_err(|e| KernelError::Other(format!("route defaults are not serializable: {e}")))?;
        if let Value::Object(map) = &mut context {
            map.insert(
                "request".to_string(),
                json!({
                    "locale": request.locale(),
                    "query": request.query,
                    "body": request.body,
                    "headers": request.headers(),
                }),
            );
        }

        debug!("Rendering '{}' in environment '{}'.", name, self.environment);
        let content = self
            .registry
            .render(&name, &context)
            .map_err(|e| KernelError::Template(e.to_string()))?;

        Ok(Response::new(content).with_header("content-type", "text/html; charset=UTF-8"))
    }
}

impl Kernel for TemplateKernel {
    fn handle(
        &self,
        request: SimulatedRequest,
        request_type: RequestType,
        catch: bool,
    ) -> Result<Response, KernelError> {
        debug!("Handling {:?} request.", request_type);
        match self.render(&request, request_type) {
            Ok(response) => Ok(response),
            Err(e) if catch => {
                warn!("Converting kernel failure into an error response: {}", e);
                Ok(Response::new(e.to_string()).with_status(e.status()))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use webpreview_types::{
        ContentObject, Localization, MatchType, Parameters, PortalInformation, RequestAttributes,
        RouteDefaults, Webspace,
    };

    fn request(view: Option<&str>, partial: bool) -> SimulatedRequest {
        let webspace = Arc::new(Webspace {
            key: "corp".into(),
            name: "Corporate".into(),
            ..Default::default()
        });
        let info = PortalInformation::new(
            MatchType::Full,
            Arc::clone(&webspace),
            None,
            Some(Localization::new("en", None)),
            "corp.example/en",
        );
        let attributes = Arc::new(RequestAttributes {
            webspace,
            locale: "en".into(),
            localization: Localization::new("en", None),
            portal: None,
            portal_url: "corp.example/en".into(),
            resource_locator_prefix: "/en".into(),
            get_parameters: Parameters::new(),
            post_parameters: Parameters::new(),
            analytics_key: "UA-TEST".into(),
            portal_information: Arc::new(info),
        });
        let mut provided = Parameters::new();
        if let Some(view) = view {
            provided.insert(VIEW_KEY.into(), json!(view));
        }
        let defaults = RouteDefaults::new(
            provided,
            Arc::new(ContentObject::new("page", json!({"title": "Home"}))),
            partial,
            attributes,
        );
        let mut request = SimulatedRequest::new(Parameters::new(), Parameters::new(), defaults);
        request.set_locale("en");
        request
    }

    fn kernel() -> TemplateKernel {
        let mut kernel = TemplateKernel::new("prod");
        kernel
            .register_template(
                "page",
                "<h1>{{object.data.title}}</h1>{{_sulu.webspace.name}} {{request.locale}}",
            )
            .unwrap();
        kernel
            .register_template("page:content", "<p>{{object.data.title}}</p>")
            .unwrap();
        kernel
            .register_template("broken", "{{object.data.missing}}")
            .unwrap();
        kernel
    }

    #[test]
    fn renders_view_with_defaults_and_attributes() {
        let response = kernel()
            .handle(request(Some("page"), false), RequestType::Main, false)
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.content(), "<h1>Home</h1>Corporate en");
    }

    #[test]
    fn partial_renders_content_template() {
        let response = kernel()
            .handle(request(Some("page"), true), RequestType::Main, false)
            .unwrap();
        assert_eq!(response.content(), "<p>Home</p>");
    }

    #[test]
    fn sub_requests_render_content_template() {
        let response = kernel()
            .handle(request(Some("page"), false), RequestType::Sub, false)
            .unwrap();
        assert_eq!(response.content(), "<p>Home</p>");
    }

    #[test]
    fn unknown_view_is_invalid_argument() {
        let result = kernel().handle(request(Some("missing"), false), RequestType::Main, false);
        assert!(matches!(result, Err(KernelError::InvalidArgument(_))));

        let result = kernel().handle(request(None, false), RequestType::Main, false);
        assert!(matches!(result, Err(KernelError::InvalidArgument(_))));
    }

    #[test]
    fn strict_mode_failures_are_template_errors() {
        let result = kernel().handle(request(Some("broken"), false), RequestType::Main, false);
        assert!(matches!(result, Err(KernelError::Template(_))));
    }

    #[test]
    fn catching_turns_failures_into_responses() {
        let response = kernel()
            .handle(request(Some("missing"), false), RequestType::Main, true)
            .unwrap();
        assert_eq!(response.status, 404);

        let response = kernel()
            .handle(request(Some("broken"), false), RequestType::Main, true)
            .unwrap();
        assert_eq!(response.status, 500);
    }

    #[test]
    fn invalid_template_source_is_rejected() {
        let mut kernel = TemplateKernel::new("prod");
        let result = kernel.register_template("bad", "{{#if}}");
        assert!(matches!(result, Err(KernelError::Template(_))));
        assert!(!kernel.has_template("bad"));
    }
}
