// src/app.rs
use crate::error::AppError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use webpreview_core::{Preview, PreviewConfig, PreviewError, PreviewRenderer, RenderRequest};
use webpreview_kernel::{PARTIAL_SUFFIX, TemplateKernelFactory};
use webpreview_traits::{
    AmbientRequest, CachedKernelFactory, EventListeners, KernelFactory, StaticRouteDefaultsProvider,
    ThreadLocalRequestStack, WebspaceCollection,
};
use webpreview_types::{Parameters, Webspace};

const TEMPLATE_EXTENSION: &str = "hbs";
/// File stem suffix marking the content-only template of a view.
const CONTENT_STEM_SUFFIX: &str = ".content";

/// Everything a preview application is built from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub preview: PreviewConfig,
    #[serde(default)]
    pub webspaces: Vec<Webspace>,
    /// Route defaults per content type.
    #[serde(default)]
    pub routes: BTreeMap<String, Parameters>,
    /// Inline templates by name. They take precedence over files of `template_dir`.
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
    /// A directory of `.hbs` files, named by their path relative to it
    /// (`pages/default.hbs` is the view `pages/default`, and
    /// `pages/default.content.hbs` its partial template).
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads an application file. A relative `templateDir` is resolved
    /// against the directory of the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Failed to read application file '{}': {}", path.display(), e),
            )
        })?;
        let mut config = Self::from_json(&source)?;

        if let (Some(dir), Some(base)) = (&config.template_dir, path.parent())
            && dir.is_relative()
        {
            config.template_dir = Some(base.join(dir));
        }
        Ok(config)
    }

    /// All templates: the files of `template_dir` overlaid with the inline ones.
    pub fn collect_templates(&self) -> Result<BTreeMap<String, String>, AppError> {
        let mut templates = BTreeMap::new();
        if let Some(dir) = &self.template_dir {
            load_template_dir(dir, dir, &mut templates)?;
        }
        templates.extend(self.templates.clone());
        Ok(templates)
    }
}

fn load_template_dir(
    root: &Path,
    dir: &Path,
    templates: &mut BTreeMap<String, String>,
) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            load_template_dir(root, &path, templates)?;
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }
        let Some(name) = template_name(root, &path) else {
            continue;
        };
        debug!("Loading template '{}' from {}", name, path.display());
        templates.insert(name, fs::read_to_string(&path)?);
    }
    Ok(())
}

fn template_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?.with_extension("");
    let name = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect::<Option<Vec<_>>>()?
        .join("/");
    Some(match name.strip_suffix(CONTENT_STEM_SUFFIX) {
        Some(view) => format!("{view}{PARTIAL_SUFFIX}"),
        None => name,
    })
}

/// A preview renderer wired with in-process collaborators.
#[derive(Debug)]
pub struct PreviewApp {
    renderer: PreviewRenderer,
    events: Arc<EventListeners>,
    request_stack: ThreadLocalRequestStack,
}

impl PreviewApp {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        Self::from_config(AppConfig::from_file(path)?)
    }

    /// Builds the application. Templates are compiled up front for the
    /// configured environment so broken templates fail here rather than on
    /// the first preview.
    pub fn from_config(config: AppConfig) -> Result<Self, AppError> {
        let templates = config.collect_templates()?;
        let template_count = templates.len();

        let routes = StaticRouteDefaultsProvider::new();
        for (type_name, defaults) in config.routes {
            routes.add(type_name, defaults)?;
        }

        let kernel_factory = CachedKernelFactory::new(TemplateKernelFactory::new(templates));
        kernel_factory.create(&config.preview.environment)?;

        let webspaces = WebspaceCollection::new(config.webspaces);
        info!(
            "Preview application ready: {} webspace(s), {} route(s), {} template(s), environment '{}'.",
            webspaces.len(),
            routes.len(),
            template_count,
            config.preview.environment
        );

        let events = Arc::new(EventListeners::new());
        let request_stack = ThreadLocalRequestStack::new();
        let renderer = PreviewRenderer::builder()
            .with_route_defaults_provider(Arc::new(routes))
            .with_kernel_factory(Arc::new(kernel_factory))
            .with_webspace_manager(Arc::new(webspaces))
            .with_request_stack(Arc::new(request_stack))
            .with_event_dispatcher(events.clone())
            .with_config(config.preview)
            .build()?;

        Ok(Self {
            renderer,
            events,
            request_stack,
        })
    }

    pub fn renderer(&self) -> &PreviewRenderer {
        &self.renderer
    }

    /// The listener registry notified before every render.
    pub fn events(&self) -> &EventListeners {
        &self.events
    }

    pub fn render(&self, request: &RenderRequest) -> Result<String, PreviewError> {
        self.renderer.render(request)
    }

    /// Renders while `current` is the request being handled on this thread.
    pub fn render_within(
        &self,
        current: AmbientRequest,
        request: &RenderRequest,
    ) -> Result<String, PreviewError> {
        let _scope = self.request_stack.push(current);
        self.renderer.render(request)
    }
}
