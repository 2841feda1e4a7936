//! RouteDefaultsProvider trait for resolving controller defaults of a content type.
//!
//! A provider knows, per content type, which view and controller render an
//! object. The preview renderer asks it for the defaults of the object it is
//! about to render and layers its own entries on top.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;
use webpreview_types::{ContentId, ContentObject, Parameters};

/// Placeholder in a string default that expands to the object's `template` field.
const TEMPLATE_PLACEHOLDER: &str = "{template}";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteDefaultsError {
    #[error("No route defaults registered for type '{0}'")]
    Unsupported(String),

    #[error("Failed to build route defaults for '{type_name}' ({id}): {message}")]
    Failed {
        type_name: String,
        id: String,
        message: String,
    },
}

/// Resolves route defaults for content objects.
pub trait RouteDefaultsProvider: Send + Sync + Debug {
    /// Check whether objects of `type_name` can be routed.
    fn supports(&self, type_name: &str) -> bool;

    /// Returns the controller-visible defaults for rendering `object`.
    ///
    /// The mapping is open-ended; callers must not assume a fixed set of keys.
    fn get_by_entity(
        &self,
        type_name: &str,
        id: &ContentId,
        locale: &str,
        object: &ContentObject,
    ) -> Result<Parameters, RouteDefaultsError>;

    /// Returns a human-readable name for this provider (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A provider with a fixed set of defaults per content type.
///
/// String defaults may contain `{template}`, which expands to the `template`
/// field of the object's data so one registration can serve every page
/// template.
#[derive(Debug, Default)]
pub struct StaticRouteDefaultsProvider {
    routes: RwLock<HashMap<String, Parameters>>,
}

impl StaticRouteDefaultsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the defaults for a content type, replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `RouteDefaultsError::Failed` if the internal lock is poisoned.
    pub fn add(
        &self,
        type_name: impl Into<String>,
        defaults: Parameters,
    ) -> Result<(), RouteDefaultsError> {
        let type_name = type_name.into();
        let mut routes = self.routes.write().map_err(|_| RouteDefaultsError::Failed {
            type_name: type_name.clone(),
            id: String::new(),
            message: "route registry lock poisoned".to_string(),
        })?;
        routes.insert(type_name, defaults);
        Ok(())
    }

    /// Get the number of registered types.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.routes.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RouteDefaultsProvider for StaticRouteDefaultsProvider {
    fn supports(&self, type_name: &str) -> bool {
        self.routes
            .read()
            .map(|r| r.contains_key(type_name))
            .unwrap_or(false)
    }

    fn get_by_entity(
        &self,
        type_name: &str,
        id: &ContentId,
        _locale: &str,
        object: &ContentObject,
    ) -> Result<Parameters, RouteDefaultsError> {
        let routes = self.routes.read().map_err(|_| RouteDefaultsError::Failed {
            type_name: type_name.to_string(),
            id: id.to_string(),
            message: "route registry lock poisoned".to_string(),
        })?;
        let defaults = routes
            .get(type_name)
            .ok_or_else(|| RouteDefaultsError::Unsupported(type_name.to_string()))?;

        let template = object.data.get("template").and_then(|t| t.as_str());
        let mut resolved = Parameters::new();
        for (key, value) in defaults {
            let value = match (value.as_str(), template) {
                (Some(text), Some(template)) if text.contains(TEMPLATE_PLACEHOLDER) => {
                    serde_json::Value::String(text.replace(TEMPLATE_PLACEHOLDER, template))
                }
                (Some(text), None) if text.contains(TEMPLATE_PLACEHOLDER) => {
                    return Err(RouteDefaultsError::Failed {
                        type_name: type_name.to_string(),
                        id: id.to_string(),
                        message: format!("default '{key}' needs a template but the object has none"),
                    });
                }
                _ => value.clone(),
            };
            resolved.insert(key.clone(), value);
        }
        Ok(resolved)
    }

    fn name(&self) -> &'static str {
        "StaticRouteDefaultsProvider"
    }
}
