use crate::portal_information::PortalInformation;
use crate::webspace::{Localization, Portal, Webspace};
use serde::Serialize;
use std::sync::Arc;

/// Query or body parameters of a request.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// The webspace context of a request as seen by controllers and templates.
///
/// Built once per request and never mutated afterwards; it is shared by
/// `Arc` between the request and any listener that observes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestAttributes {
    pub webspace: Arc<Webspace>,
    pub locale: String,
    pub localization: Localization,
    pub portal: Option<Portal>,
    pub portal_url: String,
    pub resource_locator_prefix: String,
    pub get_parameters: Parameters,
    pub post_parameters: Parameters,
    pub analytics_key: String,
    #[serde(skip)]
    pub portal_information: Arc<PortalInformation>,
}

impl RequestAttributes {
    pub fn webspace_key(&self) -> &str {
        &self.webspace.key
    }

    pub fn portal_key(&self) -> Option<&str> {
        self.portal.as_ref().map(|p| p.key.as_str())
    }
}
