use crate::webspace::{Localization, Portal, Webspace};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How a url matched a portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// The url matched including its localization.
    #[default]
    Full,
    /// The url matched the portal but not a localization.
    Partial,
    /// The url is a redirect to another url.
    Redirect,
}

/// The resolved context of a url: which webspace, portal and localization it serves.
///
/// Instances returned by a webspace manager are shared read-only through
/// `Arc`; the webspace is reference-counted so lookups stay cheap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalInformation {
    pub match_type: MatchType,
    pub webspace: Arc<Webspace>,
    pub portal: Option<Portal>,
    pub localization: Option<Localization>,
    /// The url without scheme, e.g. `example.com/en`.
    pub url: String,
    pub redirect: Option<String>,
    pub main: bool,
    pub priority: i32,
}

impl PortalInformation {
    pub fn new(
        match_type: MatchType,
        webspace: Arc<Webspace>,
        portal: Option<Portal>,
        localization: Option<Localization>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            match_type,
            webspace,
            portal,
            localization,
            url: url.into(),
            redirect: None,
            main: false,
            priority: 0,
        }
    }

    /// The host part of the url.
    pub fn host(&self) -> &str {
        let url = strip_scheme(&self.url);
        url.split('/').next().unwrap_or(url)
    }

    /// The resource locator prefix: the path part of the url without a
    /// trailing slash, or an empty string when the url has no path.
    pub fn prefix(&self) -> &str {
        let url = strip_scheme(&self.url);
        match url.find('/') {
            Some(index) => url[index..].trim_end_matches('/'),
            None => "",
        }
    }

    pub fn webspace_key(&self) -> &str {
        &self.webspace.key
    }

    pub fn portal_key(&self) -> Option<&str> {
        self.portal.as_ref().map(|p| p.key.as_str())
    }
}

fn strip_scheme(url: &str) -> &str {
    url.split_once("://").map_or(url, |(_, rest)| rest)
}
