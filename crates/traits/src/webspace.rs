//! WebspaceManager trait for looking up webspaces and their portal informations.

use log::debug;
use std::fmt::Debug;
use std::sync::Arc;
use webpreview_types::{Localization, MatchType, Portal, PortalInformation, Url, Webspace};

const LOCALIZATION_PLACEHOLDER: &str = "{localization}";

/// Read-only access to the configured webspaces.
pub trait WebspaceManager: Send + Sync + Debug {
    /// Returns every portal information of `webspace_key` serving `locale` in
    /// `environment`, in configuration order. The result may be empty.
    fn find_portal_informations_by_webspace_key_and_locale(
        &self,
        webspace_key: &str,
        locale: &str,
        environment: &str,
    ) -> Vec<Arc<PortalInformation>>;

    fn find_webspace_by_key(&self, webspace_key: &str) -> Option<Arc<Webspace>>;
}

/// An in-memory webspace registry.
///
/// Portal informations are derived from the portal urls of each environment:
/// - a url containing `{localization}` yields a full match per portal
///   localization, with the placeholder expanded to its locale
/// - a url pinned to a `language` yields a full match for the portal
///   localizations of that language
/// - any other url yields a partial match for the portal's default localization
#[derive(Debug, Default, Clone)]
pub struct WebspaceCollection {
    webspaces: Vec<Arc<Webspace>>,
}

impl WebspaceCollection {
    pub fn new(webspaces: Vec<Webspace>) -> Self {
        Self {
            webspaces: webspaces.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn webspaces(&self) -> &[Arc<Webspace>] {
        &self.webspaces
    }

    pub fn len(&self) -> usize {
        self.webspaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.webspaces.is_empty()
    }

    /// All portal informations of one environment across every webspace.
    pub fn portal_informations(&self, environment: &str) -> Vec<PortalInformation> {
        self.webspaces
            .iter()
            .flat_map(|webspace| {
                webspace.portals.iter().flat_map(move |portal| {
                    portal
                        .environment(environment)
                        .into_iter()
                        .flat_map(|env| env.urls.iter())
                        .flat_map(move |url| expand_url(webspace, portal, url))
                })
            })
            .collect()
    }
}

fn expand_url(webspace: &Arc<Webspace>, portal: &Portal, url: &Url) -> Vec<PortalInformation> {
    let match_type = if url.redirect.is_some() {
        MatchType::Redirect
    } else {
        MatchType::Full
    };

    let build = |match_type: MatchType, localization: Option<&Localization>, address: String| {
        let mut info = PortalInformation::new(
            match_type,
            Arc::clone(webspace),
            Some(portal.clone()),
            localization.cloned(),
            address,
        );
        info.redirect = url.redirect.clone();
        info.main = url.main;
        info
    };

    if url.url.contains(LOCALIZATION_PLACEHOLDER) {
        portal
            .localizations
            .iter()
            .map(|localization| {
                let address = url.url.replace(LOCALIZATION_PLACEHOLDER, &localization.locale());
                build(match_type, Some(localization), address)
            })
            .collect()
    } else if let Some(language) = &url.language {
        portal
            .localizations
            .iter()
            .filter(|localization| &localization.language == language)
            .map(|localization| build(match_type, Some(localization), url.url.clone()))
            .collect()
    } else {
        let localization = portal
            .default_localization
            .as_ref()
            .or_else(|| portal.localizations.iter().find(|l| l.default))
            .or_else(|| portal.localizations.first());
        let match_type = if match_type == MatchType::Redirect {
            match_type
        } else {
            MatchType::Partial
        };
        vec![build(match_type, localization, url.url.clone())]
    }
}

impl WebspaceManager for WebspaceCollection {
    fn find_portal_informations_by_webspace_key_and_locale(
        &self,
        webspace_key: &str,
        locale: &str,
        environment: &str,
    ) -> Vec<Arc<PortalInformation>> {
        let found: Vec<Arc<PortalInformation>> = self
            .portal_informations(environment)
            .into_iter()
            .filter(|info| info.webspace_key() == webspace_key)
            .filter(|info| {
                info.localization
                    .as_ref()
                    .is_some_and(|localization| localization.matches(locale))
            })
            .map(Arc::new)
            .collect();
        debug!(
            "Found {} portal information(s) for webspace '{}' in '{}' ({}).",
            found.len(),
            webspace_key,
            locale,
            environment
        );
        found
    }

    fn find_webspace_by_key(&self, webspace_key: &str) -> Option<Arc<Webspace>> {
        self.webspaces
            .iter()
            .find(|webspace| webspace.key == webspace_key)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpreview_types::Environment;

    fn portal(urls: Vec<Url>) -> Portal {
        Portal {
            name: "Corporate".into(),
            key: "corp".into(),
            localizations: vec![
                Localization::new("en", None),
                Localization::new("de", None),
                Localization::new("de", Some("at")),
            ],
            default_localization: None,
            x_default_localization: None,
            environments: vec![Environment::new("prod", urls)],
        }
    }

    fn collection(urls: Vec<Url>) -> WebspaceCollection {
        WebspaceCollection::new(vec![Webspace {
            key: "corp".into(),
            name: "Corporate".into(),
            localizations: vec![
                Localization::new("en", None),
                Localization::new("de", None),
                Localization::new("de", Some("at")),
                Localization::new("fr", None),
            ],
            portals: vec![portal(urls)],
        }])
    }

    #[test]
    fn expands_localization_placeholder() {
        let webspaces = collection(vec![Url::new("corp.example/{localization}", "prod")]);

        let found =
            webspaces.find_portal_informations_by_webspace_key_and_locale("corp", "de_at", "prod");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "corp.example/de_at");
        assert_eq!(found[0].match_type, MatchType::Full);
        assert_eq!(found[0].prefix(), "/de_at");
    }

    #[test]
    fn language_pinned_url_matches_that_language() {
        let mut url = Url::new("corp.de", "prod");
        url.language = Some("de".into());
        let webspaces = collection(vec![url]);

        assert_eq!(
            webspaces
                .find_portal_informations_by_webspace_key_and_locale("corp", "de", "prod")
                .len(),
            1
        );
        assert!(
            webspaces
                .find_portal_informations_by_webspace_key_and_locale("corp", "en", "prod")
                .is_empty()
        );
    }

    #[test]
    fn plain_url_is_partial_match_for_default_localization() {
        let webspaces = collection(vec![Url::new("corp.example", "prod")]);

        let found =
            webspaces.find_portal_informations_by_webspace_key_and_locale("corp", "en", "prod");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].match_type, MatchType::Partial);
    }

    #[test]
    fn keeps_configuration_order() {
        let webspaces = collection(vec![
            Url::new("first.example/{localization}", "prod"),
            Url::new("second.example/{localization}", "prod"),
        ]);

        let found =
            webspaces.find_portal_informations_by_webspace_key_and_locale("corp", "en", "prod");
        let urls: Vec<&str> = found.iter().map(|info| info.url.as_str()).collect();
        assert_eq!(urls, vec!["first.example/en", "second.example/en"]);
    }

    #[test]
    fn other_environments_and_unserved_locales_are_empty() {
        let webspaces = collection(vec![Url::new("corp.example/{localization}", "prod")]);

        assert!(
            webspaces
                .find_portal_informations_by_webspace_key_and_locale("corp", "en", "dev")
                .is_empty()
        );
        assert!(
            webspaces
                .find_portal_informations_by_webspace_key_and_locale("corp", "fr", "prod")
                .is_empty()
        );
        assert!(
            webspaces
                .find_portal_informations_by_webspace_key_and_locale("other", "en", "prod")
                .is_empty()
        );
    }

    #[test]
    fn finds_webspace_by_key() {
        let webspaces = collection(vec![]);
        assert_eq!(
            webspaces.find_webspace_by_key("corp").map(|w| w.name.clone()),
            Some("Corporate".into())
        );
        assert!(webspaces.find_webspace_by_key("missing").is_none());
        assert_eq!(webspaces.len(), 1);
    }
}
