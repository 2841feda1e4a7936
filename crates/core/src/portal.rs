//! Portal synthesis for locales no portal serves.
//!
//! A webspace may declare a localization that none of its portals publish.
//! Such content can still be previewed: a single-portal copy of the webspace
//! is built around the host of the current request.

use log::info;
use std::sync::Arc;
use webpreview_types::{Environment, MatchType, Portal, PortalInformation, Url, Webspace};

/// Builds a full-match portal information for `locale` on `host`.
///
/// The webspace and localization are copied before they are changed, so the
/// shared configuration is never touched. Returns `None` if the webspace
/// does not declare `locale`.
pub fn synthesize_portal_information(
    webspace: &Webspace,
    host: &str,
    locale: &str,
    environment: &str,
) -> Option<PortalInformation> {
    let mut webspace = webspace.clone();
    let mut localization = webspace.localization(locale)?.clone();
    localization.x_default = true;

    let portal = Portal {
        name: webspace.name.clone(),
        key: webspace.key.clone(),
        localizations: vec![localization.clone()],
        default_localization: Some(localization.clone()),
        x_default_localization: Some(localization.clone()),
        environments: vec![Environment::new(
            environment,
            vec![Url::new(host, environment)],
        )],
    };
    webspace.portals = vec![portal.clone()];

    info!(
        "Synthesized portal '{}' for locale '{}' on host '{}'.",
        portal.key, locale, host
    );

    Some(PortalInformation::new(
        MatchType::Full,
        Arc::new(webspace),
        Some(portal),
        Some(localization),
        host,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpreview_types::Localization;

    fn webspace() -> Webspace {
        Webspace {
            key: "corp".into(),
            name: "Corporate".into(),
            localizations: vec![Localization::new("en", None), Localization::new("fr", None)],
            portals: vec![Portal {
                name: "Corporate EN".into(),
                key: "corp_en".into(),
                localizations: vec![Localization::new("en", None)],
                ..Default::default()
            }],
        }
    }

    #[test]
    fn builds_single_portal_for_host() {
        let info =
            synthesize_portal_information(&webspace(), "preview.local", "fr", "dev").unwrap();

        assert_eq!(info.match_type, MatchType::Full);
        assert_eq!(info.url, "preview.local");
        assert_eq!(info.localization.as_ref().unwrap().locale(), "fr");
        assert!(info.localization.as_ref().unwrap().x_default);

        let portal = info.portal.as_ref().unwrap();
        assert_eq!(portal.key, "corp");
        assert_eq!(portal.name, "Corporate");
        assert_eq!(portal.localizations.len(), 1);
        assert_eq!(portal.default_localization, portal.x_default_localization);
        assert_eq!(portal.environments.len(), 1);
        let env = portal.environment("dev").unwrap();
        assert_eq!(env.urls, vec![Url::new("preview.local", "dev")]);

        assert_eq!(info.webspace.portals.len(), 1);
        assert_eq!(&info.webspace.portals[0], portal);
    }

    #[test]
    fn leaves_source_webspace_untouched() {
        let original = webspace();
        let _ = synthesize_portal_information(&original, "preview.local", "fr", "dev");

        assert_eq!(original, webspace());
        assert!(!original.localizations[1].x_default);
    }

    #[test]
    fn unknown_locale_yields_none() {
        assert!(synthesize_portal_information(&webspace(), "preview.local", "de", "dev").is_none());
    }
}
