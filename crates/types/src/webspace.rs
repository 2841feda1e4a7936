//! The webspace configuration model.
//!
//! A [`Webspace`] groups content for a set of [`Localization`]s and is
//! published through one or more [`Portal`]s. Each portal lists the urls it
//! answers to per deployment [`Environment`].

use serde::{Deserialize, Serialize};

/// A language (optionally narrowed to a country) a webspace or portal serves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Marks the localization used when a request names none.
    #[serde(default)]
    pub default: bool,
    /// Marks the localization advertised as `x-default` alternate.
    #[serde(default)]
    pub x_default: bool,
}

impl Localization {
    pub fn new(language: impl Into<String>, country: Option<&str>) -> Self {
        Self {
            language: language.into(),
            country: country.map(str::to_string),
            default: false,
            x_default: false,
        }
    }

    /// Parses a locale such as `en` or `de_at` (a `-` separator is accepted too).
    pub fn from_locale(locale: &str) -> Self {
        match locale.split_once(['_', '-']) {
            Some((language, country)) => Self::new(language, Some(country)),
            None => Self::new(locale, None),
        }
    }

    /// The locale string, `language` or `language_country` with a lowercase country.
    pub fn locale(&self) -> String {
        match &self.country {
            Some(country) => format!("{}_{}", self.language, country.to_lowercase()),
            None => self.language.clone(),
        }
    }

    /// Compares against a locale string without regard to case or separator.
    pub fn matches(&self, locale: &str) -> bool {
        self.locale().eq_ignore_ascii_case(&locale.replace('-', "_"))
    }
}

/// A url a portal answers to in one environment.
///
/// The url may contain a `{localization}` placeholder which expands to the
/// locale of each portal localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Url {
    pub url: String,
    pub environment: String,
    /// Pins the url to one language of the portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(default)]
    pub main: bool,
}

impl Url {
    pub fn new(url: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            environment: environment.into(),
            language: None,
            redirect: None,
            main: false,
        }
    }
}

/// The urls of a portal for one deployment environment (`dev`, `stage`, `prod`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub urls: Vec<Url>,
}

impl Environment {
    pub fn new(kind: impl Into<String>, urls: Vec<Url>) -> Self {
        Self {
            kind: kind.into(),
            urls,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portal {
    pub name: String,
    pub key: String,
    #[serde(default)]
    pub localizations: Vec<Localization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_localization: Option<Localization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_default_localization: Option<Localization>,
    #[serde(default)]
    pub environments: Vec<Environment>,
}

impl Portal {
    pub fn environment(&self, kind: &str) -> Option<&Environment> {
        self.environments.iter().find(|env| env.kind == kind)
    }

    pub fn localization(&self, locale: &str) -> Option<&Localization> {
        self.localizations.iter().find(|l| l.matches(locale))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webspace {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub localizations: Vec<Localization>,
    #[serde(default)]
    pub portals: Vec<Portal>,
}

impl Webspace {
    /// Finds the localization for `locale`, if the webspace declares it.
    pub fn localization(&self, locale: &str) -> Option<&Localization> {
        self.localizations.iter().find(|l| l.matches(locale))
    }

    pub fn default_localization(&self) -> Option<&Localization> {
        self.localizations
            .iter()
            .find(|l| l.default)
            .or_else(|| self.localizations.first())
    }

    pub fn portal(&self, key: &str) -> Option<&Portal> {
        self.portals.iter().find(|p| p.key == key)
    }
}
