//! The simulated request handed to a kernel and the response it returns.

use crate::attributes::{Parameters, RequestAttributes};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Route default holding the previewed object.
pub const OBJECT_KEY: &str = "object";
/// Route default flagging the request as a preview; always `true`.
pub const PREVIEW_KEY: &str = "preview";
/// Route default flagging a partial (content block only) render.
pub const PARTIAL_KEY: &str = "partial";
/// Route default holding the [`RequestAttributes`].
pub const ATTRIBUTES_KEY: &str = "_sulu";

/// The keys every preview request injects into its route defaults.
pub const INJECTED_KEYS: [&str; 4] = [OBJECT_KEY, PREVIEW_KEY, PARTIAL_KEY, ATTRIBUTES_KEY];

/// An unpublished content object: its data and the type tag used to pick
/// a route defaults provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentObject {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub data: Value,
}

impl ContentObject {
    pub fn new(type_name: impl Into<String>, data: Value) -> Self {
        Self {
            type_name: type_name.into(),
            data,
        }
    }
}

/// Route defaults of a preview request.
///
/// The provider's mapping is open-ended; the injected entries (`object`,
/// `preview`, `partial` and `_sulu`) are always present and replace any
/// provider entry with the same key.
#[derive(Debug, Clone)]
pub struct RouteDefaults {
    provided: Parameters,
    object: Arc<ContentObject>,
    partial: bool,
    attributes: Arc<RequestAttributes>,
}

impl RouteDefaults {
    pub fn new(
        mut provided: Parameters,
        object: Arc<ContentObject>,
        partial: bool,
        attributes: Arc<RequestAttributes>,
    ) -> Self {
        for key in INJECTED_KEYS {
            provided.remove(key);
        }
        Self {
            provided,
            object,
            partial,
            attributes,
        }
    }

    /// All keys: the provider's keys followed by the injected ones.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.provided.keys().map(String::as_str).collect();
        keys.extend(INJECTED_KEYS);
        keys
    }

    pub fn contains_key(&self, key: &str) -> bool {
        INJECTED_KEYS.contains(&key) || self.provided.contains_key(key)
    }

    /// Looks up a default as JSON.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            OBJECT_KEY => serde_json::to_value(&*self.object).ok(),
            PREVIEW_KEY => Some(Value::Bool(true)),
            PARTIAL_KEY => Some(Value::Bool(self.partial)),
            ATTRIBUTES_KEY => serde_json::to_value(&*self.attributes).ok(),
            _ => self.provided.get(key).cloned(),
        }
    }

    /// Looks up a provider default holding a string, such as the `view`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.provided.get(key).and_then(Value::as_str)
    }

    /// The provider's entries, without the injected ones.
    pub fn provided(&self) -> &Parameters {
        &self.provided
    }

    pub fn object(&self) -> &ContentObject {
        &self.object
    }

    pub fn is_preview(&self) -> bool {
        true
    }

    pub fn is_partial(&self) -> bool {
        self.partial
    }

    pub fn attributes(&self) -> &Arc<RequestAttributes> {
        &self.attributes
    }

    /// The merged mapping as a JSON object.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        let mut merged = self.provided.clone();
        merged.insert(OBJECT_KEY.to_string(), serde_json::to_value(&*self.object)?);
        merged.insert(PREVIEW_KEY.to_string(), Value::Bool(true));
        merged.insert(PARTIAL_KEY.to_string(), Value::Bool(self.partial));
        merged.insert(
            ATTRIBUTES_KEY.to_string(),
            serde_json::to_value(&*self.attributes)?,
        );
        Ok(Value::Object(merged))
    }
}

/// A request built in-process and dispatched to a kernel without any network round trip.
#[derive(Debug, Clone)]
pub struct SimulatedRequest {
    pub query: Parameters,
    pub body: Parameters,
    pub defaults: RouteDefaults,
    locale: Option<String>,
    headers: BTreeMap<String, String>,
}

impl SimulatedRequest {
    pub fn new(query: Parameters, body: Parameters, defaults: RouteDefaults) -> Self {
        Self {
            query,
            body,
            defaults,
            locale: None,
            headers: BTreeMap::new(),
        }
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Sets a header. Header names are case-insensitive and stored lowercase.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub content: String,
}

impl Response {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            status: 200,
            headers: BTreeMap::new(),
            content: content.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}
