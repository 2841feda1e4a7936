use serde_json::{Map, Value, json};
use webpreview::ContentObject;

/// A page rendered with the `pages/<template>` view.
pub fn page(title: &str, template: &str) -> ContentObject {
    ContentObject::new("page", json!({"title": title, "template": template}))
}

pub fn home_page() -> ContentObject {
    page("Home", "default")
}

/// Turns a JSON object literal into request parameters.
pub fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}
