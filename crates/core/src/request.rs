use crate::error::RenderContext;
use std::sync::Arc;
use webpreview_types::{ContentId, ContentObject};

/// The arguments of one preview render.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub object: Arc<ContentObject>,
    pub id: ContentId,
    pub webspace_key: String,
    pub locale: String,
    /// Render only the content block instead of the whole page.
    pub partial: bool,
    pub target_group_id: Option<String>,
}

impl RenderRequest {
    pub fn new(
        object: impl Into<Arc<ContentObject>>,
        id: impl Into<ContentId>,
        webspace_key: impl Into<String>,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            object: object.into(),
            id: id.into(),
            webspace_key: webspace_key.into(),
            locale: locale.into(),
            partial: false,
            target_group_id: None,
        }
    }

    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = partial;
        self
    }

    pub fn with_target_group(mut self, target_group_id: impl Into<String>) -> Self {
        self.target_group_id = Some(target_group_id.into());
        self
    }

    /// The target group id, ignoring an empty one.
    pub fn target_group_id(&self) -> Option<&str> {
        self.target_group_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn context(&self) -> RenderContext {
        RenderContext {
            object_type: self.object.type_name.clone(),
            id: self.id.clone(),
            webspace_key: self.webspace_key.clone(),
            locale: self.locale.clone(),
        }
    }
}
