use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Analytics key handed to templates when none is configured.
pub const DEFAULT_ANALYTICS_KEY: &str = "UA-SULU-PREVIEW-KEY";
pub const DEFAULT_ENVIRONMENT: &str = "prod";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid preview configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preview renderer is missing its {0}")]
    MissingCollaborator(&'static str),
}

/// Values every preview request carries regardless of the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewDefaults {
    pub analytics_key: String,
}

impl Default for PreviewDefaults {
    fn default() -> Self {
        Self {
            analytics_key: DEFAULT_ANALYTICS_KEY.to_string(),
        }
    }
}

/// Construction-time settings of a preview renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviewConfig {
    pub defaults: PreviewDefaults,
    /// The environment used to look up portal urls and to create the kernel.
    pub environment: String,
    /// Header carrying the target group of a segmented preview.
    pub target_group_header: Option<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            defaults: PreviewDefaults::default(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            target_group_header: None,
        }
    }
}

impl PreviewConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn with_analytics_key(mut self, analytics_key: impl Into<String>) -> Self {
        self.defaults.analytics_key = analytics_key.into();
        self
    }

    pub fn with_target_group_header(mut self, header: impl Into<String>) -> Self {
        self.target_group_header = Some(header.into());
        self
    }

    /// The configured target group header, ignoring an empty name.
    pub fn target_group_header(&self) -> Option<&str> {
        self.target_group_header
            .as_deref()
            .filter(|header| !header.is_empty())
    }
}
