pub mod fixtures;

use std::path::PathBuf;
use webpreview::{AppConfig, ContentObject, PreviewApp, RenderRequest};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The application described by `tests/fixtures/app.json`.
pub fn app() -> Result<PreviewApp, webpreview::AppError> {
    PreviewApp::from_file(fixture_path("app.json"))
}

/// The fixture application with its configuration adjusted first.
pub fn app_with(
    adjust: impl FnOnce(&mut AppConfig),
) -> Result<PreviewApp, webpreview::AppError> {
    let mut config = AppConfig::from_file(fixture_path("app.json"))?;
    adjust(&mut config);
    PreviewApp::from_config(config)
}

/// A render request for the page `42` of the `corp` webspace.
pub fn page_request(page: ContentObject, locale: &str) -> RenderRequest {
    RenderRequest::new(page, 42u64, "corp", locale)
}
