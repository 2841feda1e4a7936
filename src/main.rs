use log::info;
use serde::Deserialize;
use serde_json::Value;
use std::env;
use std::fs;
use webpreview::{AmbientRequest, AppError, ContentId, ContentObject, PreviewApp, RenderRequest};

/// The object file: the content to preview and its id.
#[derive(Deserialize)]
struct ObjectFile {
    /// A string or a number.
    id: Value,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    data: Value,
}

impl ObjectFile {
    fn content_id(&self) -> ContentId {
        match &self.id {
            Value::String(id) => ContentId::new(id.as_str()),
            other => ContentId::new(other.to_string()),
        }
    }
}

struct Options {
    app_path: String,
    object_path: String,
    webspace_key: String,
    locale: String,
    partial: bool,
    host: Option<String>,
    target_group_id: Option<String>,
}

fn usage(program: &str) -> ! {
    eprintln!("Renders the preview of a content object through its website templates.");
    eprintln!();
    eprintln!(
        "Usage: {} <path/to/app.json> <path/to/object.json> <webspace> <locale> [--partial] [--host <host>] [--target-group <id>]",
        program
    );
    std::process::exit(1);
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut positional = Vec::new();
    let mut partial = false;
    let mut host = None;
    let mut target_group_id = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--partial" => partial = true,
            "--host" => host = Some(iter.next()?.clone()),
            "--target-group" => target_group_id = Some(iter.next()?.clone()),
            flag if flag.starts_with("--") => return None,
            value => positional.push(value.to_string()),
        }
    }

    let [app_path, object_path, webspace_key, locale]: [String; 4] = positional.try_into().ok()?;
    Some(Options {
        app_path,
        object_path,
        webspace_key,
        locale,
        partial,
        host,
        target_group_id,
    })
}

fn main() -> Result<(), AppError> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("webpreview");
    let Some(options) = parse_args(&args) else {
        usage(program);
    };

    info!("Loading application from {}", options.app_path);
    let app = PreviewApp::from_file(&options.app_path)?;

    info!("Loading object from {}", options.object_path);
    let object: ObjectFile = serde_json::from_str(&fs::read_to_string(&options.object_path)?)?;

    let id = object.content_id();
    let mut request = RenderRequest::new(
        ContentObject::new(object.type_name, object.data),
        id,
        options.webspace_key,
        options.locale,
    )
    .with_partial(options.partial);
    if let Some(target_group_id) = options.target_group_id {
        request = request.with_target_group(target_group_id);
    }

    let html = match options.host {
        Some(host) => app.render_within(AmbientRequest::new(host), &request)?,
        None => app.render(&request)?,
    };
    println!("{}", html);
    Ok(())
}
