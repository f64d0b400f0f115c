//! Source creation (upload)
//!
//! A new source is sent as a plain form when it only carries text or a link,
//! and as multipart when it carries file content. The server reply is merged
//! over the locally known fields before hydration.

use std::io::Read;
use std::path::{Path, PathBuf};

use fanella_domain::{hydrate_over, FanellaError, NewSource, Source, SourceInput};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::endpoint::RequestBody;
use super::errors::ApiError;
use super::resources::ResourceClient;

/// Client for the `/sources` collection
pub type Sources = ResourceClient<Source>;

/// Upload-ready view of a [`NewSource`]
#[derive(Debug)]
struct PreparedSource {
    name: String,
    link: Option<String>,
    text: Option<String>,
    file: Option<Vec<u8>>,
}

impl ResourceClient<Source> {
    /// Create a source and hydrate the server's record of it.
    ///
    /// # Errors
    /// - `FanellaError::UnknownMimeType` (wrapped in `ApiError::Domain`) when
    ///   file content is present but its name has no known extension. No
    ///   request is sent in that case.
    /// - `ApiError::Io` when the file or reader cannot be read
    /// - any error from the create call
    #[instrument(skip(self, source), fields(kind = source.input().kind()))]
    pub async fn create(&self, source: NewSource) -> Result<Source, ApiError> {
        let prepared = prepare(source).await?;
        let body = request_body(&prepared)?;

        info!(name = %prepared.name, has_file = prepared.file.is_some(), "creating source");
        let reply: Value = self.endpoint().create(body).await?;

        let Value::Object(record) = reply else {
            return Err(FanellaError::Hydration("create reply is not a JSON object".into()).into());
        };
        let local = NewSource::local_record(
            &prepared.name,
            prepared.link.as_deref(),
            prepared.text.as_deref(),
        );
        let created: Source = hydrate_over(local, record)?;
        debug!(id = created.meta.id, "source created");
        Ok(created)
    }
}

/// Read a whole file asynchronously.
///
/// Returns the path as given together with its content.
pub async fn read_file(path: impl AsRef<Path>) -> Result<(PathBuf, Vec<u8>), ApiError> {
    let path = path.as_ref().to_path_buf();
    let content = tokio::fs::read(&path).await?;
    debug!(path = %path.display(), bytes = content.len(), "read file");
    Ok((path, content))
}

/// Content type guessed from the extension of `name`.
///
/// # Errors
/// Returns `FanellaError::UnknownMimeType` when the extension is missing or
/// not mapped.
pub fn content_type_for(name: &str) -> Result<String, ApiError> {
    mime_guess::from_path(name)
        .first_raw()
        .map(str::to_string)
        .ok_or_else(|| FanellaError::UnknownMimeType(name.to_string()).into())
}

async fn prepare(source: NewSource) -> Result<PreparedSource, ApiError> {
    let (name, input) = source.into_parts();

    let (name, link, text, file) = match input {
        SourceInput::Text(text) => (name, None, Some(text), None),
        SourceInput::Link(link) => (name, Some(link), None, None),
        SourceInput::FilePath(path) => {
            let (path, content) = read_file(&path).await?;
            let name = name.or_else(|| base_name(&path));
            (name, None, None, Some(content))
        }
        SourceInput::Bytes(bytes) => (name, None, None, Some(bytes)),
        SourceInput::Reader(reader) => (name, None, None, Some(read_to_end(reader).await?)),
    };

    Ok(PreparedSource { name: name.unwrap_or_default(), link, text, file })
}

fn base_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

async fn read_to_end(mut reader: Box<dyn Read + Send>) -> Result<Vec<u8>, ApiError> {
    tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).map(|_| buf)
    })
    .await
    .map_err(|e| ApiError::Io(format!("reader task failed: {}", e)))?
    .map_err(ApiError::from)
}

fn text_fields(prepared: &PreparedSource) -> Vec<(String, String)> {
    let mut fields = Vec::with_capacity(3);
    if let Some(link) = &prepared.link {
        fields.push(("link".to_string(), link.clone()));
    }
    if let Some(text) = &prepared.text {
        fields.push(("text".to_string(), text.clone()));
    }
    fields.push(("name".to_string(), prepared.name.clone()));
    fields
}

fn request_body(prepared: &PreparedSource) -> Result<RequestBody, ApiError> {
    let fields = text_fields(prepared);

    let Some(content) = &prepared.file else {
        return Ok(RequestBody::Form(fields));
    };

    let content_type = content_type_for(&prepared.name)?;
    let part = Part::bytes(content.clone())
        .file_name(prepared.name.clone())
        .mime_str(&content_type)?;

    let form = fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value))
        .part("file", part);
    Ok(RequestBody::Multipart(form))
}
