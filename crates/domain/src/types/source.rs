//! Source documents
//!
//! [`SourceBuilder`] collects creation input and enforces that exactly one
//! kind of content is supplied. [`Source`] is the hydrated server record.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::SOURCES_PATH;
use crate::errors::{FanellaError, Result};
use crate::types::facets::{
    Archivable, Archival, BackgroundTask, BackgroundTasked, Owned, Ownership,
};
use crate::types::resource::{null_as_default, RawRecord, Resource, ResourceMeta};

/// One ingested document, as described by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Source {
    #[serde(flatten)]
    pub meta: ResourceMeta,
    #[serde(flatten)]
    pub ownership: Ownership,
    #[serde(flatten)]
    pub task: BackgroundTask,
    #[serde(flatten)]
    pub archival: Archival,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_id: Option<i64>,
    #[serde(default)]
    pub external_type: Option<String>,
    #[serde(default)]
    pub version: Option<i64>,
    #[serde(default)]
    pub size_bytes: Option<i64>,
    /// Fields the server sent that this client does not model
    #[serde(flatten)]
    pub extra: RawRecord,
}

impl Resource for Source {
    const PATH: &'static str = SOURCES_PATH;

    fn meta(&self) -> &ResourceMeta {
        &self.meta
    }
}

impl Owned for Source {
    fn ownership(&self) -> &Ownership {
        &self.ownership
    }
}

impl Archivable for Source {
    fn archival(&self) -> &Archival {
        &self.archival
    }
}

impl BackgroundTasked for Source {
    fn background_task(&self) -> &BackgroundTask {
        &self.task
    }
}

/// The one kind of content a new source is created from
pub enum SourceInput {
    Text(String),
    Link(String),
    /// Read asynchronously at upload time
    FilePath(PathBuf),
    Bytes(Vec<u8>),
    /// Read to end-of-stream at upload time
    Reader(Box<dyn Read + Send>),
}

impl SourceInput {
    /// Wire-facing label, used in logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Link(_) => "link",
            Self::FilePath(_) => "file_path",
            Self::Bytes(_) => "bytes",
            Self::Reader(_) => "reader",
        }
    }
}

impl fmt::Debug for SourceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Self::Link(link) => f.debug_tuple("Link").field(link).finish(),
            Self::FilePath(path) => f.debug_tuple("FilePath").field(path).finish(),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Self::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

/// Validated creation input for a [`Source`]
#[derive(Debug)]
pub struct NewSource {
    name: Option<String>,
    input: SourceInput,
}

impl NewSource {
    pub fn builder() -> SourceBuilder {
        SourceBuilder::default()
    }

    /// Shorthand for a text source
    pub fn text(text: impl Into<String>) -> Result<Self> {
        Self::builder().text(text).build()
    }

    /// Shorthand for a link source
    pub fn link(link: impl Into<String>) -> Result<Self> {
        Self::builder().link(link).build()
    }

    /// Shorthand for a file source; the name defaults to the file's base name
    pub fn file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::builder().file_path(path).build()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn input(&self) -> &SourceInput {
        &self.input
    }

    pub fn into_parts(self) -> (Option<String>, SourceInput) {
        (self.name, self.input)
    }

    /// Client-side fields merged under the server reply during hydration.
    pub fn local_record(name: &str, link: Option<&str>, text: Option<&str>) -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(link) = link {
            record.insert("link".to_string(), Value::String(link.to_string()));
        }
        if let Some(text) = text {
            record.insert("text".to_string(), Value::String(text.to_string()));
        }
        record
    }
}

/// Collects the optional creation inputs of a source.
///
/// Exactly one of `text`, `link`, `file_path`, `bytes` or `reader` must be
/// supplied. Empty strings and empty buffers count as not supplied.
#[derive(Default)]
pub struct SourceBuilder {
    name: Option<String>,
    text: Option<String>,
    link: Option<String>,
    file_path: Option<PathBuf>,
    bytes: Option<Vec<u8>>,
    reader: Option<Box<dyn Read + Send>>,
}

impl SourceBuilder {
    /// Display name; also used as the uploaded file name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn bytes(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.bytes = Some(bytes.into());
        self
    }

    pub fn reader(mut self, reader: impl Read + Send + 'static) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Validate the exclusive-or constraint.
    ///
    /// # Errors
    /// Returns `FanellaError::InvalidInput` when zero or several inputs are
    /// supplied.
    pub fn build(self) -> Result<NewSource> {
        let name = self.name.filter(|n| !n.is_empty());

        let mut inputs = Vec::with_capacity(1);
        if let Some(text) = self.text.filter(|t| !t.is_empty()) {
            inputs.push(SourceInput::Text(text));
        }
        if let Some(link) = self.link.filter(|l| !l.is_empty()) {
            inputs.push(SourceInput::Link(link));
        }
        if let Some(path) = self.file_path.filter(|p| !p.as_os_str().is_empty()) {
            inputs.push(SourceInput::FilePath(path));
        }
        if let Some(bytes) = self.bytes.filter(|b| !b.is_empty()) {
            inputs.push(SourceInput::Bytes(bytes));
        }
        if let Some(reader) = self.reader {
            inputs.push(SourceInput::Reader(reader));
        }

        match inputs.len() {
            1 => {
                let input = inputs.remove(0);
                Ok(NewSource { name, input })
            }
            0 => Err(FanellaError::InvalidInput(
                "one of text, link, file_path, bytes or reader is required".to_string(),
            )),
            _ => {
                let kinds: Vec<&str> = inputs.iter().map(SourceInput::kind).collect();
                Err(FanellaError::InvalidInput(format!(
                    "only one source input is allowed, got {}",
                    kinds.join(", ")
                )))
            }
        }
    }
}
