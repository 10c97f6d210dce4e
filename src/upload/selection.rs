//! Selected files and their preview payloads

use super::constraints::MediaKind;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use url::Url;

/// A file picked in a file input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub size: u64,
    pub path: PathBuf,
}

impl SelectedFile {
    /// Describe a file on disk, taking its size from the filesystem
    pub async fn from_path(path: impl Into<PathBuf>, mime: &str) -> io::Result<Self> {
        let path = path.into();
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            name,
            mime: mime.to_string(),
            size: metadata.len(),
            path,
        })
    }

    /// Read the whole file and encode it as a `data:` URL
    pub async fn read_data_url(&self) -> io::Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(format!("data:{};base64,{}", self.mime, STANDARD.encode(bytes)))
    }

    /// Reference to the file without reading it
    pub fn object_url(&self) -> Option<String> {
        let absolute = if self.path.is_absolute() {
            self.path.clone()
        } else {
            std::env::current_dir().ok()?.join(&self.path)
        };
        Url::from_file_path(absolute).ok().map(String::from)
    }
}

/// What the preview shows for a selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewPayload {
    /// File contents inlined as a `data:` URL
    DataUrl(String),
    /// Reference to the file, contents not read
    ObjectUrl(String),
    /// File information only
    None,
}

impl PreviewPayload {
    pub fn source(&self) -> Option<&str> {
        match self {
            PreviewPayload::DataUrl(s) | PreviewPayload::ObjectUrl(s) => Some(s),
            PreviewPayload::None => None,
        }
    }
}

/// An accepted file together with its preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSelection {
    pub file: SelectedFile,
    pub kind: MediaKind,
    pub preview: PreviewPayload,
}
