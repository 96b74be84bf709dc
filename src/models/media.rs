//! Attachments and inline images.

use super::{Entity, EntityKind};
use crate::errors::{MandrillResult, ModelError};
use crate::types::Params;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Largest file accepted by [`Media::from_file`], in bytes
pub const FILE_SIZE_MAX: u64 = 25_000_000;

/// A file attached to a message, or embedded as an inline image
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Media {
    data: Params,
    file_size: u64,
}

impl Media {
    /// Create empty media
    pub fn new() -> Self {
        Self::default()
    }

    /// Create media from already encoded content
    pub fn from_base64(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut media = Self::new();
        media.data.insert("name".to_string(), Value::String(name.into()));
        media
            .data
            .insert("type".to_string(), Value::String(mime_type.into()));
        media
            .data
            .insert("content".to_string(), Value::String(content.into()));
        media
    }

    /// Create media from raw bytes
    pub fn from_bytes(name: impl Into<String>, mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        let mut media = Self::from_base64(name, mime_type, STANDARD.encode(bytes));
        media.file_size = bytes.len() as u64;
        media
    }

    /// Read a file, base64 encode it and guess its MIME type from the path
    ///
    /// `name` defaults to the file name.
    pub async fn from_file(path: impl AsRef<Path>, name: Option<&str>) -> MandrillResult<Self> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|_| ModelError::MediaFileNotFound {
                path: shown.clone(),
            })?;
        if !metadata.is_file() {
            return Err(ModelError::MediaFileNotFound { path: shown }.into());
        }

        let size = metadata.len();
        if size > FILE_SIZE_MAX {
            return Err(ModelError::MediaFileSizeExceeded {
                path: shown,
                size,
                max: FILE_SIZE_MAX,
            }
            .into());
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|_| ModelError::MediaFileNotFound {
                path: shown.clone(),
            })?;

        let name = match name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| shown.clone()),
        };
        let mime_type = mime_guess::from_path(path).first_or_octet_stream();

        debug!(path = %shown, size, mime = %mime_type, "Loaded media file");

        let mut media = Self::from_bytes(name, mime_type.essence_str(), &bytes);
        media.file_size = size;
        Ok(media)
    }

    /// Size of the source file or bytes, zero when built from encoded content
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// MIME type, when set
    pub fn mime_type(&self) -> Option<&str> {
        self.get_str("type")
    }

    /// Whether the MIME type is `image/*`
    pub fn is_image(&self) -> bool {
        self.mime_type()
            .and_then(|t| t.parse::<mime::Mime>().ok())
            .map(|m| m.type_() == mime::IMAGE)
            .unwrap_or(false)
    }

    /// Whether the media carries content
    pub fn is_valid(&self) -> bool {
        self.get_str("content").map(|c| !c.is_empty()).unwrap_or(false)
    }
}

impl Entity for Media {
    const KIND: EntityKind = EntityKind::Media;

    fn from_data(data: Params) -> Self {
        Self { data, file_size: 0 }
    }

    fn data(&self) -> &Params {
        &self.data
    }

    fn data_mut(&mut self) -> &mut Params {
        &mut self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[tokio::test]
    async fn test_from_file() {
        let mut file = Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();

        let media = Media::from_file(file.path(), Some("logo.png")).await.unwrap();
        assert_eq!(media.get_str("name"), Some("logo.png"));
        assert_eq!(media.mime_type(), Some("image/png"));
        assert_eq!(media.file_size(), 9);
        assert_eq!(media.get_str("content"), Some(STANDARD.encode(b"\x89PNG fake").as_str()));
        assert!(media.is_image());
        assert!(media.is_valid());
    }

    #[tokio::test]
    async fn test_from_file_defaults_name() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"hello").unwrap();

        let media = Media::from_file(file.path(), None).await.unwrap();
        let expected = file.path().file_name().unwrap().to_string_lossy();
        assert_eq!(media.get_str("name"), Some(expected.as_ref()));
        assert_eq!(media.mime_type(), Some("text/plain"));
        assert!(!media.is_image());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = Media::from_file("/nonexistent/file.pdf", None).await.unwrap_err();
        assert!(matches!(
            err,
            crate::MandrillError::Model(ModelError::MediaFileNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_media_is_invalid() {
        assert!(!Media::new().is_valid());
        assert!(!Media::from_base64("a", "image/gif", "").is_valid());
    }
}
