//! Image files selected for upload.

use std::path::Path;

use crate::request::FilePart;
use crate::AdminError;

/// Multipart field name the upload endpoint expects.
pub const UPLOAD_FIELD: &str = "file";

/// An image read from disk, not yet uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Wrap in-memory image bytes, inferring the content type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, AdminError> {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name)?.to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Read an image from disk, refusing files larger than `limit` bytes
    /// before their contents are loaded.
    pub fn from_path(path: impl AsRef<Path>, limit: u64) -> Result<Self, AdminError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        content_type_for(&file_name)?;
        let size = std::fs::metadata(path)?.len();
        if size > limit {
            return Err(AdminError::ImageTooLarge {
                file_name,
                size,
                limit,
            });
        }
        let bytes = std::fs::read(path)?;
        Self::new(file_name, bytes)
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Reject files larger than `limit` bytes.
    pub fn ensure_within(&self, limit: u64) -> Result<(), AdminError> {
        if self.size() > limit {
            return Err(AdminError::ImageTooLarge {
                file_name: self.file_name.clone(),
                size: self.size(),
                limit,
            });
        }
        Ok(())
    }

    /// Convert into the multipart field sent to the upload endpoint.
    pub fn to_part(&self) -> FilePart {
        FilePart {
            field: UPLOAD_FIELD.to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

fn content_type_for(file_name: &str) -> Result<&'static str, AdminError> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        "svg" => Ok("image/svg+xml"),
        _ => Err(AdminError::UnsupportedImage(file_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_catalog::config::DEFAULT_MAX_IMAGE_BYTES;

    #[test]
    fn test_content_type_from_extension() {
        let img = ImageFile::new("Red.JPG", vec![0; 4]).unwrap();
        assert_eq!(img.content_type, "image/jpeg");
        assert!(matches!(
            ImageFile::new("notes.txt", Vec::new()),
            Err(AdminError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn test_size_limit() {
        let limit = DEFAULT_MAX_IMAGE_BYTES;
        let exact = ImageFile::new("a.png", vec![0; limit as usize]).unwrap();
        assert!(exact.ensure_within(limit).is_ok());

        let over = ImageFile::new("b.png", vec![0; limit as usize + 1]).unwrap();
        match over.ensure_within(limit) {
            Err(AdminError::ImageTooLarge { size, limit: l, .. }) => {
                assert_eq!(size, limit + 1);
                assert_eq!(l, limit);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blue.webp");
        std::fs::write(&path, b"RIFF").unwrap();

        let img = ImageFile::from_path(&path, DEFAULT_MAX_IMAGE_BYTES).unwrap();
        assert_eq!(img.file_name, "blue.webp");
        assert_eq!(img.content_type, "image/webp");
        assert_eq!(img.size(), 4);
        assert_eq!(img.to_part().field, "file");
    }

    #[test]
    fn test_from_path_rejects_oversized_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("poster.png");
        std::fs::write(&path, vec![0u8; 10]).unwrap();

        match ImageFile::from_path(&path, 4) {
            Err(AdminError::ImageTooLarge { file_name, size, limit }) => {
                assert_eq!(file_name, "poster.png");
                assert_eq!(size, 10);
                assert_eq!(limit, 4);
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(ImageFile::from_path(&path, 10).is_ok());
    }
}
