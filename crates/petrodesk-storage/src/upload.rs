//! Document upload adapter.
//!
//! Turns raw bytes plus a declared MIME type into a persisted object and a
//! normalized reference record. PDFs take a dedicated path with an explicit
//! generated key and a forced `pdf` format, because extension-based
//! auto-detection mishandles them; images get their dimensions probed; every
//! other type goes through an auto-classified path.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use petrodesk_core::result::AppResult;
use petrodesk_core::traits::storage::StorageProvider;

/// Key prefix for all employee documents.
const KEY_PREFIX: &str = "employees/documents";

/// Normalized record returned for every successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredObject {
    /// Public URL of the stored object.
    pub url: String,
    /// Provider handle, used for later deletion.
    pub storage_key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Detected format (e.g., `pdf`, `png`, `docx`).
    pub format: String,
    /// Resource classification: `raw` for PDFs, `image`, or `auto`.
    pub resource_type: String,
    /// Pixel width, for images.
    pub width: Option<u32>,
    /// Pixel height, for images.
    pub height: Option<u32>,
}

/// Converts inbound binary payloads into stored objects.
#[derive(Debug, Clone)]
pub struct DocumentUploadAdapter {
    storage: Arc<dyn StorageProvider>,
    public_base_url: String,
}

impl DocumentUploadAdapter {
    /// Create a new adapter over the given provider.
    pub fn new(storage: Arc<dyn StorageProvider>, public_base_url: impl Into<String>) -> Self {
        Self {
            storage,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Upload a document and return its normalized reference.
    ///
    /// Provider errors propagate unchanged; nothing is retried here.
    pub async fn upload(
        &self,
        data: Bytes,
        mime_type: &str,
        original_name: &str,
    ) -> AppResult<StoredObject> {
        let key = format!(
            "{KEY_PREFIX}/{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_filename(original_name)
        );
        let size_bytes = data.len() as u64;

        let (format, resource_type, width, height) = if mime_type == "application/pdf" {
            ("pdf".to_string(), "raw".to_string(), None, None)
        } else if mime_type.starts_with("image/") {
            let format = mime_type
                .split('/')
                .nth(1)
                .unwrap_or("bin")
                .to_string();
            // A probe failure only costs us the dimensions, not the upload.
            let dims = match image::load_from_memory(&data) {
                Ok(img) => Some((img.width(), img.height())),
                Err(e) => {
                    warn!(name = original_name, error = %e, "Could not probe image dimensions");
                    None
                }
            };
            (
                format,
                "image".to_string(),
                dims.map(|d| d.0),
                dims.map(|d| d.1),
            )
        } else {
            (extension_of(original_name), "auto".to_string(), None, None)
        };

        self.storage.write(&key, data, Some(mime_type)).await?;
        debug!(key, size_bytes, resource_type, "Uploaded document");

        Ok(StoredObject {
            url: format!("{}/{key}", self.public_base_url),
            storage_key: key,
            size_bytes,
            format,
            resource_type,
            width,
            height,
        })
    }

    /// Delete a stored object by its provider handle.
    pub async fn delete(&self, storage_key: &str) -> AppResult<()> {
        self.storage.delete(storage_key).await
    }
}

/// Replace anything outside `[A-Za-z0-9._-]` so keys stay path- and URL-safe.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// Lowercased file extension, or `bin` when there is none.
fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::LocalStorageProvider;

    async fn adapter() -> (tempfile::TempDir, DocumentUploadAdapter) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        let adapter = DocumentUploadAdapter::new(Arc::new(storage), "http://cdn.local/files/");
        (dir, adapter)
    }

    fn png_bytes(width: u32, height: u32) -> Bytes {
        let img = image::RgbImage::new(width, height);
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        Bytes::from(out.into_inner())
    }

    #[tokio::test]
    async fn test_pdf_takes_raw_path() {
        let (_dir, adapter) = adapter().await;
        let stored = adapter
            .upload(
                Bytes::from_static(b"%PDF-1.4"),
                "application/pdf",
                "HSE Report 2024.pdf",
            )
            .await
            .unwrap();

        assert_eq!(stored.format, "pdf");
        assert_eq!(stored.resource_type, "raw");
        assert_eq!(stored.size_bytes, 8);
        assert!(stored.width.is_none());
        assert!(stored.storage_key.ends_with("HSE_Report_2024.pdf"));
        assert_eq!(
            stored.url,
            format!("http://cdn.local/files/{}", stored.storage_key)
        );
    }

    #[tokio::test]
    async fn test_image_dimensions_probed() {
        let (_dir, adapter) = adapter().await;
        let stored = adapter
            .upload(png_bytes(4, 3), "image/png", "rig.png")
            .await
            .unwrap();

        assert_eq!(stored.resource_type, "image");
        assert_eq!(stored.format, "png");
        assert_eq!(stored.width, Some(4));
        assert_eq!(stored.height, Some(3));
    }

    #[tokio::test]
    async fn test_corrupt_image_still_uploads() {
        let (_dir, adapter) = adapter().await;
        let stored = adapter
            .upload(Bytes::from_static(b"not an image"), "image/png", "bad.png")
            .await
            .unwrap();
        assert_eq!(stored.width, None);
        assert_eq!(stored.height, None);
    }

    #[tokio::test]
    async fn test_other_types_classified_auto() {
        let (_dir, adapter) = adapter().await;
        let stored = adapter
            .upload(
                Bytes::from_static(b"spreadsheet"),
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                "costs.XLSX",
            )
            .await
            .unwrap();
        assert_eq!(stored.resource_type, "auto");
        assert_eq!(stored.format, "xlsx");
    }

    #[tokio::test]
    async fn test_delete_forwards_to_provider() {
        let (_dir, adapter) = adapter().await;
        let stored = adapter
            .upload(Bytes::from_static(b"x"), "application/pdf", "a.pdf")
            .await
            .unwrap();
        adapter.delete(&stored.storage_key).await.unwrap();
        assert!(adapter.delete(&stored.storage_key).await.is_err());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("rapport d'été.pdf"), "rapport_d__t_.pdf");
        assert_eq!(sanitize_filename(""), "file");
    }
}
