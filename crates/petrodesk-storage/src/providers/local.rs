//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::StreamExt;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use petrodesk_core::error::{AppError, ErrorKind};
use petrodesk_core::result::AppResult;
use petrodesk_core::traits::storage::{ByteStream, StorageProvider, StoredObjectMeta};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored objects.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative key to an absolute path within the root.
    ///
    /// Keys arrive from client-controlled URLs, so anything other than
    /// plain path segments (`..`, `.`, drive prefixes) is rejected to keep
    /// the resolved path under `root`.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let clean = key.trim_start_matches('/');
        let relative = Path::new(clean);
        if clean.is_empty()
            || relative
                .components()
                .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid object key: {key}")));
        }
        Ok(self.root.join(relative))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn read(&self, key: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve(key)?;
        let file = fs::File::open(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to open object: {key}"),
                    e,
                )
            }
        })?;

        let stream = ReaderStream::new(file);
        Ok(Box::pin(stream.map(|r| r.map(|b| b.into()))))
    }

    async fn write(&self, key: &str, data: Bytes, _mime_type: Option<&str>) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::not_found(format!("Object not found: {key}")))
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(fs::try_exists(self.resolve(key)?).await.unwrap_or(false))
    }

    async fn metadata(&self, key: &str) -> AppResult<StoredObjectMeta> {
        let full_path = self.resolve(key)?;
        let meta = fs::metadata(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to stat: {key}"), e)
            }
        })?;

        Ok(StoredObjectMeta {
            key: key.to_string(),
            size_bytes: meta.len(),
            mime_type: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, storage) = provider().await;
        storage
            .write("a/b/report.pdf", Bytes::from_static(b"%PDF-"), None)
            .await
            .unwrap();

        assert!(storage.exists("a/b/report.pdf").await.unwrap());
        assert_eq!(
            storage.metadata("a/b/report.pdf").await.unwrap().size_bytes,
            5
        );

        let stream = storage.read("a/b/report.pdf").await.unwrap();
        let chunks: Vec<Bytes> = stream.try_collect().await.unwrap();
        assert_eq!(chunks.concat(), b"%PDF-");

        storage.delete("a/b/report.pdf").await.unwrap();
        assert!(!storage.exists("a/b/report.pdf").await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, storage) = provider().await;
        match storage.read("nope").await {
            Err(err) => assert_eq!(err.kind, ErrorKind::NotFound),
            Ok(_) => panic!("read of a missing key should fail"),
        }
    }

    #[tokio::test]
    async fn test_parent_dir_keys_rejected() {
        let (dir, storage) = provider().await;
        tokio::fs::write(dir.path().join("..").join("outside.txt"), b"secret")
            .await
            .unwrap();

        for key in ["../outside.txt", "a/../../outside.txt", "/../outside.txt"] {
            match storage.read(key).await {
                Err(err) => assert_eq!(err.kind, ErrorKind::Validation, "key {key}"),
                Ok(_) => panic!("key {key} escaped the storage root"),
            }
            let err = storage
                .write(key, Bytes::from_static(b"x"), None)
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "key {key}");
            let err = storage.delete(key).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "key {key}");
        }

        tokio::fs::remove_file(dir.path().join("..").join("outside.txt"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_empty_and_dot_keys_rejected() {
        let (_dir, storage) = provider().await;
        for key in ["", "/", "./a.txt"] {
            let err = storage.exists(key).await.map(|_| ()).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "key {key:?}");
        }
    }
}
