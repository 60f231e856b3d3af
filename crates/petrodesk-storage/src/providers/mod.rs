//! Storage provider implementations.

pub mod local;
pub mod s3;

use std::sync::Arc;

use petrodesk_core::config::storage::StorageConfig;
use petrodesk_core::error::AppError;
use petrodesk_core::result::AppResult;
use petrodesk_core::traits::storage::StorageProvider;

pub use local::LocalStorageProvider;
pub use s3::S3StorageProvider;

/// Construct the storage provider named in configuration.
pub async fn from_config(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    match config.provider.as_str() {
        "local" => {
            let provider = LocalStorageProvider::new(&config.local.root_path).await?;
            Ok(Arc::new(provider))
        }
        "s3" => {
            let provider = S3StorageProvider::new(&config.s3).await?;
            Ok(Arc::new(provider))
        }
        other => Err(AppError::configuration(format!(
            "Unknown storage provider: '{other}'. Supported: local, s3"
        ))),
    }
}
