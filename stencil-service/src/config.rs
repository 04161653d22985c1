use serde::{Deserialize, Serialize};
use std::time::Duration;
use stencil_blobstore::BlobStoreConfig;

/// Settings for a [`TemplateService`](crate::TemplateService), built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub blob_store: BlobStoreConfig,
    /// Lifetime of presigned download URLs.
    pub presign_ttl_secs: u64,
    /// Largest accepted upload.
    pub max_upload_bytes: usize,
}

impl ServiceConfig {
    pub fn presign_ttl(&self) -> Duration {
        Duration::from_secs(self.presign_ttl_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            blob_store: BlobStoreConfig::default(),
            presign_ttl_secs: 10 * 60,
            max_upload_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}
