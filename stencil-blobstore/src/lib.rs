//! Blob storage boundary for Stencil.
//!
//! Uploaded PDF, HTML and image templates keep their bytes outside the
//! template record. The record only stores [`BlobStore::object_url`], an
//! `https` URL that passes template validation. Time-limited access goes
//! through [`BlobStore::presigned_url`].
//!
//! Deployments back [`BlobStore`] with their object storage of choice;
//! [`MemoryBlobStore`] serves tests and the CLI.

mod error;
mod memory;
mod signing;

pub use error::{BlobStoreError, BlobStoreResult};
pub use memory::MemoryBlobStore;
pub use signing::UrlSigner;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stencil_types::BlobKey;

/// Where blobs live and how their URLs are built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobStoreConfig {
    /// Bucket (namespace) every key is stored under.
    pub bucket: String,
    /// Base of public object URLs, without a trailing slash.
    pub public_base_url: String,
    /// Secret mixed into presigned URL signatures.
    pub signing_secret: String,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            bucket: "templates".to_string(),
            public_base_url: "https://blobs.localhost".to_string(),
            signing_secret: "stencil-dev-secret".to_string(),
        }
    }
}

/// What the store records about a blob besides its bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub size: u64,
    /// Lowercase hex SHA-256 of the bytes.
    pub sha256: String,
    pub created_at: DateTime<Utc>,
}

/// Object storage operations used by the upload flow.
pub trait BlobStore: Send + Sync {
    fn bucket(&self) -> &str;

    /// Stores `data` under `key`, replacing any previous blob.
    fn put(&self, key: &BlobKey, data: &[u8], content_type: &str) -> BlobStoreResult<BlobMetadata>;

    fn get(&self, key: &BlobKey) -> BlobStoreResult<Vec<u8>>;

    fn metadata(&self, key: &BlobKey) -> BlobStoreResult<BlobMetadata>;

    fn delete(&self, key: &BlobKey) -> BlobStoreResult<()>;

    /// Stable URL recorded on templates that reference this blob.
    fn object_url(&self, key: &BlobKey) -> String;

    /// URL granting read access until `ttl` from now.
    fn presigned_url(&self, key: &BlobKey, ttl: Duration) -> BlobStoreResult<String>;
}
