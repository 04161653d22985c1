use crate::{BlobMetadata, BlobStore, BlobStoreConfig, BlobStoreError, BlobStoreResult, UrlSigner};
use chrono::{TimeDelta, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use stencil_types::BlobKey;
use tracing::debug;

struct StoredBlob {
    data: Vec<u8>,
    metadata: BlobMetadata,
}

/// Process-local blob store for tests and one-shot CLI runs.
pub struct MemoryBlobStore {
    bucket: String,
    signer: UrlSigner,
    blobs: RwLock<HashMap<BlobKey, StoredBlob>>,
}

impl MemoryBlobStore {
    pub fn new(config: &BlobStoreConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            signer: UrlSigner::new(config),
            blobs: RwLock::new(HashMap::new()),
        }
    }

    pub fn signer(&self) -> &UrlSigner {
        &self.signer
    }

    /// Metadata of every stored blob, oldest first.
    pub fn list(&self) -> BlobStoreResult<Vec<BlobMetadata>> {
        let blobs = self.blobs.read().map_err(|_| poisoned())?;
        let mut items: Vec<BlobMetadata> = blobs.values().map(|b| b.metadata.clone()).collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.key.cmp(&b.key)));
        Ok(items)
    }

    fn not_found(&self, key: &BlobKey) -> BlobStoreError {
        BlobStoreError::NotFound(self.bucket.clone(), key.to_string())
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new(&BlobStoreConfig::default())
    }
}

fn poisoned() -> BlobStoreError {
    BlobStoreError::Storage("blob store lock poisoned".to_string())
}

impl BlobStore for MemoryBlobStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put(&self, key: &BlobKey, data: &[u8], content_type: &str) -> BlobStoreResult<BlobMetadata> {
        let metadata = BlobMetadata {
            bucket: self.bucket.clone(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            size: data.len() as u64,
            sha256: hex::encode(Sha256::digest(data)),
            created_at: Utc::now(),
        };
        let blob = StoredBlob {
            data: data.to_vec(),
            metadata: metadata.clone(),
        };
        self.blobs.write().map_err(|_| poisoned())?.insert(*key, blob);
        debug!(bucket = %self.bucket, key = %key, size_bytes = data.len(), "Blob stored");
        Ok(metadata)
    }

    fn get(&self, key: &BlobKey) -> BlobStoreResult<Vec<u8>> {
        self.blobs
            .read()
            .map_err(|_| poisoned())?
            .get(key)
            .map(|b| b.data.clone())
            .ok_or_else(|| self.not_found(key))
    }

    fn metadata(&self, key: &BlobKey) -> BlobStoreResult<BlobMetadata> {
        self.blobs
            .read()
            .map_err(|_| poisoned())?
            .get(key)
            .map(|b| b.metadata.clone())
            .ok_or_else(|| self.not_found(key))
    }

    fn delete(&self, key: &BlobKey) -> BlobStoreResult<()> {
        self.blobs
            .write()
            .map_err(|_| poisoned())?
            .remove(key)
            .map(|_| debug!(bucket = %self.bucket, key = %key, "Blob deleted"))
            .ok_or_else(|| self.not_found(key))
    }

    fn object_url(&self, key: &BlobKey) -> String {
        self.signer.object_url(key)
    }

    fn presigned_url(&self, key: &BlobKey, ttl: Duration) -> BlobStoreResult<String> {
        // Only existing blobs can be presigned.
        self.metadata(key)?;
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|e| BlobStoreError::Storage(format!("presign ttl out of range: {e}")))?;
        self.signer.presign(key, Utc::now() + ttl)
    }
}
