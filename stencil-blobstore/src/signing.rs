//! Presigned URL construction and verification.
//!
//! Format: `{base}/{bucket}/{key}?expires={unix_secs}&signature={hex}` where
//! the signature is SHA-256 over `secret`, `bucket`, `key` and `expires`
//! joined by newlines.

use crate::{BlobStoreConfig, BlobStoreError, BlobStoreResult};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use stencil_types::BlobKey;
use url::Url;

#[derive(Debug, Clone)]
pub struct UrlSigner {
    bucket: String,
    base: String,
    secret: String,
}

impl UrlSigner {
    pub fn new(config: &BlobStoreConfig) -> Self {
        Self {
            bucket: config.bucket.clone(),
            base: config.public_base_url.trim_end_matches('/').to_string(),
            secret: config.signing_secret.clone(),
        }
    }

    /// Unsigned, permanent URL for `key`.
    pub fn object_url(&self, key: &BlobKey) -> String {
        format!("{}/{}/{}", self.base, self.bucket, key)
    }

    /// URL for `key` valid until `expires_at`.
    pub fn presign(&self, key: &BlobKey, expires_at: DateTime<Utc>) -> BlobStoreResult<String> {
        let expires = expires_at.timestamp();
        let mut url = Url::parse(&self.object_url(key))
            .map_err(|e| BlobStoreError::Storage(format!("bad public base url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("expires", &expires.to_string())
            .append_pair("signature", &self.signature(&key.to_string(), expires));
        Ok(url.into())
    }

    /// Checks a presigned URL against `now` and returns the key it grants.
    pub fn verify(&self, presigned: &str, now: DateTime<Utc>) -> BlobStoreResult<BlobKey> {
        let invalid = |reason: &str| BlobStoreError::InvalidSignature(reason.to_string());

        let url = Url::parse(presigned).map_err(|_| invalid("not a url"))?;
        let mut segments: Vec<&str> = url.path_segments().map(|s| s.collect()).unwrap_or_default();
        let key_segment = segments.pop().ok_or_else(|| invalid("missing key"))?;
        if segments.pop() != Some(self.bucket.as_str()) {
            return Err(invalid("wrong bucket"));
        }
        let key = BlobKey::parse(key_segment)?;

        let mut expires = None;
        let mut signature = None;
        for (name, value) in url.query_pairs() {
            match name.as_ref() {
                "expires" => expires = value.parse::<i64>().ok(),
                "signature" => signature = Some(value.into_owned()),
                _ => {}
            }
        }
        let expires = expires.ok_or_else(|| invalid("missing expiry"))?;
        let signature = signature.ok_or_else(|| invalid("missing signature"))?;

        if signature != self.signature(key_segment, expires) {
            return Err(invalid("signature mismatch"));
        }
        if now.timestamp() > expires {
            let at = DateTime::<Utc>::from_timestamp(expires, 0)
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| expires.to_string());
            return Err(BlobStoreError::Expired(at));
        }
        Ok(key)
    }

    fn signature(&self, key: &str, expires: i64) -> String {
        let mut hasher = Sha256::new();
        for part in [self.secret.as_str(), self.bucket.as_str(), key] {
            hasher.update(part.as_bytes());
            hasher.update(b"\n");
        }
        hasher.update(expires.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}
