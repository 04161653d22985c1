use crate::{Fault, ServiceConfig, ServiceError, ServiceResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use stencil_blobstore::{BlobMetadata, BlobStore, MemoryBlobStore};
use stencil_model::{
    ContentType, DocumentType, ModelError, Registry, ResourcePayload, TemplateMapper,
    TemplatePayload, extract, render, validate,
};
use stencil_storage::{MemoryTemplateStore, TemplateRepository};
use stencil_types::{BlobKey, TemplateId};
use tracing::{error, info, warn};

/// A raw file turned into a template.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub name: String,
    pub summary: String,
    pub doc_type: DocumentType,
    pub content: ContentType,
}

/// Template operations exposed to controllers and the CLI.
pub struct TemplateService {
    config: ServiceConfig,
    mapper: TemplateMapper,
    repo: Arc<dyn TemplateRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl TemplateService {
    /// Builds the service, failing if `registry` leaves a content type unmapped.
    pub fn new(
        config: ServiceConfig,
        registry: Registry,
        repo: Arc<dyn TemplateRepository>,
        blobs: Arc<dyn BlobStore>,
    ) -> ServiceResult<Self> {
        registry.verify()?;
        info!(bucket = %blobs.bucket(), "Template service ready");
        Ok(Self {
            config,
            mapper: TemplateMapper::new(registry),
            repo,
            blobs,
        })
    }

    /// Service over fresh in-memory collaborators.
    pub fn in_memory(config: ServiceConfig) -> ServiceResult<Self> {
        let blobs = Arc::new(MemoryBlobStore::new(&config.blob_store));
        Self::new(
            config,
            Registry::new(),
            Arc::new(MemoryTemplateStore::new()),
            blobs,
        )
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn find(&self, id: &str) -> ServiceResult<TemplatePayload> {
        traced("find", id, || {
            let entity = self.repo.find_by_id(parse_id(id)?)?;
            Ok(self.mapper.to_payload(&entity)?)
        })
    }

    pub fn find_by_name(&self, name: &str) -> ServiceResult<TemplatePayload> {
        traced("find_by_name", name, || {
            let entity = self.repo.find_by_name(name)?;
            Ok(self.mapper.to_payload(&entity)?)
        })
    }

    /// First template whose summary matches the case-insensitive `pattern`.
    pub fn search_summary(&self, pattern: &str) -> ServiceResult<TemplatePayload> {
        traced("search_summary", pattern, || {
            let entity = self.repo.find_by_summary(pattern)?;
            Ok(self.mapper.to_payload(&entity)?)
        })
    }

    pub fn create(&self, payload: TemplatePayload) -> ServiceResult<TemplatePayload> {
        traced("create", &payload.name, || self.insert_validated(&payload))
    }

    /// Replaces every field of template `id` with `payload`.
    ///
    /// The path identity wins over any identity inside the payload.
    pub fn patch(&self, id: &str, payload: TemplatePayload) -> ServiceResult<TemplatePayload> {
        traced("patch", id, || {
            let id = parse_id(id)?;
            let payload = TemplatePayload { id: None, ..payload };
            let entity = self.mapper.to_entity(&payload)?;
            validate(&entity)?;
            self.repo.update_by_id(id, entity)?;
            let updated = self.repo.find_by_id(id)?;
            Ok(self.mapper.to_payload(&updated)?)
        })
    }

    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        traced("delete", id, || {
            self.repo.delete_by_id(parse_id(id)?)?;
            Ok(true)
        })
    }

    /// Creates a template from an uploaded file.
    ///
    /// Text-like files must be UTF-8 and have their placeholders extracted.
    /// Plain text is stored inline; anything else goes to the blob store and
    /// the template references its object URL. The blob is written only after
    /// the template validates, and removed again if the insert fails.
    pub fn create_from_upload(&self, upload: UploadRequest) -> ServiceResult<TemplatePayload> {
        traced("create_from_upload", &upload.name, || {
            if !upload.doc_type.is_recognized() {
                return Err(ModelError::InvalidType(upload.doc_type.to_string()).into());
            }
            if !upload.content.is_recognized() {
                return Err(ModelError::InvalidContent(upload.content.to_string()).into());
            }
            if upload.bytes.len() > self.config.max_upload_bytes {
                return Err(invalid_file(format!(
                    "{} bytes exceeds the {} byte limit",
                    upload.bytes.len(),
                    self.config.max_upload_bytes
                )));
            }

            let mut resource = ResourcePayload::default();
            if upload.content.is_text_like() {
                let text = std::str::from_utf8(&upload.bytes)
                    .map_err(|e| invalid_file(format!("not valid UTF-8: {e}")))?;
                resource.variables = Some(extract(text, &upload.content)?);
                if upload.content == ContentType::PlainText {
                    resource.text = Some(text.to_string());
                }
            }

            let blob_key = (upload.content != ContentType::PlainText).then(BlobKey::generate);
            if let Some(key) = &blob_key {
                resource.url = Some(self.blobs.object_url(key));
            }

            let payload = TemplatePayload {
                id: None,
                name: upload.name.trim().to_string(),
                summary: upload.summary.trim().to_string(),
                doc_type: upload.doc_type.clone(),
                content: upload.content.clone(),
                resource,
            };
            let entity = self.mapper.to_entity(&payload)?;
            validate(&entity)?;

            if let Some(key) = &blob_key {
                self.blobs
                    .put(key, &upload.bytes, upload.content.mime_type())?;
            }
            let id = match self.repo.insert(entity) {
                Ok(id) => id,
                Err(e) => {
                    if let Some(key) = &blob_key {
                        self.discard_blob(key);
                    }
                    return Err(e.into());
                }
            };
            let stored = self.repo.find_by_id(id)?;
            Ok(self.mapper.to_payload(&stored)?)
        })
    }

    /// Renders the inline text of a plain-text template with `bindings`.
    pub fn resolve(&self, id: &str, bindings: &HashMap<String, String>) -> ServiceResult<String> {
        traced("resolve", id, || {
            let entity = self.repo.find_by_id(parse_id(id)?)?;
            match entity.content {
                ContentType::PlainText => {
                    let text = entity.resource.text.as_deref().unwrap_or_default();
                    Ok(render(text, bindings)?)
                }
                other => Err(ModelError::UnsupportedContentType(other.to_string()).into()),
            }
        })
    }

    pub fn upload_bytes(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> ServiceResult<BlobMetadata> {
        traced("upload_bytes", key, || {
            Ok(self.blobs.put(&BlobKey::parse(key).map_err(ModelError::from)?, data, content_type)?)
        })
    }

    pub fn upload_base64(
        &self,
        key: &str,
        data: &str,
        content_type: &str,
    ) -> ServiceResult<BlobMetadata> {
        let bytes = BASE64.decode(data.trim())?;
        self.upload_bytes(key, &bytes, content_type)
    }

    pub fn download_bytes(&self, key: &str) -> ServiceResult<Vec<u8>> {
        traced("download_bytes", key, || {
            Ok(self.blobs.get(&BlobKey::parse(key).map_err(ModelError::from)?)?)
        })
    }

    pub fn download_base64(&self, key: &str) -> ServiceResult<String> {
        self.download_bytes(key).map(|bytes| BASE64.encode(bytes))
    }

    /// Time-limited download URL; lifetime comes from the service config.
    pub fn presigned_url(&self, key: &str) -> ServiceResult<String> {
        traced("presigned_url", key, || {
            let key = BlobKey::parse(key).map_err(ModelError::from)?;
            Ok(self.blobs.presigned_url(&key, self.config.presign_ttl())?)
        })
    }

    fn insert_validated(&self, payload: &TemplatePayload) -> ServiceResult<TemplatePayload> {
        let entity = self.mapper.to_entity(payload)?;
        validate(&entity)?;
        let id = self.repo.insert(entity)?;
        let created = self.repo.find_by_id(id)?;
        Ok(self.mapper.to_payload(&created)?)
    }

    fn discard_blob(&self, key: &BlobKey) {
        if let Err(e) = self.blobs.delete(key) {
            warn!(key = %key, error = %e, "Failed to remove blob after aborted upload");
        }
    }
}

fn parse_id(raw: &str) -> ServiceResult<TemplateId> {
    Ok(TemplateId::parse(raw).map_err(ModelError::from)?)
}

fn invalid_file(reason: String) -> ServiceError {
    ModelError::InvalidField {
        field: "file",
        reason,
    }
    .into()
}

/// Runs `op` between `started` and `success`/`failed` log lines.
fn traced<T>(
    op: &'static str,
    subject: &str,
    f: impl FnOnce() -> ServiceResult<T>,
) -> ServiceResult<T> {
    let start = Instant::now();
    info!(op, subject, status = "started");
    let result = f();
    let elapsed_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(op, subject, status = "success", elapsed_ms),
        Err(e) if e.fault() == Fault::Internal => {
            error!(op, subject, status = "failed", error = %e, elapsed_ms)
        }
        Err(e) => warn!(op, subject, status = "failed", error = %e, elapsed_ms),
    }
    result
}
