//! Command-line front end for Stencil.
//!
//! Each subcommand is a plain function returning the text to print, so the
//! binary stays a thin shell around [`run`].

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stencil_blobstore::BlobStoreConfig;
use stencil_model::{
    ContentType, DocumentType, TemplateMapper, TemplatePayload, extract, render, validate,
};
use stencil_service::{ServiceConfig, TemplateService, UploadRequest};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(about = "Validate, inspect and upload document templates")]
pub struct Cli {
    /// Enable verbose debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a template payload (JSON) against the document rules
    Validate {
        /// Payload file; `-` reads stdin
        file: PathBuf,
    },
    /// List the placeholders of a text template
    Extract {
        file: PathBuf,
        #[arg(long, value_parser = parse_content, default_value = "PLAIN_TEXT")]
        content: ContentType,
    },
    /// Substitute `{{placeholders}}` in a text template
    Render {
        file: PathBuf,
        /// Binding as NAME=VALUE; repeatable
        #[arg(long = "var", value_parser = parse_binding)]
        vars: Vec<(String, String)>,
    },
    /// Turn a file into a stored template
    Upload {
        file: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long)]
        summary: String,
        #[arg(long = "type", value_parser = parse_doc_type, default_value = "TEMPLATE")]
        doc_type: DocumentType,
        #[arg(long, value_parser = parse_content)]
        content: ContentType,
        #[command(flatten)]
        config: ConfigArgs,
    },
}

/// Service settings, each overridable through a `STENCIL_*` variable.
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Blob bucket uploaded files land in
    #[arg(long, env = "STENCIL_BUCKET", default_value = "templates")]
    pub bucket: String,

    /// Base of public object URLs
    #[arg(long, env = "STENCIL_PUBLIC_BASE_URL", default_value = "https://blobs.localhost")]
    pub public_base_url: String,

    /// Secret for presigned URLs
    #[arg(long, env = "STENCIL_SIGNING_SECRET", default_value = "stencil-dev-secret", hide_env_values = true)]
    pub signing_secret: String,

    /// Lifetime of presigned URLs in seconds
    #[arg(long, env = "STENCIL_PRESIGN_TTL_SECS", default_value = "600")]
    pub presign_ttl_secs: u64,

    /// Largest accepted upload in bytes
    #[arg(long, env = "STENCIL_MAX_UPLOAD_BYTES", default_value = "10485760")]
    pub max_upload_bytes: usize,
}

impl ConfigArgs {
    pub fn to_service_config(&self) -> ServiceConfig {
        ServiceConfig {
            blob_store: BlobStoreConfig {
                bucket: self.bucket.clone(),
                public_base_url: self.public_base_url.clone(),
                signing_secret: self.signing_secret.clone(),
            },
            presign_ttl_secs: self.presign_ttl_secs,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// Result of `stencil upload`.
#[derive(Debug, Serialize)]
pub struct UploadOutcome {
    pub template: TemplatePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// Executes `command` and returns what should be printed.
pub fn run(command: Command) -> Result<String> {
    match command {
        Command::Validate { file } => {
            let payload = validate_payload(&read_text(&file)?)?;
            Ok(serde_json::to_string_pretty(&payload)?)
        }
        Command::Extract { file, content } => {
            let names = extract_variables(&read_text(&file)?, &content)?;
            Ok(serde_json::to_string(&names)?)
        }
        Command::Render { file, vars } => render_text(&read_text(&file)?, vars),
        Command::Upload {
            file,
            name,
            summary,
            doc_type,
            content,
            config,
        } => {
            let service = TemplateService::in_memory(config.to_service_config())
                .context("Failed to start template service")?;
            let bytes = read_bytes(&file)?;
            let outcome = upload(
                &service,
                UploadRequest {
                    bytes,
                    name,
                    summary,
                    doc_type,
                    content,
                },
            )?;
            Ok(serde_json::to_string_pretty(&outcome)?)
        }
    }
}

/// Maps and validates a JSON payload, returning its canonical form.
pub fn validate_payload(json: &str) -> Result<TemplatePayload> {
    let payload: TemplatePayload =
        serde_json::from_str(json).context("Payload is not a template document")?;
    let mapper = TemplateMapper::default();
    let entity = mapper.to_entity(&payload)?;
    validate(&entity)?;
    debug!(name = %entity.name, doc_type = %entity.doc_type, content = %entity.content, "Payload valid");
    Ok(mapper.to_payload(&entity)?)
}

pub fn extract_variables(text: &str, content: &ContentType) -> Result<Vec<String>> {
    Ok(extract(text, content)?)
}

pub fn render_text(text: &str, vars: Vec<(String, String)>) -> Result<String> {
    let bindings: HashMap<String, String> = vars.into_iter().collect();
    Ok(render(text, &bindings)?)
}

/// Creates the template and, for file-backed content, a download link.
pub fn upload(service: &TemplateService, request: UploadRequest) -> Result<UploadOutcome> {
    let template = service.create_from_upload(request)?;
    let download_url = match template.resource.url.as_deref() {
        Some(url) => {
            let key = url.rsplit('/').next().unwrap_or_default();
            Some(service.presigned_url(key)?)
        }
        None => None,
    };
    info!(name = %template.name, stored_as_blob = download_url.is_some(), "Template uploaded");
    Ok(UploadOutcome {
        template,
        download_url,
    })
}

/// Parses `NAME=VALUE`; the value may itself contain `=`.
pub fn parse_binding(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}

pub fn parse_content(raw: &str) -> Result<ContentType, String> {
    let content = ContentType::parse_lenient(raw);
    if content.is_recognized() {
        return Ok(content);
    }
    let all = ContentType::ALL;
    let known: Vec<&str> = all.iter().map(|c| c.as_str()).collect();
    Err(format!("unknown content type {raw:?}; expected one of {}", known.join(", ")))
}

pub fn parse_doc_type(raw: &str) -> Result<DocumentType, String> {
    let doc_type = DocumentType::parse_lenient(raw);
    if doc_type.is_recognized() {
        return Ok(doc_type);
    }
    let all = DocumentType::ALL;
    let known: Vec<&str> = all.iter().map(|d| d.as_str()).collect();
    Err(format!("unknown document type {raw:?}; expected one of {}", known.join(", ")))
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin(), &mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(_) => bail!("{} is not valid UTF-8", path.display()),
    }
}
