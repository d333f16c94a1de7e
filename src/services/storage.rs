//! Object storage for uploaded files.
//!
//! Services depend on the [`FileStorage`] trait; production wires in the S3-backed [`Storage`]
//! (AWS S3, or MinIO in development).

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::S3Config;
use crate::error::{AppError, AppResult};
use crate::models::FileUpload;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf"];

/// Put an object and hand back the URL clients use to fetch it.
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String>;
}

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl Storage {
    /// Create the S3 client and make sure the bucket exists.
    pub async fn new(config: &S3Config) -> AppResult<Self> {
        let credentials =
            Credentials::new(&config.access_key, &config.secret_key, None, None, "claon");

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let storage = Self {
            client: Client::from_conf(s3_config_builder.build()),
            bucket: config.bucket.clone(),
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
        };

        storage.ensure_bucket_exists().await?;
        info!("S3 storage initialized: bucket={}", config.bucket);

        Ok(storage)
    }

    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        let Err(e) = self.client.head_bucket().bucket(&self.bucket).send().await else {
            return Ok(());
        };

        let service_error = e.into_service_error();
        if !service_error.is_not_found() {
            return Err(AppError::Storage(format!(
                "Failed to access bucket '{}': {}",
                self.bucket, service_error
            )));
        }

        info!("Creating S3 bucket '{}'", self.bucket);
        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create bucket: {}", e)))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_url, key)
    }
}

#[async_trait]
impl FileStorage for Storage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                error!(key = %key, "S3 upload failed: {}", e);
                AppError::Storage(format!("Failed to upload file to S3: {}", e))
            })?;

        Ok(self.public_url(key))
    }
}

/// Content type for an accepted upload extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Check an upload against the size limit and the allowed extensions, returning the
/// lowercased extension.
pub fn validate_upload(
    filename: &str,
    size: usize,
    max_size: usize,
    accepts_documents: bool,
) -> AppResult<String> {
    if size == 0 {
        return Err(AppError::invalid_format("Uploaded file is empty"));
    }
    if size > max_size {
        return Err(AppError::invalid_format(format!(
            "Uploaded file exceeds {} bytes",
            max_size
        )));
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .ok_or_else(|| AppError::invalid_format("Uploaded file has no extension"))?;

    let allowed = IMAGE_EXTENSIONS.contains(&ext.as_str())
        || (accepts_documents && DOCUMENT_EXTENSIONS.contains(&ext.as_str()));
    if !allowed {
        return Err(AppError::invalid_format(format!(
            "File type '.{}' is not accepted",
            ext
        )));
    }

    Ok(ext)
}

/// Object key in format: {domain}/{purpose}/{uuid}.{ext}
pub fn object_key(domain: &str, purpose: &str, ext: &str) -> String {
    format!("{}/{}/{}.{}", domain, purpose, Uuid::new_v4(), ext)
}

/// Validate an upload, store it under `<domain>/<purpose>/` and return its public URL.
pub async fn store_upload(
    storage: &dyn FileStorage,
    max_size: usize,
    domain: &str,
    purpose: &str,
    accepts_documents: bool,
    upload: FileUpload,
) -> AppResult<String> {
    let ext = validate_upload(&upload.filename, upload.data.len(), max_size, accepts_documents)?;
    let key = object_key(domain, purpose, &ext);
    let url = storage
        .put(&key, upload.data, content_type_for_extension(&ext))
        .await?;
    info!(key = %key, "File uploaded");
    Ok(url)
}
