//! Object store abstraction
//!
//! Provides a trait for the two S3 operations the pipeline needs, with
//! one real implementation over the AWS SDK. Tests substitute an
//! in-memory fake.

use crate::error::{StrataError, StrataResult};
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Abstract object store interface
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object to a local file
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> StrataResult<()>;

    /// Upload a local file as an object
    async fn upload(&self, src: &Path, bucket: &str, key: &str) -> StrataResult<()>;
}

/// Object store backed by S3
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Create a store over an existing S3 client
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> StrataResult<()> {
        info!("Downloading s3://{}/{} to {}", bucket, key, dest.display());

        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StrataError::download(bucket, key, DisplayErrorContext(e).to_string()))?;

        let body = object
            .body
            .collect()
            .await
            .map_err(|e| StrataError::download(bucket, key, e.to_string()))?;

        fs::write(dest, body.into_bytes())
            .await
            .map_err(|e| StrataError::io(format!("writing download to {}", dest.display()), e))?;

        info!("Download complete");
        Ok(())
    }

    async fn upload(&self, src: &Path, bucket: &str, key: &str) -> StrataResult<()> {
        info!("Uploading {} to s3://{}/{}", src.display(), bucket, key);

        let body = ByteStream::from_path(src)
            .await
            .map_err(|e| StrataError::upload(bucket, key, e.to_string()))?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|e| StrataError::upload(bucket, key, DisplayErrorContext(e).to_string()))?;

        info!("Upload complete: s3://{}/{}", bucket, key);
        Ok(())
    }
}
