//! Bucket upload of staged files

use crate::error::{Error, Result};
use crate::types::ExportTimestamp;
use bytes::Bytes;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path as ObjectPath;
use object_store::ObjectStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Object key of one page: `{file_prefix}/{export_timestamp}/{page}.jsonl`
pub fn object_path(file_prefix: &str, run: &ExportTimestamp, page_number: u32) -> String {
    format!(
        "{}/{}/{page_number}.jsonl",
        file_prefix.trim_matches('/'),
        run.path_segment()
    )
}

/// Uploads staged files into one bucket
#[derive(Debug, Clone)]
pub struct BucketUploader {
    /// The object store implementation
    store: Arc<dyn ObjectStore>,
    /// Bucket name, without scheme
    bucket: String,
}

impl BucketUploader {
    /// Uploader over an existing store
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: strip_scheme(&bucket.into()).to_string(),
        }
    }

    /// Uploader for a GCS bucket with credentials from the environment
    pub fn gcs(bucket: &str) -> Result<Self> {
        let bucket = strip_scheme(bucket);
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket)
            .build()?;

        Ok(Self::new(Arc::new(store), bucket))
    }

    /// Bucket name
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    /// `gs://` URI of an object key
    pub fn uri(&self, key: &str) -> String {
        format!("gs://{}/{}", self.bucket, key.trim_start_matches('/'))
    }

    /// Glob matching every page of a run under `file_prefix`
    pub fn run_glob(&self, file_prefix: &str, run: &ExportTimestamp) -> String {
        self.uri(&format!(
            "{}/{}/*",
            file_prefix.trim_matches('/'),
            run.path_segment()
        ))
    }

    /// Upload a staged page and delete the local file
    ///
    /// The local file is removed as soon as the upload call returns, whether
    /// it succeeded or not. Returns the object key.
    pub async fn upload(
        &self,
        file_prefix: &str,
        run: &ExportTimestamp,
        page_number: u32,
        local_path: &Path,
    ) -> Result<String> {
        let key = object_path(file_prefix, run, page_number);
        let data = Bytes::from(tokio::fs::read(local_path).await?);

        info!(
            "Uploading local file {} to gcs path {}",
            local_path.display(),
            self.uri(&key)
        );

        let put_result = self
            .store
            .put(&ObjectPath::from(key.as_str()), data.into())
            .await;

        let cleanup = remove_local_file(local_path).await;

        put_result.map_err(|e| Error::Upload {
            local_path: local_path.display().to_string(),
            remote_path: self.uri(&key),
            message: e.to_string(),
        })?;
        cleanup?;

        info!(
            "Uploading {} to gcs path {} successfully done",
            local_path.display(),
            self.uri(&key)
        );
        Ok(key)
    }
}

/// Delete a staged file
async fn remove_local_file(path: &Path) -> Result<()> {
    info!("Removing tmp local file {}", path.display());
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            info!("Local file {} successfully removed", path.display());
            Ok(())
        }
        Err(e) => {
            warn!("Failed to remove local file {}: {e}", path.display());
            Err(e.into())
        }
    }
}

/// Drop a leading `gs://` and any trailing slash
fn strip_scheme(bucket: &str) -> &str {
    bucket
        .strip_prefix("gs://")
        .unwrap_or(bucket)
        .trim_end_matches('/')
}
