use chrono::Utc;
use supabase_client::Client;
use tracing::{error, info};

use crate::domain::error::DomainError;

/// An image file as parsed out of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Post-image uploads. The upload is sequenced strictly before the row
/// mutation that references it; a failed upload aborts the enclosing flow.
#[derive(Clone)]
pub struct ImageStore {
    client: Client,
    bucket: String,
}

impl ImageStore {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }

    /// Upload an image under a collision-free name and return its public
    /// URL.
    pub async fn upload(&self, image: &UploadedImage) -> Result<String, DomainError> {
        let path = format!("{}-{}", image.filename, Utc::now().timestamp_millis());

        self.client
            .storage()
            .upload(
                &self.bucket,
                &path,
                image.bytes.clone(),
                &image.content_type,
            )
            .await
            .map_err(|e| {
                error!("failed to upload image {}: {}", path, e);
                DomainError::ImageUpload(e.to_string())
            })?;

        let url = self.client.storage().public_url(&self.bucket, &path);
        info!(path = %path, "image uploaded");
        Ok(url)
    }
}
