use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use shared::Config;

use crate::StoreError;

/// Issues presigned PUT URLs so clients upload attachments straight to S3.
/// The object key is the todo id, matching the address baked into the item's
/// `attachmentUrl` at creation.
#[derive(Clone)]
pub struct AttachmentStore {
    client: Client,
    bucket: String,
    url_expiration: Duration,
}

impl AttachmentStore {
    pub async fn new(config: &Config) -> Self {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&aws_config);

        Self {
            client,
            bucket: config.attachment_bucket.clone(),
            url_expiration: Duration::from_secs(config.signed_url_expiration_secs),
        }
    }

    pub async fn upload_url(&self, todo_id: &str) -> Result<String, StoreError> {
        let presign_config = PresigningConfig::expires_in(self.url_expiration)
            .map_err(|e| StoreError::S3(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(todo_id)
            .presigned(presign_config)
            .await
            .map_err(|e| StoreError::S3(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
