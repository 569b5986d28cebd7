use crate::errors::{Result, StorageError};
use crate::storage::models::{ObjectLocation, S3StorageClient};
use crate::utils::log_utils;
use aws_sdk_s3::error::DisplayErrorContext;

impl S3StorageClient {
    /// Check whether an object is currently visible.
    ///
    /// A "not found" answer is `Ok(false)`; any other failure is returned as an error.
    pub fn object_exists(&self, location: &ObjectLocation) -> Result<bool> {
        self.runtime.block_on(async {
            let resp = self
                .client
                .head_object()
                .bucket(&location.bucket)
                .key(&location.key)
                .send()
                .await;

            match resp {
                Ok(head) => {
                    log_utils::debug(
                        &format!(
                            "HeadObject {}: content_length={:?}, last_modified={:?}",
                            location,
                            head.content_length(),
                            head.last_modified()
                        ),
                        self.verbose,
                    );
                    Ok(true)
                }
                Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                    log_utils::debug(&format!("HeadObject {location}: not found"), self.verbose);
                    Ok(false)
                }
                Err(e) => {
                    log_utils::debug(
                        &format!("HeadObject {location} error: {}", DisplayErrorContext(&e)),
                        self.verbose,
                    );
                    Err(StorageError::from_sdk("HeadObject", &e))
                }
            }
        })
    }
}
