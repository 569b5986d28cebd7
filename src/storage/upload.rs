use crate::errors::{Result, StorageError};
use crate::storage::models::{ObjectLocation, S3StorageClient, UploadResult};
use crate::utils::log_utils;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use std::fs::File;
use std::path::Path;

impl S3StorageClient {
    /// Upload a local file, replacing any object already stored at `location`
    pub fn upload_file(&self, location: &ObjectLocation, source: &Path) -> Result<UploadResult> {
        let file = File::open(source).map_err(|e| StorageError::local_io(source, e))?;
        let bytes_sent = file
            .metadata()
            .map_err(|e| StorageError::local_io(source, e))?
            .len();

        log_utils::debug(
            &format!(
                "PutObject {} ({} bytes from {})",
                location,
                bytes_sent,
                source.display()
            ),
            self.verbose,
        );

        self.runtime.block_on(async {
            // The request body takes ownership of the handle, so it is closed
            // once the request completes or fails.
            let body = ByteStream::read_from()
                .file(tokio::fs::File::from_std(file))
                .build()
                .await
                .map_err(|e| StorageError::local_io(source, std::io::Error::other(e)))?;

            let response = self
                .client
                .put_object()
                .bucket(&location.bucket)
                .key(&location.key)
                .body(body)
                .send()
                .await
                .map_err(|e| {
                    log_utils::debug(
                        &format!("PutObject error: {}", DisplayErrorContext(&e)),
                        self.verbose,
                    );
                    StorageError::from_sdk("PutObject", &e)
                })?;

            let e_tag = response.e_tag().map(|tag| tag.replace('"', ""));

            log_utils::debug(
                &format!("PutObject response ETag: {:?}", e_tag),
                self.verbose,
            );

            Ok(UploadResult {
                location: location.clone(),
                e_tag,
                bytes_sent,
            })
        })
    }
}
