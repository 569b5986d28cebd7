use crate::errors::{Result, StorageError};
use crate::storage::models::{FetchOutcome, FetchTarget, ObjectLocation, S3StorageClient};
use crate::utils::log_utils;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

impl S3StorageClient {
    /// Fetch an object into a local file or an in-memory buffer.
    ///
    /// For `FetchTarget::File` the destination is only created once the
    /// service has accepted the request, so a missing object leaves no file
    /// behind. For `FetchTarget::Buffer` the stream is read until `max_bytes`
    /// have been collected or the object ends, whichever comes first; a short
    /// object is not an error.
    pub fn fetch_object(
        &self,
        location: &ObjectLocation,
        target: &FetchTarget,
    ) -> Result<FetchOutcome> {
        self.runtime.block_on(async {
            log_utils::debug(&format!("GetObject {location}"), self.verbose);

            let response = self
                .client
                .get_object()
                .bucket(&location.bucket)
                .key(&location.key)
                .send()
                .await
                .map_err(|e| {
                    log_utils::debug(
                        &format!(
                            "GetObject error code: {}: {}",
                            e.code().unwrap_or("unknown"),
                            DisplayErrorContext(&e)
                        ),
                        self.verbose,
                    );
                    StorageError::from_sdk("GetObject", &e)
                })?;

            log_utils::debug(
                &format!(
                    "GetObject response: content_length={:?}, etag={:?}",
                    response.content_length(),
                    response.e_tag()
                ),
                self.verbose,
            );

            let mut body = response.body;

            match target {
                FetchTarget::File(path) => {
                    let mut file = tokio::fs::File::create(path)
                        .await
                        .map_err(|e| StorageError::local_io(path, e))?;

                    let mut written: u64 = 0;
                    while let Some(chunk) = body.try_next().await.map_err(|e| {
                        StorageError::service("GetObject", format!("body stream: {e}"))
                    })? {
                        file.write_all(&chunk)
                            .await
                            .map_err(|e| StorageError::local_io(path, e))?;
                        written += chunk.len() as u64;
                    }
                    file.flush()
                        .await
                        .map_err(|e| StorageError::local_io(path, e))?;

                    Ok(FetchOutcome {
                        bytes_transferred: written,
                        content: None,
                    })
                }
                FetchTarget::Buffer { max_bytes } => {
                    // Grown by read_to_end; max_bytes is a ceiling, not a size hint
                    let mut content = Vec::new();
                    let reader = body.into_async_read();
                    tokio::pin!(reader);
                    reader
                        .take(*max_bytes as u64)
                        .read_to_end(&mut content)
                        .await
                        .map_err(|e| {
                            StorageError::service("GetObject", format!("body stream: {e}"))
                        })?;

                    Ok(FetchOutcome {
                        bytes_transferred: content.len() as u64,
                        content: Some(content),
                    })
                }
            }
        })
    }

    /// Download the whole object into `dest`, returning the number of bytes written
    pub fn download_to_file(&self, location: &ObjectLocation, dest: &Path) -> Result<u64> {
        let outcome = self.fetch_object(location, &FetchTarget::File(dest.to_path_buf()))?;
        Ok(outcome.bytes_transferred)
    }

    /// Read up to `len` bytes from the start of the object
    pub fn read_prefix(&self, location: &ObjectLocation, len: usize) -> Result<Vec<u8>> {
        let outcome = self.fetch_object(location, &FetchTarget::Buffer { max_bytes: len })?;
        Ok(outcome.content.unwrap_or_default())
    }
}
