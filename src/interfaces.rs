use crate::errors::Result;
use crate::storage::{ObjectLocation, S3StorageClient, UploadResult};
use mockall::automock;
use std::path::Path;

/// Interface for the object-store operations used by the round trip, to facilitate testing
#[automock]
pub trait ObjectStore {
    fn upload_file(&self, location: &ObjectLocation, source: &Path) -> Result<UploadResult>;
    fn object_exists(&self, location: &ObjectLocation) -> Result<bool>;
    fn download_to_file(&self, location: &ObjectLocation, dest: &Path) -> Result<u64>;
    fn read_prefix(&self, location: &ObjectLocation, len: usize) -> Result<Vec<u8>>;
}

impl ObjectStore for S3StorageClient {
    fn upload_file(&self, location: &ObjectLocation, source: &Path) -> Result<UploadResult> {
        S3StorageClient::upload_file(self, location, source)
    }

    fn object_exists(&self, location: &ObjectLocation) -> Result<bool> {
        S3StorageClient::object_exists(self, location)
    }

    fn download_to_file(&self, location: &ObjectLocation, dest: &Path) -> Result<u64> {
        S3StorageClient::download_to_file(self, location, dest)
    }

    fn read_prefix(&self, location: &ObjectLocation, len: usize) -> Result<Vec<u8>> {
        S3StorageClient::read_prefix(self, location, len)
    }
}
