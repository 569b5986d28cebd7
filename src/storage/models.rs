use aws_sdk_s3::Client;
use std::fmt;
use std::path::PathBuf;

/// Bucket/key pair identifying a remote object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

/// Settings used to establish an authenticated session
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Named profile from the shared AWS config/credentials files
    pub profile: String,
    pub region: Option<String>,
    /// Override for S3-compatible services (MinIO, R2, B2, ...)
    pub endpoint_url: Option<String>,
    pub force_path_style: bool,
}

/// Represents the result of an upload operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    pub location: ObjectLocation,
    /// ETag with the surrounding quotes removed, when the service returns one
    pub e_tag: Option<String>,
    pub bytes_sent: u64,
}

/// Where the body of a fetched object ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// Create or truncate a local file and write the whole object into it
    File(PathBuf),
    /// Keep at most `max_bytes` of the object in memory
    Buffer { max_bytes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
    pub bytes_transferred: u64,
    /// Only populated for `FetchTarget::Buffer`
    pub content: Option<Vec<u8>>,
}

/// S3 client with its own runtime, exposing a blocking API
pub struct S3StorageClient {
    pub(crate) client: Client,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub verbose: u8,
}
