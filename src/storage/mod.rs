pub mod client;
pub mod download;
pub mod file_ops;
pub mod models;
pub mod upload;

pub use models::{
    FetchOutcome, FetchTarget, ObjectLocation, S3StorageClient, SessionConfig, UploadResult,
};
