use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use std::error::Error as _;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::storage::ObjectLocation;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session error: {0}")]
    Session(String),

    #[error("Local I/O error on '{}': {source}", path.display())]
    LocalIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("S3 {operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },

    #[error("Object {location} not visible after {waited:?}")]
    NotVisible {
        location: ObjectLocation,
        waited: Duration,
    },

    #[error("Round-trip mismatch: {0}")]
    Mismatch(String),
}

impl StorageError {
    /// Wrap an I/O error with the local path it happened on
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }

    pub fn service(operation: &'static str, message: impl std::fmt::Display) -> Self {
        Self::Service {
            operation,
            message: message.to_string(),
        }
    }

    /// Condense an SDK failure into one line.
    ///
    /// Service errors keep the S3 error code, message and HTTP status; the raw
    /// response is left out. Other failures (dispatch, timeout, parse) keep
    /// their cause chain.
    pub fn from_sdk<E>(operation: &'static str, err: &SdkError<E>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + 'static,
    {
        let message = match err {
            SdkError::ServiceError(context) => {
                let status = context.raw().status().as_u16();
                match (err.code(), err.message()) {
                    (Some(code), Some(msg)) => format!("{code}: {msg} (HTTP {status})"),
                    (Some(code), None) => format!("{code} (HTTP {status})"),
                    (None, Some(msg)) => format!("{msg} (HTTP {status})"),
                    (None, None) => format!("HTTP {status}"),
                }
            }
            other => {
                let mut message = other.to_string();
                let mut cause = other.source();
                while let Some(inner) = cause {
                    message.push_str(&format!(": {inner}"));
                    cause = inner.source();
                }
                message
            }
        };
        Self::service(operation, message)
    }

    /// True for errors caused by the local filesystem rather than the remote service
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::LocalIo { .. })
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
