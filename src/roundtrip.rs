use std::path::PathBuf;

use crate::consistency::{self, ConsistencyConfig};
use crate::errors::{Result, StorageError};
use crate::interfaces::ObjectStore;
use crate::storage::{ObjectLocation, SessionConfig};
use crate::utils::log_utils::Logger;
use crate::verify;

pub const DEFAULT_PROFILE: &str = "aws_s3_access_profile";
pub const DEFAULT_BUCKET: &str = "BucketName";
pub const DEFAULT_OBJECT_KEY: &str = "sampleFolder/sample.txt";
pub const DEFAULT_SOURCE_PATH: &str = "./sample.txt";
pub const DEFAULT_DEST_PATH: &str = "downloadInput.txt";
pub const DEFAULT_READ_LEN: usize = 20;

/// Everything one upload/download/read cycle needs
#[derive(Debug, Clone)]
pub struct RoundTripConfig {
    pub location: ObjectLocation,
    pub local_source_path: PathBuf,
    pub local_dest_path: PathBuf,
    pub session: SessionConfig,
    /// Number of leading bytes to read back and print
    pub read_len: usize,
    pub consistency: ConsistencyConfig,
    pub verify: bool,
}

impl Default for RoundTripConfig {
    fn default() -> Self {
        Self {
            location: ObjectLocation::new(DEFAULT_BUCKET, DEFAULT_OBJECT_KEY),
            local_source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            local_dest_path: PathBuf::from(DEFAULT_DEST_PATH),
            session: SessionConfig {
                profile: DEFAULT_PROFILE.to_string(),
                ..SessionConfig::default()
            },
            read_len: DEFAULT_READ_LEN,
            consistency: ConsistencyConfig::default(),
            verify: true,
        }
    }
}

/// Summary of a completed round trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    pub bytes_uploaded: u64,
    pub e_tag: Option<String>,
    /// Number of existence probes before the object became visible
    pub visibility_probes: u32,
    pub bytes_downloaded: u64,
    pub prefix: Vec<u8>,
    /// MD5 of the source, when verification ran
    pub source_md5: Option<String>,
}

impl RoundTripReport {
    /// The read-back prefix as text, replacing invalid UTF-8
    #[must_use]
    pub fn prefix_text(&self) -> String {
        String::from_utf8_lossy(&self.prefix).into_owned()
    }
}

/// Upload, wait for visibility, download, read back and verify.
///
/// The same `config.location` is used for every step. Any failure stops the
/// sequence and is returned to the caller.
pub fn run_round_trip<S: ObjectStore>(
    store: &S,
    config: &RoundTripConfig,
    logger: &Logger,
) -> Result<RoundTripReport> {
    let location = &config.location;

    logger.info(&format!(
        "Uploading '{}' to {}",
        config.local_source_path.display(),
        location
    ));
    let upload = store.upload_file(location, &config.local_source_path)?;
    logger.debug(&format!(
        "Upload complete: {} bytes, ETag {:?}",
        upload.bytes_sent, upload.e_tag
    ));

    let visibility_probes =
        consistency::wait_until_visible(&config.consistency, location, || {
            store.object_exists(location)
        })?;
    logger.debug(&format!(
        "{location} visible after {visibility_probes} probe(s)"
    ));

    let bytes_downloaded = store.download_to_file(location, &config.local_dest_path)?;
    logger.normal(&format!("DownloadedSize: {bytes_downloaded} byte"));

    if bytes_downloaded != upload.bytes_sent {
        return Err(StorageError::Mismatch(format!(
            "uploaded {} bytes but downloaded {}",
            upload.bytes_sent, bytes_downloaded
        )));
    }

    let prefix = store.read_prefix(location, config.read_len)?;
    logger.normal(&String::from_utf8_lossy(&prefix));

    let source_md5 = if config.verify {
        let outcome =
            verify::verify_round_trip(&config.local_source_path, &config.local_dest_path)?;
        logger.info(&format!(
            "Verified {} bytes, md5 {}",
            outcome.source.len, outcome.source.md5
        ));
        if let Some(e_tag) = &upload.e_tag {
            logger.debug(&format!("ETag {e_tag} / source md5 {}", outcome.source.md5));
        }
        Some(outcome.source.md5)
    } else {
        None
    };

    Ok(RoundTripReport {
        bytes_uploaded: upload.bytes_sent,
        e_tag: upload.e_tag,
        visibility_probes,
        bytes_downloaded,
        prefix,
        source_md5,
    })
}
