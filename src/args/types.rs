use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use super::validators::{parse_non_empty, validate};
use crate::consistency::ConsistencyConfig;
use crate::roundtrip::{
    DEFAULT_BUCKET, DEFAULT_DEST_PATH, DEFAULT_OBJECT_KEY, DEFAULT_PROFILE, DEFAULT_READ_LEN,
    DEFAULT_SOURCE_PATH, RoundTripConfig,
};
use crate::storage::{ObjectLocation, SessionConfig};
use crate::utils::path_utils::{check_file_creatable, expand_path};

pub const MAX_WAIT_SECS_DEFAULT: u64 = 30;

/// Upload a file to S3, wait for it to become visible, then download and read it back
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Target bucket
    #[arg(long, default_value = DEFAULT_BUCKET, value_parser = parse_non_empty)]
    pub bucket: String,

    /// Object key inside the bucket
    #[arg(long, default_value = DEFAULT_OBJECT_KEY, value_parser = parse_non_empty)]
    pub key: String,

    /// Local file to upload
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOURCE_PATH, value_parser = expand_path)]
    pub source: PathBuf,

    /// Local file that receives the downloaded copy (created or truncated)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DEST_PATH, value_parser = check_file_creatable)]
    pub dest: PathBuf,

    /// Named profile in the shared AWS config/credentials files
    #[arg(long, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Override the region resolved from the profile
    #[arg(long)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible services
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Address buckets as http://host/bucket instead of http://bucket.host
    #[arg(long)]
    pub force_path_style: bool,

    /// Number of leading bytes to read back and print
    #[arg(long, default_value_t = DEFAULT_READ_LEN)]
    pub read_bytes: usize,

    /// Give up if the uploaded object is not visible after this many seconds
    #[arg(long, value_name = "SECS", default_value_t = MAX_WAIT_SECS_DEFAULT)]
    pub max_wait_secs: u64,

    /// Skip comparing the downloaded copy with the source
    #[arg(long)]
    pub skip_verify: bool,

    /// Print extra stuff (use -v -v or --verbose --verbose for even more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            bucket: DEFAULT_BUCKET.to_string(),
            key: DEFAULT_OBJECT_KEY.to_string(),
            source: PathBuf::from(DEFAULT_SOURCE_PATH),
            dest: PathBuf::from(DEFAULT_DEST_PATH),
            profile: DEFAULT_PROFILE.to_string(),
            region: None,
            endpoint_url: None,
            force_path_style: false,
            read_bytes: DEFAULT_READ_LEN,
            max_wait_secs: MAX_WAIT_SECS_DEFAULT,
            skip_verify: false,
            verbose: 0,
        }
    }
}

impl Args {
    /// Validate cross-field constraints, without modifying the Args
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments cannot describe a valid run.
    pub fn validate(&self) -> Result<(), String> {
        validate(self)
    }

    /// Build the explicit configuration for one round trip
    #[must_use]
    pub fn to_config(&self) -> RoundTripConfig {
        RoundTripConfig {
            location: ObjectLocation::new(&self.bucket, &self.key),
            local_source_path: self.source.clone(),
            local_dest_path: self.dest.clone(),
            session: SessionConfig {
                profile: self.profile.clone(),
                region: self.region.clone(),
                endpoint_url: self.endpoint_url.clone(),
                force_path_style: self.force_path_style,
            },
            read_len: self.read_bytes,
            consistency: ConsistencyConfig {
                max_wait: Duration::from_secs(self.max_wait_secs),
                ..ConsistencyConfig::default()
            },
            verify: !self.skip_verify,
        }
    }
}
