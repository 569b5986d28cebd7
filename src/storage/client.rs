use crate::errors::{Result, StorageError};
use crate::storage::models::{S3StorageClient, SessionConfig};
use crate::utils::log_utils;
use aws_config::BehaviorVersion;
use aws_config::retry::RetryConfig;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;

impl S3StorageClient {
    /// Establish a session from the shared AWS config files and the named profile.
    ///
    /// Credentials are resolved once up front so that a missing or broken
    /// profile fails here instead of on the first request.
    pub fn connect(session: &SessionConfig, verbose: u8) -> Result<Self> {
        let runtime = new_runtime()?;

        log_utils::debug(
            &format!(
                "Creating S3 client: profile={}, region={:?}, endpoint={:?}, path_style={}",
                session.profile, session.region, session.endpoint_url, session.force_path_style
            ),
            verbose,
        );

        let shared_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest())
                .profile_name(&session.profile)
                .retry_config(RetryConfig::standard().with_max_attempts(3));

            if let Some(region) = &session.region {
                loader = loader.region(Region::new(region.clone()));
            }
            if let Some(endpoint) = &session.endpoint_url {
                loader = loader.endpoint_url(endpoint);
            }

            let shared_config = loader.load().await;

            let provider = shared_config.credentials_provider().ok_or_else(|| {
                StorageError::Session(format!(
                    "No credentials provider available for profile '{}'",
                    session.profile
                ))
            })?;
            provider.provide_credentials().await.map_err(|e| {
                StorageError::Session(format!(
                    "Failed to load credentials for profile '{}': {}",
                    session.profile,
                    DisplayErrorContext(&e)
                ))
            })?;

            Ok::<_, StorageError>(shared_config)
        })?;

        if shared_config.region().is_none() {
            return Err(StorageError::Session(format!(
                "No region configured for profile '{}' (pass --region)",
                session.profile
            )));
        }

        log_utils::debug(
            &format!("Resolved region: {:?}", shared_config.region()),
            verbose,
        );

        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(session.force_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            runtime,
            verbose,
        })
    }

    /// Build a client from an already prepared S3 config
    pub fn from_sdk_config(config: aws_sdk_s3::Config, verbose: u8) -> Result<Self> {
        let runtime = new_runtime()?;
        Ok(Self {
            client: Client::from_conf(config),
            runtime,
            verbose,
        })
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| StorageError::Session(format!("Failed to create runtime: {e}")))
}
