pub mod args;
pub mod consistency;
pub mod errors;
pub mod interfaces;
pub mod roundtrip;
pub mod storage;
pub mod utils;
pub mod verify;

pub use args::Args;
pub use errors::{Result, StorageError};
pub use roundtrip::{RoundTripConfig, RoundTripReport, run_round_trip};
pub use storage::{ObjectLocation, S3StorageClient};

use utils::log_utils::Logger;

/// Establish a session from the parsed arguments and run one round trip
pub fn run_app(args: &Args) -> Result<RoundTripReport> {
    let logger = Logger::new(args.verbose);
    let config = args.to_config();

    logger.info(&format!(
        "Connecting with profile '{}'",
        config.session.profile
    ));
    let client = S3StorageClient::connect(&config.session, args.verbose)?;

    run_round_trip(&client, &config, &logger)
}
