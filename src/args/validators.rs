use super::types::Args;
use std::fs;
use std::path::Path;

/// Validate the args for a round trip
///
/// # Errors
///
/// Returns an error if the arguments are inconsistent.
pub fn validate(args: &Args) -> Result<(), String> {
    if args.read_bytes == 0 {
        return Err("--read-bytes must be at least 1".to_string());
    }
    if args.source == args.dest || same_file(&args.source, &args.dest) {
        return Err(format!(
            "--source and --dest must differ (both are '{}')",
            args.source.display()
        ));
    }
    if let Some(endpoint) = &args.endpoint_url {
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(format!(
                "--endpoint-url must start with http:// or https:// (got '{endpoint}')"
            ));
        }
    }
    Ok(())
}

/// True when `dest` names the existing `source` file under another spelling, e.g. `./a.txt` and `a.txt`.
/// A dest that does not exist yet cannot be the source; a missing source is reported by the upload.
fn same_file(source: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(source), Ok(dest)) => source == dest,
        _ => false,
    }
}

/// Value parser rejecting empty or whitespace-only strings
pub fn parse_non_empty(raw: &str) -> Result<String, String> {
    if raw.trim().is_empty() {
        Err("value must not be empty".to_string())
    } else {
        Ok(raw.to_string())
    }
}
