use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::errors::{Result, StorageError};

/// Length and MD5 digest of a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub len: u64,
    pub md5: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyOutcome {
    pub source: FileDigest,
    pub downloaded: FileDigest,
}

impl VerifyOutcome {
    #[must_use]
    pub fn matches(&self) -> bool {
        self.source == self.downloaded
    }
}

/// Stream a file through MD5 without loading it into memory
pub fn digest_file(path: &Path) -> Result<FileDigest> {
    let mut file = File::open(path).map_err(|e| StorageError::local_io(path, e))?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 64 * 1024];
    let mut len: u64 = 0;

    loop {
        let n = file
            .read(&mut buffer)
            .map_err(|e| StorageError::local_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        len += n as u64;
    }

    Ok(FileDigest {
        len,
        md5: format!("{:x}", hasher.finalize()),
    })
}

/// Compare the uploaded source with its downloaded copy.
///
/// Returns `Mismatch` when the lengths or digests differ.
pub fn verify_round_trip(source: &Path, downloaded: &Path) -> Result<VerifyOutcome> {
    let outcome = VerifyOutcome {
        source: digest_file(source)?,
        downloaded: digest_file(downloaded)?,
    };

    if !outcome.matches() {
        return Err(StorageError::Mismatch(format!(
            "'{}' ({} bytes, md5 {}) differs from '{}' ({} bytes, md5 {})",
            source.display(),
            outcome.source.len,
            outcome.source.md5,
            downloaded.display(),
            outcome.downloaded.len,
            outcome.downloaded.md5
        )));
    }

    Ok(outcome)
}
