use super::expansion::expand_tilde;
use std::path::PathBuf;

/// Expands a leading `~`. Whether the file can be opened is left to the caller that opens it.
pub fn expand_path(file: &str) -> Result<PathBuf, String> {
    expand_tilde(&PathBuf::from(file))
}

/// Checks that a file could be created at this path: the parent must be an existing directory
/// and the path itself must not be a directory. Nothing is written.
pub fn check_file_creatable(file_path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file_path);
    let expanded_path = expand_tilde(&path)?;

    if expanded_path.is_dir() {
        return Err(format!("'{}' is a directory.", expanded_path.display()));
    }

    // A bare file name has an empty parent, meaning the current directory
    if let Some(parent) = expanded_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(format!(
                "The parent directory of '{}' does not exist.",
                expanded_path.display()
            ));
        }

        if !parent.is_dir() {
            return Err(format!(
                "The parent path '{}' is not a directory.",
                parent.display()
            ));
        }
    }

    Ok(expanded_path)
}
