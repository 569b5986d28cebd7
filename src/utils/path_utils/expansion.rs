use home::home_dir;
use std::path::{Path, PathBuf};

/// Resolve a leading `~` against the user's home directory; other paths pass through.
pub(super) fn expand_tilde(path: &Path) -> Result<PathBuf, String> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let home = home_dir().ok_or_else(|| "Home directory could not be determined.".to_string())?;
    Ok(home.join(rest))
}
