//! Path resolution for user-supplied locations

use std::io;
use std::path::PathBuf;

/// Resolve a configured location (config file, report directory) to an
/// absolute path.
///
/// A leading `~` is replaced by the home directory and relative paths are
/// anchored at the working directory. Blank input is an error.
pub fn resolve_path(raw: &str) -> io::Result<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "path is empty"));
    }

    let path = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            let home = dirs::home_dir().ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("cannot expand '{}': home directory unknown", raw),
                )
            })?;
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };

    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
