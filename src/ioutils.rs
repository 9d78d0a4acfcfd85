use std::path::Path;

use crate::error::{Error, Result};

pub fn create_dir_all<P: AsRef<Path>>(dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();
    std::fs::create_dir_all(dest_path).map_err(Error::IoError)
}

/// Writes `content` to `dest_path`, creating parent directories if needed.
pub fn write_file<P: AsRef<Path>>(content: &str, dest_path: P) -> Result<()> {
    let dest_path = dest_path.as_ref();

    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(dest_path, content).map_err(Error::IoError)
}

/// Replaces `dest_path` with `content` in one step.
///
/// The content goes to a temporary file in the same directory which is then
/// renamed over the destination, so readers never see a partial file.
pub fn write_file_atomic<P: AsRef<Path>>(content: &[u8], dest_path: P) -> Result<()> {
    use std::io::Write;

    let dest_path = dest_path.as_ref();
    let parent = match dest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(dest_path).map_err(|e| Error::IoError(e.error))?;
    Ok(())
}
