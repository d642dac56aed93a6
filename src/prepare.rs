use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Result, SetupError};

/// Copy the restart file over `dest`, replacing whatever was there.
/// Returns the number of bytes copied.
pub fn prepare_file(source: Option<&Path>, dest: &Path) -> Result<u64> {
    let source = source.ok_or(SetupError::MissingRestart)?;

    // Compare file identity so hard links are caught too
    if same_file::is_same_file(source, dest).unwrap_or(false) {
        return Err(SetupError::SameFile(dest.to_path_buf()));
    }

    let bytes = fs::copy(source, dest).map_err(|e| SetupError::Copy {
        src: source.to_path_buf(),
        dst: dest.to_path_buf(),
        source: e,
    })?;
    info!("copied {} -> {} ({} bytes)", source.display(), dest.display(), bytes);
    Ok(bytes)
}
