pub mod check;
pub mod tex;

use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::RecipeError;

/// Write `contents` to `path` through a temporary file in the same
/// directory, so `path` is either fully written or left as it was.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), RecipeError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|e| RecipeError::io(path, e))?;
    file.write_all(contents)
        .map_err(|e| RecipeError::io(path, e))?;
    file.persist(path)
        .map_err(|e| RecipeError::io(path, e.error))?;

    info!("Wrote {}", path.display());
    Ok(())
}
