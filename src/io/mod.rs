pub mod csv;
pub mod walker;

pub use walker::{find_graph_files, ArtifactWalker, Discovered};

use crate::core::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a file, mapping "not found" to [`Error::MissingArtifact`].
pub fn read_artifact(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::missing_artifact(path),
        _ => Error::Io(e),
    })
}

/// Write the complete contents of an artifact in one call, creating parent
/// directories as needed.
pub fn write_artifact(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
