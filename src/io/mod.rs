//! Small filesystem helpers shared by the stores and `init`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{Error, Result};

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::file_system_with_source("Failed to read file", path, e))
}

/// Read a file, mapping "not found" to `None`
pub fn read_file_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::file_system_with_source(
            "Failed to read file",
            path,
            e,
        )),
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::file_system_with_source("Failed to write file", path, e))
}

/// Write through a sibling temp file and rename, creating parent directories.
///
/// Readers never observe a half-written file.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let temp = temp_sibling(path);
    write_file(&temp, content)?;
    fs::rename(&temp, path)
        .map_err(|e| Error::file_system_with_source("Failed to replace file", path, e))
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| Error::file_system_with_source("Failed to create directory", path, e))?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
