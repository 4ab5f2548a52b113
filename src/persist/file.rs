//! Blocking history file I/O.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use crate::core::config::StorageConfig;
use crate::core::error::Error;
use crate::core::types::Result;
use crate::history::TerrainHistory;
use super::codec::{decode_history, encode_history};

/// Resolve a history file name against the storage directory.
///
/// Leading separators are ignored, so `"/test"` and `"test"` name the same
/// file. Names without an extension get the configured one. Names that
/// could leave the storage directory (`..`, `.`, drive prefixes) are rejected.
pub fn history_path(storage: &StorageConfig, name: &str) -> Result<PathBuf> {
    let trimmed = name.trim_start_matches(['/', '\\']);
    if trimmed.is_empty()
        || !Path::new(trimmed)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return Err(Error::InvalidFileName(name.to_string()));
    }

    let mut path = storage.data_dir.join(trimmed);
    if path.extension().is_none() {
        path.set_extension(&storage.extension);
    }
    Ok(path)
}

/// Write the whole history to `path`.
///
/// The blob goes to a sibling temporary file first and is renamed into place,
/// so an interrupted save leaves any previous file intact.
pub fn save_history(path: &Path, history: &TerrainHistory) -> Result<()> {
    let bytes = encode_history(history)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);
    let written = write_file(&temp_path, &bytes).and_then(|()| std::fs::rename(&temp_path, path));
    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&temp_path) {
            log::debug!("Could not remove {}: {}", temp_path.display(), cleanup);
        }
        return Err(e.into());
    }

    log::info!(
        "Saved {} history states ({} bytes) to {}",
        history.len(),
        bytes.len(),
        path.display()
    );
    Ok(())
}

/// Read a history from `path`.
///
/// A missing file is reported as [`Error::FileNotFound`].
pub fn load_history(path: &Path) -> Result<TerrainHistory> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let history = decode_history(&bytes)?;
    log::info!(
        "Loaded {} history states from {} (current {:?})",
        history.len(),
        path.display(),
        history.current_index()
    );
    Ok(history)
}

fn write_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(bytes)?;
    writer.flush()
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
