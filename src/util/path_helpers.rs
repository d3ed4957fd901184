//! Helpers deriving the output paths of a run from the data directory path
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{io_at, Result};

/// The absolute parent of `data_dir`, i.e. `abspath(data_dir/..)`.
/// Normalization is lexical, symlinks are not resolved.
pub fn base_dir(data_dir: &Path) -> Result<PathBuf> {
  let absolute = if data_dir.is_absolute() {
    data_dir.to_path_buf()
  } else {
    env::current_dir().map_err(io_at("."))?.join(data_dir)
  };
  Ok(normalize_lexically(&absolute.join("..")))
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize_lexically(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {},
      Component::ParentDir => {
        // popping past the root is a no-op, as for abspath
        normalized.pop();
      },
      other => normalized.push(other.as_os_str()),
    }
  }
  normalized
}

/// `<dir>/<stem>.<tag>.txt`; an empty tag still keeps both dots
pub fn tagged_file(dir: &Path, stem: &str, tag: &str) -> PathBuf {
  dir.join(format!("{}.{}.txt", stem, tag))
}

/// Create `dir` (and its parents) unless it already exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
  if !dir.exists() {
    log::debug!("-- creating directory {}", dir.display());
    fs::create_dir_all(dir).map_err(io_at(dir))?;
  }
  Ok(())
}
