//! Test utilities for the datafiles crate
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{io_at, Result};
use crate::util::path_helpers;

/// Article lines of the small hand-checked fixture
pub const SAMPLE_ARTICLE: [&str; 2] = ["The cat sat", "It was happy"];
/// Summary lines of the small hand-checked fixture
pub const SAMPLE_SUMMARY: [&str; 1] = ["The cat is happy"];

/// Write `lines` to `path`, one per line, with a trailing newline
pub fn write_lines(path: &Path, lines: &[&str]) -> Result<()> {
  let mut contents = lines.join("\n");
  if !lines.is_empty() {
    contents.push('\n');
  }
  fs::write(path, contents).map_err(io_at(path))
}

/// Lay down a raw article/summary pair in `data_dir`, named the way the
/// pipeline expects to find them after tokenization. Returns both paths.
pub fn write_pair(
  data_dir: &Path,
  filename: &str,
  article_tag: &str,
  summary_tag: &str,
  article: &[&str],
  summary: &[&str],
) -> Result<(PathBuf, PathBuf)> {
  path_helpers::ensure_dir(data_dir)?;
  let article_path = path_helpers::tagged_file(data_dir, filename, article_tag);
  let summary_path = path_helpers::tagged_file(data_dir, filename, summary_tag);
  write_lines(&article_path, article)?;
  write_lines(&summary_path, summary)?;
  Ok((article_path, summary_path))
}
